// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::capture::AudioClip;
use super::VoiceError;
use crate::config::VoiceConfig;
use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;

/// Speech-to-text backend. `Ok(None)` means the audio held no usable text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, clip: AudioClip) -> Result<Option<String>, VoiceError>;
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: Option<String>,
}

/// Reads `{"text": "..."}`. A missing or blank `text` is "no result".
pub fn parse_transcription(body: &str) -> Result<Option<String>, VoiceError> {
    let parsed: TranscriptionResponse =
        serde_json::from_str(body).map_err(|e| VoiceError::Malformed(e.to_string()))?;
    Ok(parsed
        .text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()))
}

/// Posts the clip as multipart field `audio` to a speech-to-text endpoint.
pub struct HttpTranscriber {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTranscriber {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, VoiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &VoiceConfig) -> Result<Self, VoiceError> {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }
}

#[async_trait]
impl Transcriber for HttpTranscriber {
    async fn transcribe(&self, clip: AudioClip) -> Result<Option<String>, VoiceError> {
        let size = clip.bytes.len();
        let part = reqwest::multipart::Part::bytes(clip.bytes)
            .file_name("audio.webm")
            .mime_str(&clip.mime_type)?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        info!(
            "Submitting audio for transcription — endpoint={} bytes={}",
            self.endpoint, size
        );
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!("Transcription response — bytes={}", body.len());
        parse_transcription(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!(
            parse_transcription(r#"{"text": " IT block "}"#).unwrap(),
            Some("IT block".to_string())
        );
    }

    #[test]
    fn test_absent_or_blank_text_is_no_result() {
        assert_eq!(parse_transcription("{}").unwrap(), None);
        assert_eq!(parse_transcription(r#"{"text": null}"#).unwrap(), None);
        assert_eq!(parse_transcription(r#"{"text": "  "}"#).unwrap(), None);
        assert_eq!(
            parse_transcription(r#"{"language": "en"}"#).unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_payload() {
        assert!(matches!(
            parse_transcription("Internal Server Error"),
            Err(VoiceError::Malformed(_))
        ));
        assert!(matches!(
            parse_transcription(r#"{"text": 42}"#),
            Err(VoiceError::Malformed(_))
        ));
    }
}
