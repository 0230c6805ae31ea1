// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use super::VoiceError;
use async_trait::async_trait;
use log::debug;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::oneshot;

pub const WEBM_MIME: &str = "audio/webm";

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl AudioClip {
    pub fn webm(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime_type: WEBM_MIME.to_string(),
        }
    }
}

/// Source of recording sessions, e.g. a microphone.
#[async_trait]
pub trait AudioInput: Send + Sync {
    /// Opens the input and starts recording. Fails when the device is
    /// missing or permission is denied.
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, VoiceError>;
}

/// One open recording.
pub trait CaptureStream: Send {
    /// Stops the recorder and hands back what was captured.
    fn finish(&mut self) -> Result<AudioClip, VoiceError>;

    /// Stops every track of the underlying input.
    fn release(&mut self);
}

/// Releases the wrapped stream when dropped, whichever way the session ends.
pub struct StreamGuard {
    stream: Box<dyn CaptureStream>,
}

impl StreamGuard {
    pub fn new(stream: Box<dyn CaptureStream>) -> Self {
        Self { stream }
    }

    pub fn finish(mut self) -> Result<AudioClip, VoiceError> {
        self.stream.finish()
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.stream.release();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerExit {
    Elapsed,
    Cancelled,
}

/// Fixed-length recording window.
pub struct CaptureTimer {
    duration: Duration,
    cancel: oneshot::Receiver<()>,
}

/// Ends a [`CaptureTimer`] early. Dropping it without calling
/// [`TimerCancel::cancel`] leaves the timer running to its deadline.
pub struct TimerCancel(oneshot::Sender<()>);

impl TimerCancel {
    pub fn cancel(self) {
        let _ = self.0.send(());
    }
}

impl CaptureTimer {
    pub fn new(duration: Duration) -> (Self, TimerCancel) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                duration,
                cancel: rx,
            },
            TimerCancel(tx),
        )
    }

    pub async fn wait(self) -> TimerExit {
        let sleep = tokio::time::sleep(self.duration);
        tokio::pin!(sleep);
        tokio::select! {
            _ = &mut sleep => TimerExit::Elapsed,
            // A dropped sender yields Err, which disables this branch
            Ok(()) = self.cancel => TimerExit::Cancelled,
        }
    }
}

/// Replays a pre-recorded webm clip as if it were a microphone.
pub struct FileAudioInput {
    path: PathBuf,
}

impl FileAudioInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AudioInput for FileAudioInput {
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, VoiceError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            VoiceError::DeviceUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        debug!(
            "Audio input opened — path={} bytes={}",
            self.path.display(),
            bytes.len()
        );
        Ok(Box::new(FileStream {
            path: self.path.clone(),
            bytes: Some(bytes),
        }))
    }
}

struct FileStream {
    path: PathBuf,
    bytes: Option<Vec<u8>>,
}

impl CaptureStream for FileStream {
    fn finish(&mut self) -> Result<AudioClip, VoiceError> {
        match self.bytes.take() {
            Some(bytes) if !bytes.is_empty() => Ok(AudioClip::webm(bytes)),
            _ => Err(VoiceError::EmptyCapture),
        }
    }

    fn release(&mut self) {
        self.bytes = None;
        debug!("Audio input released — path={}", self.path.display());
    }
}
