// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod capture;
pub mod transcribe;

pub use capture::{
    AudioClip, AudioInput, CaptureStream, CaptureTimer, FileAudioInput, StreamGuard, TimerCancel,
    TimerExit,
};
pub use transcribe::{parse_transcription, HttpTranscriber, Transcriber};

use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("Audio input unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("Recording failed: {0}")]
    Capture(String),
    #[error("Nothing was recorded")]
    EmptyCapture,
    #[error("Transcription request failed: {0}")]
    Network(String),
    #[error("Transcription endpoint returned HTTP {0}")]
    Status(u16),
    #[error("Malformed transcription response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for VoiceError {
    fn from(e: reqwest::Error) -> Self {
        VoiceError::Network(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Recording,
    Transcribing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VoiceOutcome {
    Transcribed(String),
    NoResult,
    /// Another session was already running; nothing happened.
    Busy,
    /// The microphone could not be opened. Worth telling the user.
    DeviceUnavailable(String),
    /// Recording or transcription failed. Logged, search left as is.
    Failed(String),
}

impl VoiceOutcome {
    /// Text to feed into the search box, if any.
    pub fn search_text(&self) -> Option<&str> {
        match self {
            VoiceOutcome::Transcribed(text) => Some(text.as_str()),
            _ => None,
        }
    }
}

/// Puts the controller back to `Idle` however the session ends.
struct ResetOnDrop<'a>(&'a Mutex<VoiceState>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = VoiceState::Idle;
    }
}

/// Runs one voice search at a time: record for a fixed window, then
/// transcribe. A `start` while a session is running is rejected, not queued.
pub struct VoiceSearchController {
    state: Mutex<VoiceState>,
    audio: Arc<dyn AudioInput>,
    transcriber: Arc<dyn Transcriber>,
    max_duration: Duration,
    submissions: AtomicUsize,
}

impl VoiceSearchController {
    pub fn new(
        audio: Arc<dyn AudioInput>,
        transcriber: Arc<dyn Transcriber>,
        max_duration: Duration,
    ) -> Self {
        Self {
            state: Mutex::new(VoiceState::Idle),
            audio,
            transcriber,
            max_duration,
            submissions: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> VoiceState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_listening(&self) -> bool {
        self.state() != VoiceState::Idle
    }

    /// Number of clips sent to the transcriber so far.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub async fn start(&self) -> VoiceOutcome {
        if !self.try_begin() {
            debug!("Voice search already running; ignoring start");
            return VoiceOutcome::Busy;
        }
        let _reset = ResetOnDrop(&self.state);

        let clip = match self.record().await {
            Ok(clip) => clip,
            Err(VoiceError::DeviceUnavailable(reason)) => {
                warn!("Voice search aborted, no audio input — reason={}", reason);
                return VoiceOutcome::DeviceUnavailable(reason);
            }
            Err(e) => {
                warn!("Voice recording failed — error={}", e);
                return VoiceOutcome::Failed(e.to_string());
            }
        };

        self.set_state(VoiceState::Transcribing);
        self.submissions.fetch_add(1, Ordering::SeqCst);

        match self.transcriber.transcribe(clip).await {
            Ok(Some(text)) => {
                info!("Voice search transcribed — text={:?}", text);
                VoiceOutcome::Transcribed(text)
            }
            Ok(None) => {
                info!("Voice search returned no text");
                VoiceOutcome::NoResult
            }
            Err(e) => {
                warn!("Voice search failed — error={}", e);
                VoiceOutcome::Failed(e.to_string())
            }
        }
    }

    fn try_begin(&self) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state != VoiceState::Idle {
            return false;
        }
        *state = VoiceState::Recording;
        true
    }

    fn set_state(&self, next: VoiceState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
    }

    async fn record(&self) -> Result<AudioClip, VoiceError> {
        let guard = StreamGuard::new(self.audio.acquire().await?);
        // Only the timer ends a recording; the cancel handle is held, unused,
        // until the window closes.
        let (timer, _cancel) = CaptureTimer::new(self.max_duration);
        let exit = timer.wait().await;
        debug!("Recording window closed — exit={:?}", exit);
        guard.finish()
    }
}
