//! Cancellable narration playback
//!
//! A [`PlaybackHandle`] owns the life cycle of one narration at a time:
//!
//! ```text
//!   Idle | Stopped | Errored --request--> Loading
//!   Loading --loaded--> Playing --finished--> Idle
//!   Loading | Playing --stop--> Stopped
//!   Loading | Playing --fail--> Errored
//! ```
//!
//! Any other trigger is rejected with `InvalidTransition` and leaves the
//! state unchanged.

use bytes::Bytes;
use futures::future::{AbortHandle, Abortable};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{SpeechSynthesizer, Voice};
use crate::error::{PokedexError, Result};
use crate::text_processing::normalization::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Stopped,
    Errored(String),
}

impl PlaybackState {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Playing => "playing",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Errored(_) => "errored",
        }
    }

    /// State reached by applying `trigger`, if the transition exists
    pub fn next(&self, trigger: &PlaybackTrigger) -> Result<PlaybackState> {
        use PlaybackState::*;

        let next = match (self, trigger) {
            (Idle | Stopped | Errored(_), PlaybackTrigger::Request) => Loading,
            (Loading, PlaybackTrigger::Loaded) => Playing,
            (Playing, PlaybackTrigger::Finished) => Idle,
            (Loading | Playing, PlaybackTrigger::Stop) => Stopped,
            (Loading | Playing, PlaybackTrigger::Fail(message)) => Errored(message.clone()),
            _ => {
                return Err(PokedexError::InvalidTransition {
                    from: self.name().to_string(),
                    trigger: trigger.name().to_string(),
                })
            }
        };

        Ok(next)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackState::Errored(message) => write!(f, "errored ({})", message),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTrigger {
    Request,
    Loaded,
    Finished,
    Stop,
    Fail(String),
}

impl PlaybackTrigger {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackTrigger::Request => "request",
            PlaybackTrigger::Loaded => "loaded",
            PlaybackTrigger::Finished => "finished",
            PlaybackTrigger::Stop => "stop",
            PlaybackTrigger::Fail(_) => "fail",
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: PlaybackState,
    audio: Option<Bytes>,
    abort: Option<AbortHandle>,
    // Bumped on every request so a superseded request can tell it lost
    generation: u64,
}

impl Inner {
    fn fire(&mut self, trigger: PlaybackTrigger) -> Result<PlaybackState> {
        let next = self.state.next(&trigger)?;
        tracing::debug!(
            from = self.state.name(),
            to = next.name(),
            trigger = trigger.name(),
            "Playback transition"
        );
        self.state = next.clone();
        Ok(next)
    }
}

/// Shared, cloneable handle to a narration
#[derive(Debug, Clone, Default)]
pub struct PlaybackHandle {
    inner: Arc<Mutex<Inner>>,
}

impl PlaybackHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> PlaybackState {
        self.lock().state.clone()
    }

    /// Audio of the last successful request
    pub fn audio(&self) -> Option<Bytes> {
        self.lock().audio.clone()
    }

    /// Apply a trigger directly
    pub fn fire(&self, trigger: PlaybackTrigger) -> Result<PlaybackState> {
        self.lock().fire(trigger)
    }

    /// Normalize `text`, synthesize it and move to `Playing`
    ///
    /// Returns `Cancelled` if [`stop`](Self::stop) is called while the
    /// request is in flight, or if a newer request replaced this one.
    pub async fn play<S>(&self, synthesizer: &S, text: &str, voice: Voice) -> Result<Bytes>
    where
        S: SpeechSynthesizer + ?Sized,
    {
        let spoken = normalize(text);
        if spoken.trim().is_empty() {
            return Err(PokedexError::EmptyText);
        }

        let (abort, registration) = AbortHandle::new_pair();
        let generation = {
            let mut inner = self.lock();
            inner.fire(PlaybackTrigger::Request)?;
            inner.generation += 1;
            inner.audio = None;
            inner.abort = Some(abort);
            inner.generation
        };

        let outcome = Abortable::new(synthesizer.synthesize(&spoken, voice), registration).await;

        let mut inner = self.lock();
        if inner.generation != generation || inner.state != PlaybackState::Loading {
            return Err(PokedexError::Cancelled);
        }
        inner.abort = None;

        match outcome {
            Err(_aborted) => Err(PokedexError::Cancelled),
            Ok(Ok(audio)) => {
                inner.fire(PlaybackTrigger::Loaded)?;
                inner.audio = Some(audio.clone());
                Ok(audio)
            }
            Ok(Err(e)) => {
                tracing::warn!("Speech request failed: {}", e);
                inner.fire(PlaybackTrigger::Fail(e.to_string()))?;
                Err(e)
            }
        }
    }

    /// Stop playback, cancelling an in-flight request
    pub fn stop(&self) -> Result<PlaybackState> {
        let mut inner = self.lock();
        let state = inner.fire(PlaybackTrigger::Stop)?;
        if let Some(abort) = inner.abort.take() {
            abort.abort();
        }
        Ok(state)
    }

    /// Mark the clip as played to the end
    pub fn finish(&self) -> Result<PlaybackState> {
        self.lock().fire(PlaybackTrigger::Finished)
    }
}
