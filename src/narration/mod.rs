//! Speech narration
//!
//! A [`Narrator`] turns lesson text into audible speech. At most one utterance
//! plays at a time; starting a new one cancels the previous. Progress is
//! reported as [`NarrationEvent`]s on a channel supplied with each utterance.
//! Narration is best effort: a host without speech support just stays quiet.

pub mod command;
pub mod error;

pub use command::{CommandNarrator, SpeechEngine, VoiceSettings};
pub use error::NarrationError;

use tokio::sync::mpsc;

use crate::config::NarrationConfig;

/// Identifies one call to [`Narrator::speak`]
pub type UtteranceId = u64;

/// Channel on which narrators report playback progress
pub type NarrationSender = mpsc::UnboundedSender<NarrationEvent>;

/// Playback progress for an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrationEvent {
    /// Audio for the utterance started
    Started(UtteranceId),
    /// The utterance finished or was cancelled
    Ended(UtteranceId),
}

/// Text to be spoken, tagged with an id for event correlation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: UtteranceId,
    pub text: String,
}

impl Utterance {
    pub fn new(id: UtteranceId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

/// Speech output collaborator
pub trait Narrator: Send {
    /// Speak `utterance`, cancelling anything still playing
    fn speak(&mut self, utterance: Utterance, events: NarrationSender);

    /// Stop the current utterance, if any
    fn cancel_current(&mut self);

    /// Whether the host can produce speech at all
    fn is_available(&self) -> bool;
}

/// Narrator for hosts without speech, or when narration is turned off
#[derive(Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&mut self, utterance: Utterance, _events: NarrationSender) {
        tracing::trace!(id = utterance.id, "narration disabled, skipping utterance");
    }

    fn cancel_current(&mut self) {}

    fn is_available(&self) -> bool {
        false
    }
}

/// Build the narrator described by the configuration
pub fn from_config(config: &NarrationConfig) -> Box<dyn Narrator> {
    if !config.enabled {
        tracing::info!("narration disabled by configuration");
        return Box::new(SilentNarrator);
    }

    let engine = match &config.program {
        Some(program) => SpeechEngine::from_program(program),
        None => match SpeechEngine::detect() {
            Some(engine) => engine,
            None => {
                tracing::info!("no speech program found, narration disabled");
                return Box::new(SilentNarrator);
            }
        },
    };

    let voice = VoiceSettings { rate: config.rate, pitch: config.pitch, volume: config.volume };
    tracing::info!(program = engine.program(), "narration enabled");
    Box::new(CommandNarrator::new(engine, voice))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_narrator_is_unavailable_and_sends_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = SilentNarrator;

        narrator.speak(Utterance::new(1, "Hello"), tx);
        narrator.cancel_current();

        assert!(!narrator.is_available());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn disabled_config_yields_silent_narrator() {
        let config = NarrationConfig { enabled: false, ..Default::default() };
        assert!(!from_config(&config).is_available());
    }
}
