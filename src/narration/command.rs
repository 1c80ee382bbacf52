//! Narration through an external speech program
//!
//! Each utterance runs the program as a child process. Cancelling an
//! utterance kills its child; the watcher task always reports `Ended`.

use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use super::error::NarrationError;
use super::{NarrationEvent, NarrationSender, Narrator, Utterance, UtteranceId};

/// Voice parameters, relative to the engine's defaults (1.0 = default)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self { rate: 0.9, pitch: 1.2, volume: 0.8 }
    }
}

/// Supported speech programs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEngine {
    /// espeak or espeak-ng
    Espeak(String),
    /// macOS `say`
    Say,
    /// Any program taking the text as its last argument
    Custom(String),
}

impl SpeechEngine {
    /// Default speaking rate of espeak and say, in words per minute
    const BASE_WPM: f32 = 175.0;

    /// Candidate programs, in order of preference
    const CANDIDATES: &'static [&'static str] = &["espeak-ng", "espeak", "say"];

    /// Pick the engine matching a program name
    pub fn from_program(program: &str) -> Self {
        let name = Path::new(program).file_name().and_then(|n| n.to_str()).unwrap_or(program);
        match name {
            "espeak" | "espeak-ng" => SpeechEngine::Espeak(program.to_string()),
            "say" => SpeechEngine::Say,
            _ => SpeechEngine::Custom(program.to_string()),
        }
    }

    /// Find the first installed speech program on PATH
    pub fn detect() -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        Self::CANDIDATES
            .iter()
            .find(|candidate| std::env::split_paths(&path).any(|dir| dir.join(candidate).is_file()))
            .map(|program| Self::from_program(program))
    }

    /// Program to execute
    pub fn program(&self) -> &str {
        match self {
            SpeechEngine::Espeak(program) | SpeechEngine::Custom(program) => program,
            SpeechEngine::Say => "say",
        }
    }

    /// Command line arguments for speaking `text`
    pub fn args(&self, voice: &VoiceSettings, text: &str) -> Vec<String> {
        let wpm = ((Self::BASE_WPM * voice.rate).round() as u32).max(80);
        match self {
            SpeechEngine::Espeak(_) => {
                // espeak pitch is 0-99 (default 50), amplitude 0-200 (default 100)
                let pitch = ((50.0 * voice.pitch).round() as u32).min(99);
                let amplitude = ((100.0 * voice.volume).round() as u32).min(200);
                vec![
                    "-s".to_string(),
                    wpm.to_string(),
                    "-p".to_string(),
                    pitch.to_string(),
                    "-a".to_string(),
                    amplitude.to_string(),
                    "--".to_string(),
                    text.to_string(),
                ]
            }
            // say has no pitch or volume flags
            SpeechEngine::Say => vec!["-r".to_string(), wpm.to_string(), text.to_string()],
            SpeechEngine::Custom(_) => vec![text.to_string()],
        }
    }
}

/// Utterance currently playing
struct ActiveUtterance {
    id: UtteranceId,
    cancel: CancellationToken,
}

/// Narrator backed by a speech program
pub struct CommandNarrator {
    engine: SpeechEngine,
    voice: VoiceSettings,
    current: Option<ActiveUtterance>,
    available: bool,
}

impl CommandNarrator {
    pub fn new(engine: SpeechEngine, voice: VoiceSettings) -> Self {
        Self { engine, voice, current: None, available: true }
    }

    /// Spawn the speech program and a task that reports when it exits
    fn start(
        &mut self,
        utterance: Utterance,
        events: NarrationSender,
    ) -> Result<(), NarrationError> {
        let program = self.engine.program().to_string();
        let mut child = Command::new(&program)
            .args(self.engine.args(&self.voice, &utterance.text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                // Not installed, or present on PATH but not executable
                if matches!(source.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) {
                    NarrationError::Unavailable { program: program.clone() }
                } else {
                    NarrationError::Spawn { program: program.clone(), source }
                }
            })?;

        let id = utterance.id;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let _ = events.send(NarrationEvent::Started(id));

        tokio::spawn(async move {
            let cancelled = tokio::select! {
                _ = token.cancelled() => true,
                status = child.wait() => {
                    match status {
                        Ok(status) if !status.success() => {
                            tracing::debug!(id, %status, "speech program exited with failure");
                        }
                        Err(e) => tracing::debug!(id, "failed waiting for speech program: {}", e),
                        Ok(_) => {}
                    }
                    false
                }
            };
            if cancelled {
                let _ = child.kill().await;
            }
            let _ = events.send(NarrationEvent::Ended(id));
        });

        self.current = Some(ActiveUtterance { id, cancel });
        Ok(())
    }
}

impl Narrator for CommandNarrator {
    fn speak(&mut self, utterance: Utterance, events: NarrationSender) {
        self.cancel_current();

        if !self.available {
            return;
        }

        if let Err(e) = self.start(utterance, events) {
            if e.is_permanent() {
                tracing::warn!("{}, continuing without narration", e);
                self.available = false;
            } else {
                tracing::warn!("{}", e);
            }
        }
    }

    fn cancel_current(&mut self) {
        if let Some(active) = self.current.take() {
            tracing::debug!(id = active.id, "cancelling narration");
            active.cancel.cancel();
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

impl Drop for CommandNarrator {
    fn drop(&mut self) {
        self.cancel_current();
    }
}
