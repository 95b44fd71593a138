//! Text-to-speech through an external synthesizer program.
//!
//! At most one utterance plays at a time: starting a new one stops the
//! previous process first.

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

use serde::{Deserialize, Serialize};

/// Alert raised when no synthesizer is available.
pub const SPEECH_UNAVAILABLE_MESSAGE: &str =
    "Sorry, your terminal does not support text-to-speech.";

/// Error type for speech playback.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("speech synthesizer `{0}` is not available")]
    Unavailable(String),
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

/// Platform speech capability.
pub trait SpeechSynthesizer: Send {
    /// Whether utterances can be produced at all.
    fn is_available(&self) -> bool;

    /// Stop the active utterance and start speaking `text` in `lang`.
    fn speak(&mut self, text: &str, lang: &str) -> Result<(), SpeechError>;

    /// Stop the active utterance, if any.
    fn cancel(&mut self);
}

/// Speech settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Program invoked as `<program> -v <lang> <text>`
    pub program: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
        }
    }
}

/// Synthesizer backed by an espeak-compatible command.
pub struct CommandSpeech {
    program: String,
    resolved: Option<PathBuf>,
    child: Option<Child>,
}

impl CommandSpeech {
    /// Probe `PATH` for the configured program once.
    pub fn new(config: &SpeechConfig) -> Self {
        let resolved = find_program(&config.program);
        match &resolved {
            Some(path) => tracing::info!(program = %path.display(), "speech synthesizer found"),
            None => tracing::warn!(program = %config.program, "speech synthesizer not found"),
        }
        Self {
            program: config.program.clone(),
            resolved,
            child: None,
        }
    }

    /// Whether an utterance process is still running.
    pub fn is_speaking(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn is_available(&self) -> bool {
        self.resolved.is_some()
    }

    fn speak(&mut self, text: &str, lang: &str) -> Result<(), SpeechError> {
        let Some(program) = self.resolved.clone() else {
            return Err(SpeechError::Unavailable(self.program.clone()));
        };

        self.cancel();

        let child = Command::new(&program)
            .arg("-v")
            .arg(lang)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        tracing::debug!(lang, chars = text.chars().count(), "utterance started");
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take()
            && matches!(child.try_wait(), Ok(None))
        {
            tracing::debug!("cancelling active utterance");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Resolve `program` the way a shell would: paths are used as-is, bare names
/// are searched on `PATH`.
fn find_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let candidate = PathBuf::from(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then_some(candidate);
    }
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|full| full.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_unavailable() {
        let mut speech = CommandSpeech::new(&SpeechConfig {
            program: "definitely-not-a-real-synth-4242".to_string(),
        });
        assert!(!speech.is_available());
        assert!(matches!(
            speech.speak("hello", "en"),
            Err(SpeechError::Unavailable(_))
        ));
    }

    #[test]
    fn empty_program_is_unavailable() {
        let speech = CommandSpeech::new(&SpeechConfig {
            program: String::new(),
        });
        assert!(!speech.is_available());
    }

    #[cfg(unix)]
    #[test]
    fn speaking_twice_replaces_the_first_utterance() {
        let mut speech = CommandSpeech::new(&SpeechConfig {
            program: "true".to_string(),
        });
        assert!(speech.is_available());

        speech.speak("first", "en").unwrap();
        speech.speak("second", "fr").unwrap();
        assert!(speech.child.is_some());

        speech.cancel();
        assert!(speech.child.is_none());
        assert!(!speech.is_speaking());
    }
}
