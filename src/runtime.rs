//! Effect execution.
//!
//! Translation requests and document reads run on worker threads and report
//! back as [`Msg`]s over a channel. Export and speech run inline. [`Session`]
//! ties a [`Model`] to a [`Runtime`] and is shared by the TUI and the headless
//! command line.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::documents;
use crate::export;
use crate::model::{Effect, Model, Msg};
use crate::speech::SpeechSynthesizer;
use crate::translate::{TranslationRequest, Translator};

/// Executes effects and collects their completions.
pub struct Runtime {
    translator: Arc<dyn Translator>,
    speech: Box<dyn SpeechSynthesizer>,
    export_dir: PathBuf,
    sender: Sender<Msg>,
    receiver: Receiver<Msg>,
    /// Completions sent but not yet received
    outstanding: usize,
}

impl Runtime {
    pub fn new(
        translator: Arc<dyn Translator>,
        speech: Box<dyn SpeechSynthesizer>,
        export_dir: PathBuf,
    ) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            translator,
            speech,
            export_dir,
            sender,
            receiver,
            outstanding: 0,
        }
    }

    pub fn speech_available(&self) -> bool {
        self.speech.is_available()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Start executing an effect. Its outcome, if any, arrives as a message.
    pub fn execute(&mut self, effect: Effect) {
        match effect {
            Effect::Translate(request) => self.spawn_translation(request),
            Effect::LoadDocument { path, kind } => {
                let sender = self.sender.clone();
                let task_path = path.clone();
                self.spawn("document", path, move || {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        documents::read_document(&task_path, kind)
                    }))
                    .map_err(|payload| panic_message(payload.as_ref()))
                    .and_then(|result| result.map_err(|e| e.to_string()));
                    let _ = sender.send(Msg::DocumentLoaded {
                        path: task_path,
                        outcome,
                    });
                });
            }
            Effect::Export { text, target_code } => {
                let result = export::export_result(&self.export_dir, &text, &target_code)
                    .map_err(|e| e.to_string());
                self.post(Msg::ExportFinished(result));
            }
            Effect::Speak { text, lang } => {
                if let Err(err) = self.speech.speak(&text, &lang) {
                    tracing::error!(error = %err, "speech failed");
                    self.post(Msg::SpeechFailed(err.to_string()));
                }
            }
        }
    }

    fn spawn_translation(&mut self, request: TranslationRequest) {
        let translator = Arc::clone(&self.translator);
        let sender = self.sender.clone();
        let id = request.id;

        tracing::debug!(
            id,
            source = %request.source,
            target = %request.target,
            chars = request.text.chars().count(),
            "translation requested"
        );

        let spawned = std::thread::Builder::new()
            .name(format!("translate-{id}"))
            .spawn(move || {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    translator.translate(&request.text, &request.source, &request.target)
                }))
                .map_err(|payload| panic_message(payload.as_ref()))
                .and_then(|result| result.map_err(|e| e.to_string()));
                let _ = sender.send(Msg::TranslationFinished { id, outcome });
            });

        match spawned {
            Ok(_) => self.outstanding += 1,
            Err(err) => self.post(Msg::TranslationFinished {
                id,
                outcome: Err(err.to_string()),
            }),
        }
    }

    fn spawn<F>(&mut self, name: &str, path: PathBuf, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match std::thread::Builder::new().name(name.to_string()).spawn(task) {
            Ok(_) => self.outstanding += 1,
            Err(err) => self.post(Msg::DocumentLoaded {
                path,
                outcome: Err(err.to_string()),
            }),
        }
    }

    /// Queue a completion produced on the calling thread.
    fn post(&mut self, msg: Msg) {
        if self.sender.send(msg).is_ok() {
            self.outstanding += 1;
        }
    }

    /// Completions that are ready now.
    pub fn try_completions(&mut self) -> Vec<Msg> {
        let msgs: Vec<Msg> = self.receiver.try_iter().collect();
        self.outstanding = self.outstanding.saturating_sub(msgs.len());
        msgs
    }

    /// Block for the next completion; `None` once nothing is outstanding.
    pub fn wait_completion(&mut self) -> Option<Msg> {
        if self.outstanding == 0 {
            return None;
        }
        let msg = self.receiver.recv().ok()?;
        self.outstanding -= 1;
        Some(msg)
    }
}

/// Describe a worker panic so it can be reported like any other failure.
/// Every spawned worker must post exactly one completion, or `settle` hangs.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    tracing::error!(%detail, "worker panicked");
    format!("worker panicked: {detail}")
}

/// A model driven by a runtime.
pub struct Session {
    pub model: Model,
    runtime: Runtime,
}

impl Session {
    pub fn new(model: Model, runtime: Runtime) -> Self {
        Self { model, runtime }
    }

    /// Apply a message with its chain, then start the effects it queued.
    pub fn dispatch(&mut self, msg: Msg) {
        self.model.apply(msg);
        for effect in self.model.take_effects() {
            self.runtime.execute(effect);
        }
    }

    /// Apply every completion that is ready. Returns whether any was applied.
    pub fn pump(&mut self) -> bool {
        let msgs = self.runtime.try_completions();
        let applied = !msgs.is_empty();
        for msg in msgs {
            self.dispatch(msg);
        }
        applied
    }

    /// Block until every started effect, and everything it chained, completed.
    pub fn settle(&mut self) {
        while let Some(msg) = self.runtime.wait_completion() {
            self.dispatch(msg);
        }
    }

    pub fn is_idle(&self) -> bool {
        self.runtime.outstanding() == 0
    }
}
