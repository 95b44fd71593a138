//! Application model and reducer.
//!
//! All UI state lives in [`AppState`]. Every user interaction and every
//! completed background job arrives as a [`Msg`]; [`Model::update`] mutates
//! the state, optionally chains a follow-up message, and queues [`Effect`]s
//! for the runtime to execute.

use std::path::PathBuf;

use serde::Serialize;
use tuirealm::Update;

use crate::catalog::Catalog;
use crate::config::Settings;
use crate::documents::{
    self, DEFAULT_UPLOAD_LABEL, DocumentKind, REJECTED_FILE_MESSAGE, display_name,
};
use crate::selector::{ClickTarget, SelectorRegion, SelectorState, Side};
use crate::speech::SPEECH_UNAVAILABLE_MESSAGE;
use crate::translate::{RequestTracker, TRANSLATION_ERROR_MESSAGE, TranslationRequest};

/// All possible messages handled by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    // Application control
    Quit,
    ShowHelp,
    HideHelp,
    DismissAlert,

    // Focus/Navigation
    FocusNext,
    FocusPrev,

    // Selectors
    Click(ClickTarget),
    SearchChanged { side: Side, term: String },
    HighlightMoved { side: Side, delta: isize },

    // Source panel
    StartEditing,
    StopEditing,
    SourceChanged(String),

    // Translation (chained after input, selection, swap and import)
    Translate,
    TranslationFinished { id: u64, outcome: Result<String, String> },

    Swap,

    // Import flow
    OpenImportPrompt,
    ImportPathChanged(String),
    CloseImportPrompt,
    ImportRequested(Vec<PathBuf>),
    DocumentLoaded {
        path: PathBuf,
        outcome: Result<String, String>,
    },

    // Export flow
    Export,
    ExportFinished(Result<Option<PathBuf>, String>),

    // Speech
    Speak(Side),
    SpeechFailed(String),

    ToggleAppearance,
}

/// Side effects requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Translate(TranslationRequest),
    LoadDocument { path: PathBuf, kind: DocumentKind },
    Export { text: String, target_code: String },
    Speak { text: String, lang: String },
}

/// Text held by a panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelState {
    pub text: String,
}

/// Upload label and the file currently chosen for import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadState {
    pub label: String,
    pub selected: Option<PathBuf>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            label: DEFAULT_UPLOAD_LABEL.to_string(),
            selected: None,
        }
    }
}

impl UploadState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Serializable application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub source: SelectorState,
    pub target: SelectorState,
    pub source_panel: PanelState,
    pub result_panel: PanelState,
    pub upload: UploadState,
    pub dark_mode: bool,
    /// Blocking message shown until dismissed.
    pub alert: Option<String>,
    /// Transient status line message.
    pub status: Option<String>,
    pub requests: RequestTracker,
}

impl AppState {
    pub fn selector(&self, side: Side) -> &SelectorState {
        match side {
            Side::Source => &self.source,
            Side::Target => &self.target,
        }
    }

    pub fn selector_mut(&mut self, side: Side) -> &mut SelectorState {
        match side {
            Side::Source => &mut self.source,
            Side::Target => &mut self.target,
        }
    }

    pub fn panel(&self, side: Side) -> &PanelState {
        match side {
            Side::Source => &self.source_panel,
            Side::Target => &self.result_panel,
        }
    }
}

/// Application model containing all state.
pub struct Model {
    pub catalog: Catalog,
    pub state: AppState,
    pub max_source_chars: usize,
    pub speech_available: bool,

    // UI state
    pub quit: bool,
    pub show_help: bool,
    pub editing_source: bool,
    pub import_prompt: Option<String>,
    /// Error of the last applied translation, if it failed
    pub last_failure: Option<String>,

    effects: Vec<Effect>,
}

impl Model {
    /// Create the model from settings; unknown language codes fall back to the
    /// first catalog entry.
    pub fn new(catalog: Catalog, settings: &Settings, speech_available: bool) -> Self {
        let source = SelectorState::new(catalog.resolve(&settings.source_lang));
        let target = SelectorState::new(catalog.resolve(&settings.target_lang));

        Self {
            state: AppState {
                source,
                target,
                source_panel: PanelState::default(),
                result_panel: PanelState::default(),
                upload: UploadState::default(),
                dark_mode: settings.dark_mode,
                alert: None,
                status: None,
                requests: RequestTracker::default(),
            },
            catalog,
            max_source_chars: settings.max_source_chars,
            speech_available,
            quit: false,
            show_help: false,
            editing_source: false,
            import_prompt: None,
            last_failure: None,
            effects: Vec::new(),
        }
    }

    /// Visible character count of the source panel.
    pub fn source_char_count(&self) -> usize {
        self.state.source_panel.text.chars().count()
    }

    /// Drain the effects queued by previous updates.
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Apply a message and every message it chains.
    pub fn apply(&mut self, msg: Msg) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = self.update(Some(m));
        }
    }

    fn click(&mut self, target: ClickTarget) -> Option<Msg> {
        // Any click closes the selectors it did not land in
        for side in [Side::Source, Side::Target] {
            if !target.is_inside(side) {
                self.state.selector_mut(side).close();
            }
        }

        let ClickTarget::Selector { side, region } = target else {
            return None;
        };

        match region {
            SelectorRegion::Header => {
                self.state.selector_mut(side).toggle(&self.catalog);
                None
            }
            SelectorRegion::Search => None,
            SelectorRegion::Entry(code) => {
                let Some(lang) = self.catalog.get(&code) else {
                    tracing::warn!(code = %code, "click on unknown language entry");
                    return None;
                };
                self.state.selector_mut(side).select(lang);
                tracing::debug!(?side, code = %code, "language selected");
                Some(Msg::Translate)
            }
        }
    }

    fn translate(&mut self) {
        // Every call supersedes the requests still in flight
        let id = self.state.requests.next_id();

        let text = &self.state.source_panel.text;
        if text.trim().is_empty() {
            self.state.result_panel.text.clear();
            self.last_failure = None;
            return;
        }

        self.effects.push(Effect::Translate(TranslationRequest {
            id,
            text: text.clone(),
            source: self.state.source.selected_code.clone(),
            target: self.state.target.selected_code.clone(),
        }));
    }

    fn translation_finished(&mut self, id: u64, outcome: Result<String, String>) {
        if !self.state.requests.is_current(id) {
            tracing::debug!(id, latest = self.state.requests.latest(), "discarding stale translation");
            return;
        }

        self.state.result_panel.text = match outcome {
            Ok(text) => {
                self.last_failure = None;
                text
            }
            Err(err) => {
                tracing::error!(id, error = %err, "translation failed");
                self.last_failure = Some(err);
                TRANSLATION_ERROR_MESSAGE.to_string()
            }
        };
    }

    fn swap(&mut self) {
        let AppState {
            source,
            target,
            source_panel,
            result_panel,
            ..
        } = &mut self.state;
        source.swap_selection(target);
        std::mem::swap(&mut source_panel.text, &mut result_panel.text);
    }

    fn import(&mut self, files: Vec<PathBuf>) {
        self.import_prompt = None;

        // Only the first file is considered
        let Some(path) = files.into_iter().next() else {
            return;
        };

        let declared = documents::declared_type(&path);
        match documents::kind_for_type(declared) {
            Some(kind) => {
                tracing::info!(path = %path.display(), declared, "importing document");
                self.state.upload.label = display_name(&path);
                self.state.upload.selected = Some(path.clone());
                self.effects.push(Effect::LoadDocument { path, kind });
            }
            None => {
                tracing::warn!(path = %path.display(), declared, "rejected document type");
                self.state.alert = Some(REJECTED_FILE_MESSAGE.to_string());
                self.state.upload.reset();
            }
        }
    }

    fn document_loaded(&mut self, path: PathBuf, outcome: Result<String, String>) -> Option<Msg> {
        match outcome {
            Ok(text) => {
                self.state.source_panel.text = text;
                Some(Msg::Translate)
            }
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "document read failed");
                self.state.alert = Some(format!("Could not read {}: {err}", display_name(&path)));
                self.state.upload.reset();
                None
            }
        }
    }

    fn speak(&mut self, side: Side) {
        let text = &self.state.panel(side).text;
        if text.is_empty() {
            return;
        }
        if !self.speech_available {
            self.state.alert = Some(SPEECH_UNAVAILABLE_MESSAGE.to_string());
            return;
        }
        self.effects.push(Effect::Speak {
            text: text.clone(),
            lang: self.state.selector(side).selected_code.clone(),
        });
    }
}

/// Keep at most `max` characters of `text`.
pub fn truncate_chars(mut text: String, max: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max) {
        text.truncate(byte_idx);
    }
    text
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }
            Msg::DismissAlert => {
                self.state.alert = None;
                None
            }

            Msg::Click(target) => self.click(target),
            Msg::SearchChanged { side, term } => {
                self.state.selector_mut(side).set_search_term(term);
                None
            }
            Msg::HighlightMoved { side, delta } => {
                self.state
                    .selector_mut(side)
                    .move_highlight(delta, &self.catalog);
                None
            }

            Msg::StartEditing => {
                self.editing_source = true;
                None
            }
            Msg::StopEditing => {
                self.editing_source = false;
                None
            }
            Msg::SourceChanged(text) => {
                self.state.source_panel.text = truncate_chars(text, self.max_source_chars);
                Some(Msg::Translate)
            }

            Msg::Translate => {
                self.translate();
                None
            }
            Msg::TranslationFinished { id, outcome } => {
                self.translation_finished(id, outcome);
                None
            }

            Msg::Swap => {
                self.swap();
                Some(Msg::Translate)
            }

            Msg::OpenImportPrompt => {
                self.import_prompt = Some(String::new());
                None
            }
            Msg::ImportPathChanged(path) => {
                self.import_prompt = Some(path);
                None
            }
            Msg::CloseImportPrompt => {
                self.import_prompt = None;
                None
            }
            Msg::ImportRequested(files) => {
                self.import(files);
                None
            }
            Msg::DocumentLoaded { path, outcome } => self.document_loaded(path, outcome),

            Msg::Export => {
                let text = &self.state.result_panel.text;
                if !text.is_empty() {
                    self.effects.push(Effect::Export {
                        text: text.clone(),
                        target_code: self.state.target.selected_code.clone(),
                    });
                }
                None
            }
            Msg::ExportFinished(result) => {
                match result {
                    Ok(Some(path)) => {
                        self.state.status = Some(format!("Saved {}", path.display()));
                    }
                    Ok(None) => {}
                    Err(err) => {
                        self.state.alert = Some(format!("Export failed: {err}"));
                    }
                }
                None
            }

            Msg::Speak(side) => {
                self.speak(side);
                None
            }
            Msg::SpeechFailed(err) => {
                self.state.alert = Some(err);
                None
            }

            Msg::ToggleAppearance => {
                self.state.dark_mode = !self.state.dark_mode;
                None
            }

            // Handled at the activity level
            Msg::FocusNext | Msg::FocusPrev => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo".to_string(), 2), "hé");
        assert_eq!(truncate_chars("abc".to_string(), 5), "abc");
        assert_eq!(truncate_chars("abc".to_string(), 3), "abc");
        assert_eq!(truncate_chars("abc".to_string(), 0), "");
    }
}
