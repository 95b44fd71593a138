//! Interactive TUI for translating text.
//!
//! Architecture: Activity-based with tui-realm for components. The activity
//! forwards component messages to a [`Session`], which owns the application
//! state and runs background work.

mod activities;
mod activity;
mod components;
mod theme;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, SelectionEvent, TuiEvent,
    TuiRealmDispatcher, defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::model::Msg;
use crate::runtime::Session;

pub use theme::Theme;

use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across components)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Swap languages and panel contents
    Swap,
    /// Import a document into the source panel
    Import,
    /// Save the translation to a file
    Export,
    /// Read the focused side aloud
    Listen,
    /// Switch between dark and light appearance
    ToggleAppearance,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    // Import all standard TuiEvent bindings wrapped in AppAction::Tui
    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::Swap)
            .key(keys::char('s'))
            .description("Swap languages")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::Import)
            .key(keys::char('o'))
            .description("Open document")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::Export)
            .key(keys::char('x'))
            .description("Export translation")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::Listen)
            .key(keys::char('l'))
            .description("Listen to text")
            .build(),
    );
    config.bind(
        ActionBinding::builder()
            .action(AppAction::ToggleAppearance)
            .key(keys::char('t'))
            .description("Toggle dark/light")
            .build(),
    );

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::Tui(TuiEvent::App(AppEvent::Refresh)) => Some(Msg::Translate),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)) => Some(Msg::FocusNext),
        AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)) => Some(Msg::FocusPrev),
        AppAction::Swap => Some(Msg::Swap),
        AppAction::Import => Some(Msg::OpenImportPrompt),
        AppAction::Export => Some(Msg::Export),
        AppAction::ToggleAppearance => Some(Msg::ToggleAppearance),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive TUI until the user quits.
pub fn run(session: Session) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut manager = ActivityManager::new(Context { session });
    let result = manager.run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
