//! Main activity - the translator screen.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tuirealm::{Application, EventListenerCfg, PollStrategy, State, StateValue};

use crate::model::{Model, Msg};
use crate::runtime::Session;
use crate::selector::{ClickTarget, Side};
use crate::tui::Theme;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    AlertDialog, HelpDialog, ImportPrompt, LanguageSelector, MAIN_FOOTER_ACTIONS, PanelView,
    SELECTOR_HEADER_HEIGHT, SelectorView, TextPanel, format_footer,
};

// ============================================================================
// Component identifiers (scoped to MainActivity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    SourceSelector,
    TargetSelector,
    SourcePanel,
    ResultPanel,
    ImportPrompt,
    Alert,
    Help,
}

// ============================================================================
// User events (required by tui-realm, currently unused)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {}

// ============================================================================
// Focus management (scoped to MainActivity)
// ============================================================================

/// All focusable component IDs in order.
const ALL_FOCUS_IDS: &[Id] = &[
    Id::SourceSelector,
    Id::TargetSelector,
    Id::SourcePanel,
    Id::ResultPanel,
];

/// Manages focus state for Tab navigation.
pub struct FocusManager {
    current_idx: usize,
}

impl FocusManager {
    pub fn new() -> Self {
        // Start on the source panel so typing can begin right away
        Self { current_idx: 2 }
    }

    pub fn current_focus(&self) -> Id {
        ALL_FOCUS_IDS
            .get(self.current_idx)
            .copied()
            .unwrap_or(Id::SourcePanel)
    }

    pub fn focus_next(&mut self) -> Id {
        self.current_idx = (self.current_idx + 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }

    pub fn focus_prev(&mut self) -> Id {
        self.current_idx = (self.current_idx + ALL_FOCUS_IDS.len() - 1) % ALL_FOCUS_IDS.len();
        self.current_focus()
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MainActivity
// ============================================================================

#[derive(Default)]
pub struct MainActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    focus: FocusManager,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
}

impl MainActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn selector_view(model: &Model, side: Side) -> SelectorView {
        let state = model.state.selector(side).clone();
        let entries = state
            .entries(&model.catalog)
            .into_iter()
            .cloned()
            .collect();
        SelectorView {
            side,
            state,
            entries,
        }
    }

    fn panel_view(model: &Model, side: Side, scroll: u16) -> PanelView {
        match side {
            Side::Source => PanelView {
                side,
                text: model.state.source_panel.text.clone(),
                char_count: Some((model.source_char_count(), model.max_source_chars)),
                editing: model.editing_source,
                scroll,
            },
            Side::Target => PanelView {
                side,
                text: model.state.result_panel.text.clone(),
                char_count: None,
                editing: false,
                scroll,
            },
        }
    }

    /// Scroll offset of a mounted panel, kept across remounts.
    fn panel_scroll(app: &Application<Id, Msg, UserEvent>, id: &Id) -> u16 {
        match app.state(id) {
            Ok(State::One(StateValue::U16(scroll))) => scroll,
            _ => 0,
        }
    }

    /// The overlay that owns keyboard input, topmost first.
    fn overlay(model: &Model) -> Option<Id> {
        if model.show_help {
            Some(Id::Help)
        } else if model.state.alert.is_some() {
            Some(Id::Alert)
        } else if model.import_prompt.is_some() {
            Some(Id::ImportPrompt)
        } else {
            None
        }
    }

    fn active_id(model: &Model, focus: &FocusManager) -> Id {
        Self::overlay(model).unwrap_or_else(|| focus.current_focus())
    }

    /// Remount every component from the current model.
    fn sync_components(app: &mut Application<Id, Msg, UserEvent>, model: &Model) {
        let theme = Theme::for_mode(model.state.dark_mode);

        for (id, side) in [
            (Id::SourceSelector, Side::Source),
            (Id::TargetSelector, Side::Target),
        ] {
            let _ = app.umount(&id);
            let selector = LanguageSelector::new(Self::selector_view(model, side), theme);
            if let Err(e) = app.mount(id, Box::new(selector), vec![]) {
                tracing::error!("Failed to mount {:?}: {}", id, e);
            }
        }

        for (id, side) in [(Id::SourcePanel, Side::Source), (Id::ResultPanel, Side::Target)] {
            let scroll = Self::panel_scroll(app, &id);
            let _ = app.umount(&id);
            let panel = TextPanel::new(Self::panel_view(model, side, scroll), theme);
            if let Err(e) = app.mount(id, Box::new(panel), vec![]) {
                tracing::error!("Failed to mount {:?}: {}", id, e);
            }
        }

        // Overlays exist only while shown
        for id in [Id::ImportPrompt, Id::Alert, Id::Help] {
            let _ = app.umount(&id);
        }
        if let Some(path) = &model.import_prompt {
            let prompt = ImportPrompt::new(path.clone(), theme);
            if let Err(e) = app.mount(Id::ImportPrompt, Box::new(prompt), vec![]) {
                tracing::error!("Failed to mount import prompt: {}", e);
            }
        }
        if let Some(message) = &model.state.alert {
            let alert = AlertDialog::new(message.clone(), theme);
            if let Err(e) = app.mount(Id::Alert, Box::new(alert), vec![]) {
                tracing::error!("Failed to mount alert: {}", e);
            }
        }
        if model.show_help {
            if let Err(e) = app.mount(Id::Help, Box::new(HelpDialog::new(theme)), vec![]) {
                tracing::error!("Failed to mount help: {}", e);
            }
        }
    }

    fn change_focus(focus: &mut FocusManager, session: &mut Session, forward: bool) -> Id {
        // Leaving a component behaves like clicking elsewhere
        session.dispatch(Msg::Click(ClickTarget::Elsewhere));
        if session.model.editing_source {
            session.dispatch(Msg::StopEditing);
        }
        if forward {
            focus.focus_next()
        } else {
            focus.focus_prev()
        }
    }

    fn draw(frame: &mut Frame, app: &mut Application<Id, Msg, UserEvent>, model: &Model) {
        let theme = Theme::for_mode(model.state.dark_mode);
        let area = frame.area();
        frame.render_widget(Block::default().style(theme.base()), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),                     // Title
                Constraint::Length(SELECTOR_HEADER_HEIGHT), // Selectors
                Constraint::Min(6),                        // Panels
                Constraint::Length(1),                     // Status
            ])
            .split(area);

        // Title bar
        let mode = if model.state.dark_mode { "dark" } else { "light" };
        let title = Line::from(vec![
            Span::styled(" babelterm ", theme.base().add_modifier(Modifier::BOLD)),
            Span::styled(format!("- {} ", model.state.upload.label), theme.dim()),
            Span::styled(format!("[{mode}]"), theme.dim()),
        ]);
        frame.render_widget(Paragraph::new(title), rows[0]);

        let selector_cols = Self::columns(rows[1]);
        let panel_cols = Self::columns(rows[2]);

        app.view(&Id::SourcePanel, frame, panel_cols[0]);
        app.view(&Id::ResultPanel, frame, panel_cols[2]);

        let swap = Paragraph::new(Span::styled("\n ⇄", theme.dim()));
        frame.render_widget(swap, selector_cols[1]);

        // Open lists drop down over the panels
        for (id, side, col) in [
            (Id::SourceSelector, Side::Source, 0),
            (Id::TargetSelector, Side::Target, 2),
        ] {
            let header = selector_cols[col];
            let area = if model.state.selector(side).is_open {
                Rect {
                    height: header.height + rows[2].height,
                    ..header
                }
            } else {
                header
            };
            app.view(&id, frame, area);
        }

        // Status bar
        let status = model
            .state
            .status
            .clone()
            .unwrap_or_else(|| format_footer(MAIN_FOOTER_ACTIONS, &[("theme", "t")]));
        frame.render_widget(Paragraph::new(status).style(theme.dim()), rows[3]);

        for id in [Id::ImportPrompt, Id::Alert, Id::Help] {
            if app.mounted(&id) {
                app.view(&id, frame, area);
            }
        }
    }

    fn columns(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(4),
                Constraint::Fill(1),
            ])
            .split(area)
    }
}

impl Activity for MainActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        Self::sync_components(&mut app, &context.session.model);
        if let Err(e) = app.active(&Self::active_id(&context.session.model, &self.focus)) {
            tracing::error!("Failed to focus component: {}", e);
        }

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let Some(app) = self.app.as_mut() else {
            return Ok(());
        };
        let Some(context) = self.context.as_mut() else {
            return Ok(());
        };
        let session = &mut context.session;

        // Background completions (translations, documents)
        let mut needs_sync = session.pump();

        terminal.draw(|frame| Self::draw(frame, app, &session.model))?;

        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                match msg {
                    Msg::Quit => {
                        self.exit_reason = Some(ExitReason::Quit);
                        return Ok(());
                    }
                    Msg::FocusNext | Msg::FocusPrev => {
                        let forward = matches!(msg, Msg::FocusNext);
                        let next = Self::change_focus(&mut self.focus, session, forward);
                        tracing::trace!(?next, "focus changed");
                    }
                    msg => session.dispatch(msg),
                }
                needs_sync = true;
            }
        }

        if needs_sync {
            Self::sync_components(app, &session.model);
            let _ = app.active(&Self::active_id(&session.model, &self.focus));
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
