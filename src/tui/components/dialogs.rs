//! Modal overlays: help, alert and the import prompt.
//!
//! Each overlay is a component that becomes the active one while it is shown,
//! so its keys arrive through the application like every other key.

use std::path::PathBuf;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::{Key, KeyEvent, KeyModifiers},
    props::{AttrValue, Attribute, Props},
};

use super::help::{popup_area, render_help};
use crate::model::Msg;
use crate::tui::Theme;
use crate::tui::activities::UserEvent;

fn render_alert(frame: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let area = popup_area(area, 50, 25);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Notice ")
        .borders(Borders::ALL)
        .border_style(theme.base().fg(theme.alert))
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [body, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let text = Paragraph::new(message)
        .style(theme.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, body);

    let hint = Paragraph::new(Span::styled(
        "Press Enter or Esc",
        theme.dim().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, footer);
}

fn render_import_prompt(frame: &mut Frame, area: Rect, theme: &Theme, path: &str) {
    let area = popup_area(area, 60, 20);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Open document (TXT, DOCX) ")
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .style(theme.base());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [input, _, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let line = Line::from(vec![
        Span::styled("Path: ", theme.dim()),
        Span::styled(path, theme.base()),
        Span::styled("_", theme.base().fg(theme.accent)),
    ]);
    frame.render_widget(Paragraph::new(line), input);

    let hint = Paragraph::new(Span::styled(
        "Enter to import, Esc to cancel",
        theme.dim().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hint, footer);
}

/// Key press delivered to a focused overlay.
fn focused_key(props: &Props, ev: Event<UserEvent>) -> Option<KeyEvent> {
    let focused = props
        .get_or(Attribute::Focus, AttrValue::Flag(false))
        .unwrap_flag();
    match ev {
        Event::Keyboard(key) if focused => Some(key),
        _ => None,
    }
}

// ============================================================================
// Help
// ============================================================================

pub struct HelpDialog {
    props: Props,
    theme: Theme,
}

impl HelpDialog {
    pub fn new(theme: Theme) -> Self {
        Self {
            props: Props::default(),
            theme,
        }
    }
}

impl MockComponent for HelpDialog {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        render_help(frame, area, &self.theme);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for HelpDialog {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match focused_key(&self.props, ev)?.code {
            Key::Esc | Key::Enter | Key::Char('q') | Key::Char('?') => Some(Msg::HideHelp),
            _ => None,
        }
    }
}

// ============================================================================
// Alert
// ============================================================================

pub struct AlertDialog {
    props: Props,
    message: String,
    theme: Theme,
}

impl AlertDialog {
    pub fn new(message: String, theme: Theme) -> Self {
        Self {
            props: Props::default(),
            message,
            theme,
        }
    }
}

impl MockComponent for AlertDialog {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        render_alert(frame, area, &self.theme, &self.message);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.message.clone()))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for AlertDialog {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        match focused_key(&self.props, ev)?.code {
            Key::Esc | Key::Enter | Key::Char(' ') => Some(Msg::DismissAlert),
            _ => None,
        }
    }
}

// ============================================================================
// Import prompt
// ============================================================================

pub struct ImportPrompt {
    props: Props,
    path: String,
    theme: Theme,
}

impl ImportPrompt {
    pub fn new(path: String, theme: Theme) -> Self {
        Self {
            props: Props::default(),
            path,
            theme,
        }
    }
}

impl MockComponent for ImportPrompt {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        render_import_prompt(frame, area, &self.theme, &self.path);
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.path.clone()))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for ImportPrompt {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let key = focused_key(&self.props, ev)?;
        match key.code {
            Key::Esc => Some(Msg::CloseImportPrompt),
            Key::Enter => {
                let path = self.path.trim();
                if path.is_empty() {
                    Some(Msg::CloseImportPrompt)
                } else {
                    Some(Msg::ImportRequested(vec![PathBuf::from(path)]))
                }
            }
            Key::Backspace => {
                self.path.pop()?;
                Some(Msg::ImportPathChanged(self.path.clone()))
            }
            Key::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.path.push(c);
                Some(Msg::ImportPathChanged(self.path.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focused<C: MockComponent>(mut component: C) -> C {
        component.attr(Attribute::Focus, AttrValue::Flag(true));
        component
    }

    fn key(code: Key) -> Event<UserEvent> {
        Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn prompt_collects_typed_path() {
        let mut prompt = focused(ImportPrompt::new(String::new(), Theme::DARK));

        let mut last = None;
        for c in "notes.txt".chars() {
            last = prompt.on(key(Key::Char(c)));
        }

        assert_eq!(last, Some(Msg::ImportPathChanged("notes.txt".to_string())));
        assert_eq!(
            prompt.on(key(Key::Enter)),
            Some(Msg::ImportRequested(vec![PathBuf::from("notes.txt")]))
        );
    }

    #[test]
    fn prompt_takes_letters_bound_to_global_actions() {
        let mut prompt = focused(ImportPrompt::new("a".to_string(), Theme::DARK));

        assert_eq!(
            prompt.on(key(Key::Char('q'))),
            Some(Msg::ImportPathChanged("aq".to_string()))
        );
    }

    #[test]
    fn prompt_backspace_on_empty_path_does_nothing() {
        let mut prompt = focused(ImportPrompt::new(String::new(), Theme::DARK));

        assert_eq!(prompt.on(key(Key::Backspace)), None);
    }

    #[test]
    fn prompt_with_blank_path_closes_on_enter() {
        let mut prompt = focused(ImportPrompt::new("  ".to_string(), Theme::DARK));

        assert_eq!(prompt.on(key(Key::Enter)), Some(Msg::CloseImportPrompt));
    }

    #[test]
    fn unfocused_prompt_ignores_keys() {
        let mut prompt = ImportPrompt::new(String::new(), Theme::DARK);

        assert_eq!(prompt.on(key(Key::Char('x'))), None);
    }

    #[test]
    fn alert_ignores_letters_until_dismissed() {
        let mut alert = focused(AlertDialog::new("Oops".to_string(), Theme::DARK));

        assert_eq!(alert.on(key(Key::Char('x'))), None);
        assert_eq!(alert.on(key(Key::Enter)), Some(Msg::DismissAlert));
    }

    #[test]
    fn help_closes_on_question_mark() {
        let mut help = focused(HelpDialog::new(Theme::DARK));

        assert_eq!(help.on(key(Key::Char('?'))), Some(Msg::HideHelp));
    }
}
