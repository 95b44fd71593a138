//! Source and result text panels.

use crossterm_actions::{InputEvent, NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::{Key, KeyModifiers},
    props::{AttrValue, Attribute, Props},
};

use crate::model::Msg;
use crate::selector::Side;
use crate::tui::activities::UserEvent;
use crate::tui::{AppAction, Theme, dispatcher, handle_global_app_events};

/// Snapshot of one panel.
pub struct PanelView {
    pub side: Side,
    pub text: String,
    /// Characters used and allowed (source panel only)
    pub char_count: Option<(usize, usize)>,
    pub editing: bool,
    /// Lines scrolled past, carried over from the previous mount
    pub scroll: u16,
}

pub struct TextPanel {
    props: Props,
    view: PanelView,
    theme: Theme,
    scroll: u16,
}

impl TextPanel {
    pub fn new(view: PanelView, theme: Theme) -> Self {
        Self {
            props: Props::default(),
            scroll: view.scroll,
            view,
            theme,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self.view.side {
            Side::Source => "Press Enter to type, or o to open a document",
            Side::Target => "Translation",
        }
    }

    /// Raw key handling while the source text is being edited.
    fn on_edit_key(&mut self, code: Key, modifiers: KeyModifiers) -> Option<Msg> {
        match code {
            Key::Esc => Some(Msg::StopEditing),
            Key::Tab => Some(Msg::FocusNext),
            Key::BackTab => Some(Msg::FocusPrev),
            Key::Enter => {
                self.view.text.push('\n');
                Some(Msg::SourceChanged(self.view.text.clone()))
            }
            Key::Backspace => {
                self.view.text.pop()?;
                Some(Msg::SourceChanged(self.view.text.clone()))
            }
            Key::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.view.text.push(c);
                Some(Msg::SourceChanged(self.view.text.clone()))
            }
            _ => None,
        }
    }
}

impl MockComponent for TextPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let mut title = match self.view.side {
            Side::Source => " Text ".to_string(),
            Side::Target => " Translation ".to_string(),
        };
        if self.view.editing {
            title.push_str("[editing] ");
        }

        let mut block = Block::default()
            .title(Span::styled(title, self.theme.title(focused)))
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .style(self.theme.base());
        if let Some((used, max)) = self.view.char_count {
            block = block.title_bottom(
                Line::from(Span::styled(format!(" {used}/{max} "), self.theme.dim()))
                    .right_aligned(),
            );
        }

        let paragraph = if self.view.text.is_empty() && !self.view.editing {
            Paragraph::new(Span::styled(self.placeholder(), self.theme.dim()))
        } else {
            let mut text = self.view.text.clone();
            if self.view.editing {
                text.push('_');
            }
            Paragraph::new(text).style(self.theme.base())
        };

        frame.render_widget(
            paragraph
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            area,
        );
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::U16(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll = self.scroll.saturating_sub(1);
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                self.scroll = self.scroll.saturating_add(1);
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for TextPanel {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        if !focused {
            return None;
        }

        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        if self.view.editing {
            return self.on_edit_key(key_event.code, key_event.modifiers);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm))
                if self.view.side == Side::Source =>
            {
                Some(Msg::StartEditing)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                None
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                None
            }
            AppAction::Listen => Some(Msg::Speak(self.view.side)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use tuirealm::event::KeyEvent;

    use super::*;

    fn result_panel(scroll: u16) -> TextPanel {
        let mut panel = TextPanel::new(
            PanelView {
                side: Side::Target,
                text: "one\ntwo\nthree\nfour".to_string(),
                char_count: None,
                editing: false,
                scroll,
            },
            Theme::DARK,
        );
        panel.attr(Attribute::Focus, AttrValue::Flag(true));
        panel
    }

    #[test]
    fn remounted_panel_keeps_scroll_offset() {
        let panel = result_panel(3);

        assert_eq!(panel.state(), State::One(StateValue::U16(3)));
    }

    #[test]
    fn scrolling_continues_from_carried_offset() {
        let mut panel = result_panel(3);

        panel.on(Event::Keyboard(KeyEvent::new(Key::Down, KeyModifiers::NONE)));
        assert_eq!(panel.state(), State::One(StateValue::U16(4)));

        panel.on(Event::Keyboard(KeyEvent::new(Key::Up, KeyModifiers::NONE)));
        panel.on(Event::Keyboard(KeyEvent::new(Key::Up, KeyModifiers::NONE)));
        assert_eq!(panel.state(), State::One(StateValue::U16(2)));
    }
}
