//! Searchable language dropdown.

use crossterm_actions::{InputEvent, NavigationEvent, TuiEvent};
use ratatui::Frame;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult},
    event::{Key, KeyModifiers},
    props::{AttrValue, Attribute, Props},
};

use crate::catalog::LanguageDescriptor;
use crate::model::Msg;
use crate::selector::{ClickTarget, SelectorRegion, SelectorState, Side};
use crate::tui::activities::UserEvent;
use crate::tui::{AppAction, Theme, dispatcher, handle_global_app_events};

/// Height of the closed selector.
pub const SELECTOR_HEADER_HEIGHT: u16 = 3;

const PAGE: isize = 10;

/// Snapshot of one selector and its visible entries.
pub struct SelectorView {
    pub side: Side,
    pub state: SelectorState,
    pub entries: Vec<LanguageDescriptor>,
}

pub struct LanguageSelector {
    props: Props,
    view: SelectorView,
    theme: Theme,
}

impl LanguageSelector {
    pub fn new(view: SelectorView, theme: Theme) -> Self {
        Self {
            props: Props::default(),
            view,
            theme,
        }
    }

    fn click(&self, region: SelectorRegion) -> Msg {
        Msg::Click(ClickTarget::Selector {
            side: self.view.side,
            region,
        })
    }

    fn search_msg(&self, term: String) -> Msg {
        Msg::SearchChanged {
            side: self.view.side,
            term,
        }
    }

    fn highlight_msg(&self, delta: isize) -> Msg {
        Msg::HighlightMoved {
            side: self.view.side,
            delta,
        }
    }

    /// Raw key handling while the list is open.
    fn on_open_key(&self, code: Key, modifiers: KeyModifiers) -> Option<Msg> {
        match code {
            Key::Esc => Some(Msg::Click(ClickTarget::Elsewhere)),
            Key::Enter => self
                .view
                .entries
                .get(self.view.state.highlighted)
                .map(|lang| self.click(SelectorRegion::Entry(lang.code.clone()))),
            Key::Up => Some(self.highlight_msg(-1)),
            Key::Down => Some(self.highlight_msg(1)),
            Key::PageUp => Some(self.highlight_msg(-PAGE)),
            Key::PageDown => Some(self.highlight_msg(PAGE)),
            Key::Tab => Some(Msg::FocusNext),
            Key::BackTab => Some(Msg::FocusPrev),
            Key::Backspace => {
                let mut term = self.view.state.search_term.clone();
                term.pop();
                Some(self.search_msg(term))
            }
            Key::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
                let mut term = self.view.state.search_term.clone();
                term.push(c);
                Some(self.search_msg(term))
            }
            _ => None,
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let arrow = if self.view.state.is_open { "▴" } else { "▾" };
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.view.side.title()),
                self.theme.title(focused),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border(focused))
            .style(self.theme.base());

        let line = Line::from(vec![
            Span::styled(self.view.state.display_label.clone(), self.theme.base()),
            Span::styled(format!(" {arrow}"), self.theme.dim()),
        ]);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn draw_dropdown(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border(true))
            .style(self.theme.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [search, list_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

        let search_line = Line::from(vec![
            Span::styled("Search: ", self.theme.dim()),
            Span::styled(self.view.state.search_term.clone(), self.theme.base()),
            Span::styled("_", self.theme.base().fg(self.theme.accent)),
        ]);
        frame.render_widget(Paragraph::new(search_line), search);

        let items: Vec<ListItem> = self
            .view
            .entries
            .iter()
            .map(|lang| {
                let marker = if lang.code == self.view.state.selected_code {
                    "• "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::raw(lang.display_label()),
                    Span::styled(format!("  {}", lang.code), self.theme.dim()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .style(self.theme.base())
            .highlight_style(self.theme.highlight());
        let mut state = ListState::default().with_selected(Some(self.view.state.highlighted));
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

impl MockComponent for LanguageSelector {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self
            .props
            .get_or(Attribute::Focus, AttrValue::Flag(false))
            .unwrap_flag();

        let header_height = SELECTOR_HEADER_HEIGHT.min(area.height);
        let [header, dropdown] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(0),
        ])
        .areas(area);

        self.draw_header(frame, header, focused);
        if self.view.state.is_open && dropdown.height > 2 {
            self.draw_dropdown(frame, dropdown);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::String(self.view.state.selected_code.clone()))
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, UserEvent> for LanguageSelector {
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

        // The open list takes raw input for searching
        if self.view.state.is_open {
            return self.on_open_key(key_event.code, key_event.modifiers);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Input(InputEvent::Confirm))
            | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                Some(self.click(SelectorRegion::Header))
            }
            AppAction::Listen => Some(Msg::Speak(self.view.side)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use tuirealm::event::KeyEvent;

    use super::*;

    fn open_selector(term: &str, entries: Vec<LanguageDescriptor>) -> LanguageSelector {
        let english = LanguageDescriptor::new("en", "English", "English");
        let mut state = SelectorState::new(&english);
        state.is_open = true;
        state.search_term = term.to_string();
        let mut selector = LanguageSelector::new(
            SelectorView {
                side: Side::Source,
                state,
                entries,
            },
            Theme::DARK,
        );
        selector.attr(Attribute::Focus, AttrValue::Flag(true));
        selector
    }

    fn render(selector: &mut LanguageSelector) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| selector.view(frame, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(selector: &mut LanguageSelector, code: Key) -> Option<Msg> {
        selector.on(Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    #[test]
    fn empty_filter_renders_bare_list() {
        let mut selector = open_selector("zzzz", vec![]);

        let rendered = render(&mut selector);

        assert!(rendered.contains("Search: zzzz_"));
        assert!(rendered.contains("English (English)"));
        assert!(!rendered.contains("no matching"));
    }

    #[test]
    fn matching_entries_are_listed() {
        let mut selector = open_selector(
            "esp",
            vec![LanguageDescriptor::new("eo", "Esperanto", "Esperanto")],
        );

        let rendered = render(&mut selector);

        assert!(rendered.contains("Esperanto (Esperanto)"));
    }

    #[test]
    fn esc_clicks_elsewhere() {
        let mut selector = open_selector("", vec![]);

        assert_eq!(
            press(&mut selector, Key::Esc),
            Some(Msg::Click(ClickTarget::Elsewhere))
        );
    }

    #[test]
    fn enter_on_empty_list_selects_nothing() {
        let mut selector = open_selector("zzzz", vec![]);

        assert_eq!(press(&mut selector, Key::Enter), None);
    }

    #[test]
    fn typing_extends_search_term() {
        let mut selector = open_selector("fr", vec![]);

        assert_eq!(
            press(&mut selector, Key::Char('a')),
            Some(Msg::SearchChanged {
                side: Side::Source,
                term: "fra".to_string(),
            })
        );
    }
}
