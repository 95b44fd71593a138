//! Searchable language selector state.
//!
//! Each side (source, target) owns one [`SelectorState`]. The state machine is
//! two states, closed and open: clicking the header toggles, clicking outside
//! closes, selecting an entry closes, typing in the search field keeps it open.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, LanguageDescriptor};

/// Which of the two selectors/panels an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Source => "From",
            Self::Target => "To",
        }
    }
}

/// Part of a selector that received a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorRegion {
    /// The header showing the current selection.
    Header,
    /// The embedded search field.
    Search,
    /// A row of the filtered list, identified by language code.
    Entry(String),
}

/// Where a click landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickTarget {
    Selector { side: Side, region: SelectorRegion },
    Elsewhere,
}

impl ClickTarget {
    /// Whether the click landed inside the selector of `side`.
    pub fn is_inside(&self, side: Side) -> bool {
        matches!(self, Self::Selector { side: s, .. } if *s == side)
    }
}

/// State of one selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorState {
    pub selected_code: String,
    pub display_label: String,
    pub search_term: String,
    pub is_open: bool,
    /// Keyboard cursor within the filtered entries.
    pub highlighted: usize,
}

impl SelectorState {
    pub fn new(lang: &LanguageDescriptor) -> Self {
        Self {
            selected_code: lang.code.clone(),
            display_label: lang.display_label(),
            search_term: String::new(),
            is_open: false,
            highlighted: 0,
        }
    }

    /// Entries currently rendered in the dropdown.
    pub fn entries<'a>(&self, catalog: &'a Catalog) -> Vec<&'a LanguageDescriptor> {
        catalog.filter(&self.search_term)
    }

    /// Header click: open if closed, close if open.
    pub fn toggle(&mut self, catalog: &Catalog) {
        self.is_open = !self.is_open;
        if self.is_open {
            // Start the cursor on the current selection when it is visible
            self.highlighted = self
                .entries(catalog)
                .iter()
                .position(|lang| lang.code == self.selected_code)
                .unwrap_or(0);
        }
    }

    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Replace the search term. The selection and open state are untouched.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.highlighted = 0;
    }

    /// Make `lang` the current selection and close the dropdown.
    pub fn select(&mut self, lang: &LanguageDescriptor) {
        self.selected_code = lang.code.clone();
        self.display_label = lang.display_label();
        self.is_open = false;
    }

    /// Move the keyboard cursor, clamped to the filtered list.
    pub fn move_highlight(&mut self, delta: isize, catalog: &Catalog) {
        let count = self.entries(catalog).len();
        if count == 0 {
            self.highlighted = 0;
            return;
        }
        let current = self.highlighted.min(count - 1) as isize;
        self.highlighted = (current + delta).clamp(0, count as isize - 1) as usize;
    }

    /// Entry under the keyboard cursor, if the filtered list is not empty.
    pub fn highlighted_entry<'a>(&self, catalog: &'a Catalog) -> Option<&'a LanguageDescriptor> {
        self.entries(catalog).get(self.highlighted).copied()
    }

    /// Exchange the selected language (code and label) with `other`.
    pub fn swap_selection(&mut self, other: &mut SelectorState) {
        std::mem::swap(&mut self.selected_code, &mut other.selected_code);
        std::mem::swap(&mut self.display_label, &mut other.display_label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            LanguageDescriptor::new("en", "English", "English"),
            LanguageDescriptor::new("es", "Spanish", "Español"),
            LanguageDescriptor::new("fr", "French", "Français"),
        ])
        .unwrap()
    }

    #[test]
    fn toggle_opens_on_current_selection() {
        let catalog = catalog();
        let mut state = SelectorState::new(catalog.get("fr").unwrap());
        state.toggle(&catalog);
        assert!(state.is_open);
        assert_eq!(state.highlighted, 2);
        state.toggle(&catalog);
        assert!(!state.is_open);
    }

    #[test]
    fn search_keeps_selection_and_open_state() {
        let catalog = catalog();
        let mut state = SelectorState::new(catalog.get("en").unwrap());
        state.toggle(&catalog);
        state.set_search_term("span");
        assert!(state.is_open);
        assert_eq!(state.selected_code, "en");
        let codes: Vec<&str> = state.entries(&catalog).iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, ["es"]);
    }

    #[test]
    fn highlight_is_clamped() {
        let catalog = catalog();
        let mut state = SelectorState::new(catalog.get("en").unwrap());
        state.move_highlight(10, &catalog);
        assert_eq!(state.highlighted, 2);
        state.move_highlight(-10, &catalog);
        assert_eq!(state.highlighted, 0);

        state.set_search_term("zzz");
        state.move_highlight(1, &catalog);
        assert_eq!(state.highlighted, 0);
        assert!(state.highlighted_entry(&catalog).is_none());
    }

    #[test]
    fn click_target_inside() {
        let click = ClickTarget::Selector {
            side: Side::Source,
            region: SelectorRegion::Search,
        };
        assert!(click.is_inside(Side::Source));
        assert!(!click.is_inside(Side::Target));
        assert!(!ClickTarget::Elsewhere.is_inside(Side::Source));
    }
}
