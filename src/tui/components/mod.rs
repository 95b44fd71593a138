//! TUI components using tui-realm.

pub mod dialogs;
pub mod help;
pub mod panel;
pub mod selector;

pub use dialogs::{AlertDialog, HelpDialog, ImportPrompt};
pub use help::{MAIN_FOOTER_ACTIONS, format_footer};
pub use panel::{PanelView, TextPanel};
pub use selector::{LanguageSelector, SELECTOR_HEADER_HEIGHT, SelectorView};
