//! Terminal translator with searchable language selectors, document import,
//! export and text-to-speech.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod documents;
pub mod export;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod selector;
pub mod speech;
pub mod translate;
pub mod tui;
