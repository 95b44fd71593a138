//! Snapshot tests for listings and serialized application state.
//!
//! These detect regressions in user-visible output.

use std::path::PathBuf;

use babelterm::catalog::{Catalog, format_listing};
use babelterm::config::Settings;
use babelterm::model::{Model, Msg};

fn model() -> Model {
    Model::new(Catalog::builtin().unwrap(), &Settings::default(), true)
}

fn translated(model: &mut Model, text: &str, result: &str) {
    model.apply(Msg::SourceChanged(text.to_string()));
    model.apply(Msg::TranslationFinished {
        id: model.state.requests.latest(),
        outcome: Ok(result.to_string()),
    });
    model.take_effects();
}

#[test]
fn test_snapshot_search_listing() {
    let catalog = Catalog::builtin().unwrap();
    let listing = format_listing(&catalog.filter("chin"));
    insta::assert_snapshot!("chinese_listing", listing);
}

#[test]
fn test_snapshot_state_after_translation() {
    let mut model = model();
    translated(&mut model, "hello", "hola");

    let state = serde_json::to_string_pretty(&model.state).unwrap();
    insta::assert_snapshot!("state_after_translation", state);
}

#[test]
fn test_snapshot_state_after_swap_and_rejected_import() {
    let mut model = model();
    translated(&mut model, "hello", "hola");
    model.apply(Msg::Swap);
    model.apply(Msg::ImportRequested(vec![PathBuf::from("scan.pdf")]));

    let state = serde_json::to_string_pretty(&model.state).unwrap();
    insta::assert_snapshot!("state_after_swap_and_rejected_import", state);
}
