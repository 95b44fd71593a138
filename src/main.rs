//! CLI entry point for babelterm.

use std::sync::Arc;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, bail};

use babelterm::catalog::{Catalog, format_listing};
use babelterm::cli::Cli;
use babelterm::config::Settings;
use babelterm::logging::init_logging;
use babelterm::model::{Model, Msg};
use babelterm::runtime::{Runtime, Session};
use babelterm::speech::CommandSpeech;
use babelterm::translate::GoogleTranslator;
use babelterm::tui;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "babelterm", &mut std::io::stdout());
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), Some(&cli.log_level));

    let settings = Settings::load(&cli).wrap_err("Failed to load configuration")?;
    tracing::debug!(?settings, "configuration loaded");

    if let Some(path) = &cli.save_config {
        settings
            .save(path)
            .wrap_err_with(|| format!("Failed to save configuration to {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
    }

    let catalog = Catalog::load_or_builtin(settings.catalog.as_deref())
        .wrap_err("Failed to load language catalog")?;

    if cli.list_languages {
        let term = cli.search.as_deref().unwrap_or("");
        print!("{}", format_listing(&catalog.filter(term)));
        return Ok(());
    }

    let translator = Arc::new(GoogleTranslator::new(settings.endpoint.clone()));
    let speech = CommandSpeech::new(&settings.speech);
    let runtime = Runtime::new(translator, Box::new(speech), settings.export_dir.clone());
    let model = Model::new(catalog, &settings, runtime.speech_available());
    let session = Session::new(model, runtime);

    if cli.is_headless() {
        return translate_once(session, &cli);
    }

    tui::run(session)
}

/// Translate `--text` or `--input` once, print the result and optionally export it.
fn translate_once(mut session: Session, cli: &Cli) -> Result<()> {
    let msg = match (&cli.text, &cli.input) {
        (Some(text), _) => Msg::SourceChanged(text.clone()),
        (None, Some(path)) => Msg::ImportRequested(vec![path.clone()]),
        (None, None) => bail!("Nothing to translate"),
    };

    session.dispatch(msg);
    session.settle();

    let model = &session.model;
    if let Some(alert) = &model.state.alert {
        bail!("{alert}");
    }
    if let Some(err) = &model.last_failure {
        bail!("{}: {err}", model.state.result_panel.text);
    }

    let result = model.state.result_panel.text.clone();
    if !result.is_empty() {
        println!("{result}");
    }

    if cli.export {
        session.dispatch(Msg::Export);
        session.settle();

        let state = &session.model.state;
        if let Some(alert) = &state.alert {
            bail!("{alert}");
        }
        if let Some(status) = &state.status {
            eprintln!("{status}");
        }
    }

    Ok(())
}
