use std::path::PathBuf;

use babelterm::cli::Cli;
use babelterm::config::{ConfigError, DEFAULT_MAX_SOURCE_CHARS, Settings};
use babelterm::translate::{DEFAULT_CLIENT, DEFAULT_ENDPOINT};
use figment::Jail;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(settings.source_lang, "en");
    assert_eq!(settings.target_lang, "es");
    assert!(settings.dark_mode);
    assert_eq!(settings.max_source_chars, DEFAULT_MAX_SOURCE_CHARS);
    assert_eq!(settings.export_dir, PathBuf::from("."));
    assert!(settings.catalog.is_none());
    assert_eq!(settings.endpoint.url, DEFAULT_ENDPOINT);
    assert_eq!(settings.endpoint.client, DEFAULT_CLIENT);
    assert_eq!(settings.speech.program, "espeak-ng");
}

#[test]
fn test_parse_partial_toml() {
    let settings: Settings = toml::from_str(
        r#"
target_lang = "ja"

[speech]
program = "say"
"#,
    )
    .unwrap();

    assert_eq!(settings.target_lang, "ja");
    assert_eq!(settings.source_lang, "en");
    assert_eq!(settings.speech.program, "say");
    assert_eq!(settings.endpoint.url, DEFAULT_ENDPOINT);
}

#[test]
fn test_load_without_any_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let settings = Settings::load(&Cli::default()).map_err(|e| e.to_string())?;
        assert_eq!(settings, Settings::default());
        Ok(())
    });
}

#[test]
fn test_layers_apply_in_order() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "babelterm.toml",
            r#"
source_lang = "fr"
target_lang = "de"
dark_mode = false
max_source_chars = 200

[endpoint]
client = "dict-chrome-ex"
"#,
        )?;
        jail.set_env("BABELTERM_TARGET_LANG", "it");
        jail.set_env("BABELTERM_ENDPOINT__URL", "http://localhost:9000/t");

        let cli = Cli {
            from: Some("pt".to_string()),
            dark: true,
            ..Cli::default()
        };
        let settings = Settings::load(&cli).map_err(|e| e.to_string())?;

        // CLI beats file
        assert_eq!(settings.source_lang, "pt");
        assert!(settings.dark_mode);
        // Environment beats file
        assert_eq!(settings.target_lang, "it");
        assert_eq!(settings.endpoint.url, "http://localhost:9000/t");
        // File beats defaults
        assert_eq!(settings.max_source_chars, 200);
        assert_eq!(settings.endpoint.client, "dict-chrome-ex");
        Ok(())
    });
}

#[test]
fn test_endpoint_flag_keeps_other_endpoint_settings() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "babelterm.toml",
            r#"
[endpoint]
client = "custom"
user_agent = "test-agent"
"#,
        )?;

        let cli = Cli {
            endpoint: Some("http://127.0.0.1:1/x".to_string()),
            light: true,
            ..Cli::default()
        };
        let settings = Settings::load(&cli).map_err(|e| e.to_string())?;

        assert_eq!(settings.endpoint.url, "http://127.0.0.1:1/x");
        assert_eq!(settings.endpoint.client, "custom");
        assert_eq!(settings.endpoint.user_agent, "test-agent");
        assert!(!settings.dark_mode);
        Ok(())
    });
}

#[test]
fn test_explicit_config_must_exist() {
    Jail::expect_with(|_jail| {
        let cli = Cli {
            config: Some(PathBuf::from("nowhere.toml")),
            ..Cli::default()
        };
        let err = Settings::load(&cli).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)), "{err:?}");
        Ok(())
    });
}

#[test]
fn test_invalid_value_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("babelterm.toml", "max_source_chars = \"lots\"")?;
        let err = Settings::load(&Cli::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "{err:?}");
        Ok(())
    });
}

#[test]
fn test_saved_config_loads_back() {
    Jail::expect_with(|jail| {
        let saved = Settings {
            target_lang: "ko".to_string(),
            dark_mode: false,
            export_dir: PathBuf::from("exports"),
            catalog: Some(PathBuf::from("langs.yaml")),
            ..Settings::default()
        };
        let path = jail.directory().join("saved.toml");
        saved.save(&path).map_err(|e| e.to_string())?;

        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        let loaded = Settings::load(&cli).map_err(|e| e.to_string())?;
        assert_eq!(loaded, saved);
        Ok(())
    });
}
