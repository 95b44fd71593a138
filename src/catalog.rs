//! Language catalog shared by both selectors.
//!
//! The catalog is an ordered, immutable list of languages. A built-in list is
//! embedded in the binary; `--catalog` may replace it with a YAML or JSON file
//! holding the same `[{code, name, native}]` records.

use std::path::Path;

use serde::{Deserialize, Serialize};

const BUILTIN_CATALOG: &str = include_str!("../assets/languages.yaml");

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog contains no languages")]
    Empty,
}

/// A language offered by the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageDescriptor {
    /// Code sent to the translation endpoint and the speech backend.
    pub code: String,
    /// English name.
    pub name: String,
    /// Name of the language in the language itself.
    pub native: String,
}

impl LanguageDescriptor {
    pub fn new(code: &str, name: &str, native: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            native: native.to_string(),
        }
    }

    /// Label shown for the entry and for a selector holding it.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.native)
    }

    /// Case-insensitive substring match on name or native name.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.native.to_lowercase().contains(&term)
    }
}

/// Ordered list of languages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    languages: Vec<LanguageDescriptor>,
}

impl Catalog {
    /// Build a catalog from a list of languages.
    pub fn new(languages: Vec<LanguageDescriptor>) -> Result<Self, CatalogError> {
        if languages.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { languages })
    }

    /// The catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let languages: Vec<LanguageDescriptor> = serde_yaml::from_str(source)?;
        Self::new(languages)
    }

    pub fn from_json(source: &str) -> Result<Self, CatalogError> {
        let languages: Vec<LanguageDescriptor> = serde_json::from_str(source)?;
        Self::new(languages)
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Load `path` if given, otherwise the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    pub fn languages(&self) -> &[LanguageDescriptor] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn get(&self, code: &str) -> Option<&LanguageDescriptor> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Entries matching `term`, in catalog order. An empty term yields everything.
    pub fn filter(&self, term: &str) -> Vec<&LanguageDescriptor> {
        self.languages
            .iter()
            .filter(|lang| lang.matches(term))
            .collect()
    }

    /// Look up `code`, falling back to the first entry for unknown codes.
    pub fn resolve(&self, code: &str) -> &LanguageDescriptor {
        match self.get(code) {
            Some(lang) => lang,
            None => {
                tracing::warn!(code, "unknown language code, using first catalog entry");
                &self.languages[0]
            }
        }
    }
}

/// One line per language: padded code, then label.
pub fn format_listing(languages: &[&LanguageDescriptor]) -> String {
    languages
        .iter()
        .map(|lang| format!("{:<6} {}\n", lang.code, lang.display_label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() > 50);
        assert_eq!(catalog.get("en").unwrap().name, "English");
        assert_eq!(catalog.get("no").unwrap().name, "Norwegian");
    }

    #[test]
    fn builtin_codes_are_unique() {
        let catalog = Catalog::builtin().unwrap();
        let mut codes: Vec<&str> = catalog.languages().iter().map(|l| l.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), catalog.len());
    }

    #[test]
    fn display_label_combines_name_and_native() {
        let lang = LanguageDescriptor::new("es", "Spanish", "Español");
        assert_eq!(lang.display_label(), "Spanish (Español)");
    }

    #[test]
    fn matches_native_name_case_insensitively() {
        let lang = LanguageDescriptor::new("de", "German", "Deutsch");
        assert!(lang.matches("DEUT"));
        assert!(lang.matches("erm"));
        assert!(!lang.matches("french"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn resolve_falls_back_to_first_entry() {
        let catalog = Catalog::new(vec![
            LanguageDescriptor::new("en", "English", "English"),
            LanguageDescriptor::new("fr", "French", "Français"),
        ])
        .unwrap();
        assert_eq!(catalog.resolve("fr").code, "fr");
        assert_eq!(catalog.resolve("xx").code, "en");
    }

    #[test]
    fn listing_pads_codes() {
        let es = LanguageDescriptor::new("es", "Spanish", "Español");
        let zh = LanguageDescriptor::new("zh-CN", "Chinese (Simplified)", "中文 (简体)");
        assert_eq!(
            format_listing(&[&es, &zh]),
            "es     Spanish (Español)\nzh-CN  Chinese (Simplified) (中文 (简体))\n"
        );
    }
}
