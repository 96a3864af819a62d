//! Localization: an immutable translation catalog and the resolver that reads
//! it for the selected language.
//!
//! Lookups never fail. A key missing from the selected language falls back to
//! the default language, and a key missing there too comes back verbatim so
//! the shell shows a visible placeholder instead of an empty label.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use thiserror::Error;

const EN_TABLE: &str = include_str!("../locales/en.json");
const HI_TABLE: &str = include_str!("../locales/hi.json");
const TE_TABLE: &str = include_str!("../locales/te.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "te")]
    Telugu,
}

impl Language {
    pub const ALL: [Language; 3] = [Self::English, Self::Hindi, Self::Telugu];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Telugu => "te",
        }
    }

    /// Catalog key holding the language's display name.
    #[must_use]
    pub const fn name_key(self) -> &'static str {
        match self {
            Self::English => "settings.english",
            Self::Hindi => "settings.hindi",
            Self::Telugu => "settings.telugu",
        }
    }

    /// All supported scripts are written left to right.
    #[must_use]
    pub const fn text_direction(self) -> TextDirection {
        TextDirection::Ltr
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::English),
            "hi" => Ok(Self::Hindi),
            "te" => Ok(Self::Telugu),
            other => Err(LanguageError::Unsupported(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextDirection {
    #[default]
    Ltr,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("unsupported language: {0:?}")]
    Unsupported(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed {language} table: {source}")]
    Malformed {
        language: Language,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a successful language selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageChange {
    Changed { from: Language, to: Language },
    Unchanged,
}

/// (language, key) → text. Built once, read-only afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    /// The tables embedded in the binary. A table that fails to parse is
    /// logged and left empty so lookups still degrade to the fallback chain.
    pub fn builtin() -> Arc<Catalog> {
        static BUILTIN: OnceLock<Arc<Catalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                let mut catalog = Catalog::default();
                for (language, json) in [
                    (Language::English, EN_TABLE),
                    (Language::Hindi, HI_TABLE),
                    (Language::Telugu, TE_TABLE),
                ] {
                    if let Err(e) = catalog.load_json(language, json) {
                        tracing::error!(error = %e, "failed to load translation table");
                    }
                }
                Arc::new(catalog)
            })
            .clone()
    }

    pub fn from_tables<I, K, V>(tables: I) -> Self
    where
        I: IntoIterator<Item = (Language, Vec<(K, V)>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tables = tables
            .into_iter()
            .map(|(language, entries)| {
                let table = entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect();
                (language, table)
            })
            .collect();
        Self { tables }
    }

    pub fn load_json(&mut self, language: Language, json: &str) -> Result<usize, CatalogError> {
        let table: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|source| CatalogError::Malformed { language, source })?;
        let len = table.len();
        self.tables.insert(language, table);
        Ok(len)
    }

    /// Non-empty entry for `key` in `language`, if any.
    #[must_use]
    pub fn get(&self, language: Language, key: &str) -> Option<&str> {
        self.tables
            .get(&language)
            .and_then(|t| t.get(key))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn keys(&self, language: Language) -> impl Iterator<Item = &str> + '_ {
        self.tables
            .get(&language)
            .into_iter()
            .flat_map(|t| t.keys().map(String::as_str))
    }

    #[must_use]
    pub fn len(&self, language: Language) -> usize {
        self.tables.get(&language).map_or(0, HashMap::len)
    }
}

/// The selected language plus the catalog it resolves against.
#[derive(Debug, Clone)]
pub struct Localizer {
    language: Language,
    default_language: Language,
    catalog: Arc<Catalog>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Catalog::builtin(), Language::default())
    }
}

impl Localizer {
    pub fn new(catalog: Arc<Catalog>, default_language: Language) -> Self {
        Self {
            language: default_language,
            default_language,
            catalog,
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Selects `code` if it names a supported language. Anything else is
    /// rejected and the current language stays as it was.
    pub fn set_language(&mut self, code: &str) -> Result<LanguageChange, LanguageError> {
        let next = code.parse::<Language>()?;
        Ok(self.select(next))
    }

    pub fn select(&mut self, next: Language) -> LanguageChange {
        if next == self.language {
            return LanguageChange::Unchanged;
        }
        let from = std::mem::replace(&mut self.language, next);
        LanguageChange::Changed { from, to: next }
    }

    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog
            .get(self.language, key)
            .or_else(|| self.catalog.get(self.default_language, key))
            .unwrap_or(key)
    }

    /// Resolves `key`, then replaces each `{name}` placeholder with its
    /// argument. Placeholders without an argument are left as written.
    pub fn resolve_with(&self, key: &str, args: &[(String, String)]) -> String {
        let template = self.resolve(key);
        if args.is_empty() {
            return template.to_string();
        }
        let mut out = template.to_string();
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_tables([
            (
                Language::English,
                vec![
                    ("app.name", "Shield Safe Zone"),
                    ("menu.home", "Home"),
                    ("greeting", "Hello {name}"),
                    ("blank", "Blank"),
                ],
            ),
            (
                Language::Hindi,
                vec![("app.name", "शील्ड सेफ जोन"), ("blank", "")],
            ),
        ]))
    }

    #[test]
    fn language_codes_parse() {
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("te".parse::<Language>().unwrap(), Language::Telugu);
        assert!(" te ".parse::<Language>().is_err());
        assert!("HI".parse::<Language>().is_err());
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(LanguageError::Unsupported(code)) if code == "fr"
        ));
        assert!("english".parse::<Language>().is_err());
    }

    #[test]
    fn resolves_selected_language_first() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        l10n.select(Language::Hindi);
        assert_eq!(l10n.resolve("app.name"), "शील्ड सेफ जोन");
    }

    #[test]
    fn falls_back_to_default_language() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        l10n.select(Language::Hindi);
        assert_eq!(l10n.resolve("menu.home"), "Home");
    }

    #[test]
    fn empty_translation_counts_as_missing() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        l10n.select(Language::Hindi);
        assert_eq!(l10n.resolve("blank"), "Blank");
    }

    #[test]
    fn unknown_key_comes_back_verbatim() {
        let l10n = Localizer::new(sample_catalog(), Language::English);
        assert_eq!(l10n.resolve("no.such.key"), "no.such.key");
    }

    #[test]
    fn language_without_table_falls_back() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        l10n.select(Language::Telugu);
        assert_eq!(l10n.resolve("app.name"), "Shield Safe Zone");
    }

    #[test]
    fn invalid_language_keeps_previous() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        l10n.select(Language::Hindi);
        assert!(l10n.set_language("xx").is_err());
        assert_eq!(l10n.language(), Language::Hindi);
    }

    #[test]
    fn selecting_same_language_is_unchanged() {
        let mut l10n = Localizer::new(sample_catalog(), Language::English);
        assert_eq!(
            l10n.set_language("hi").unwrap(),
            LanguageChange::Changed {
                from: Language::English,
                to: Language::Hindi
            }
        );
        assert_eq!(l10n.set_language("hi").unwrap(), LanguageChange::Unchanged);
        assert_eq!(l10n.language(), Language::Hindi);
    }

    #[test]
    fn placeholders_are_substituted() {
        let l10n = Localizer::new(sample_catalog(), Language::English);
        let args = vec![("name".to_string(), "Priya".to_string())];
        assert_eq!(l10n.resolve_with("greeting", &args), "Hello Priya");
        assert_eq!(l10n.resolve_with("greeting", &[]), "Hello {name}");
    }

    #[test]
    fn malformed_table_is_reported() {
        let mut catalog = Catalog::default();
        let err = catalog.load_json(Language::Hindi, "{ not json").unwrap_err();
        assert!(err.to_string().contains("hi"));
        assert_eq!(catalog.len(Language::Hindi), 0);
    }

    #[test]
    fn builtin_english_table_is_a_superset() {
        let catalog = Catalog::builtin();
        assert!(catalog.len(Language::English) > 0);
        for language in [Language::Hindi, Language::Telugu] {
            for key in catalog.keys(language) {
                assert!(
                    catalog.get(Language::English, key).is_some(),
                    "{language} key {key} missing from English"
                );
            }
        }
    }

    #[test]
    fn builtin_hindi_app_name() {
        let mut l10n = Localizer::default();
        l10n.select(Language::Hindi);
        assert_eq!(l10n.resolve("app.name"), "शील्ड सेफ जोन");
    }

    proptest! {
        #[test]
        fn default_keys_never_resolve_empty(idx in 0usize..3) {
            let catalog = Catalog::builtin();
            let mut l10n = Localizer::new(catalog.clone(), Language::English);
            l10n.select(Language::ALL[idx]);
            for key in catalog.keys(Language::English) {
                prop_assert!(!l10n.resolve(key).is_empty());
            }
        }

        #[test]
        fn arbitrary_keys_resolve_to_something(key in "[a-z.]{1,24}") {
            let l10n = Localizer::default();
            prop_assert!(!l10n.resolve(&key).is_empty());
        }
    }
}
