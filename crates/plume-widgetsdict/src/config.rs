//! Form configuration
//!
//! User preferences read from JSON, YAML or TOML. Out-of-range values fall
//! back to their defaults instead of failing, and the flags the builder
//! actually uses are derived from the mode.

use std::path::Path;

use plume_widgetkey::Session;
use serde::{Deserialize, Serialize};

use crate::error::{DictError, Result};

/// Edition or consultation of a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Edit,
    Read,
}

impl From<String> for Mode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "read" => Self::Read,
            "edit" => Self::Edit,
            other => {
                tracing::debug!("Ignored mode {:?}, editing", other);
                Self::Edit
            }
        }
    }
}

/// Builder preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictConfig {
    pub mode: Mode,
    /// Translation mode, only meaningful while editing
    pub translation: bool,
    pub lang_list: Vec<String>,
    /// Main language, the first of `lang_list` when not listed
    pub language: Option<String>,
    pub read_hide_blank: bool,
    pub edit_hide_unlisted: bool,
    pub read_hide_unlisted: bool,
    pub edit_only_current_language: bool,
    pub read_only_current_language: bool,
    /// Longer labels go on their own row
    pub label_length_limit: usize,
    /// Longer literals get a multi-line widget
    pub value_length_limit: usize,
    /// Rows of a multi-line widget
    pub text_edit_row_span: usize,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Edit,
            translation: false,
            lang_list: vec!["fr".into(), "en".into()],
            language: None,
            read_hide_blank: true,
            edit_hide_unlisted: false,
            read_hide_unlisted: true,
            edit_only_current_language: false,
            read_only_current_language: true,
            label_length_limit: 25,
            value_length_limit: 65,
            text_edit_row_span: 6,
        }
    }
}

impl DictConfig {
    /// Read mode configuration
    #[must_use]
    pub fn read() -> Self {
        Self {
            mode: Mode::Read,
            ..Self::default()
        }
    }

    /// Builder form for the mode
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_translation(mut self, translation: bool) -> Self {
        self.translation = translation;
        self
    }

    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lang_list = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Parse from a JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.normalized())
    }

    /// Parse from a YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str::<Self>(yaml)?.normalized())
    }

    /// Parse from a TOML string
    ///
    /// # Errors
    /// Returns error if TOML is invalid
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str::<Self>(text)?.normalized())
    }

    /// Load a file, its extension naming the format
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed, or for an
    /// unknown extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            Some("yaml" | "yml") => Self::from_yaml(&text),
            Some("toml") => Self::from_toml(&text),
            _ => Err(DictError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Replace unusable values by their defaults
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        if self.lang_list.is_empty() {
            self.lang_list = defaults.lang_list;
        }
        if !self
            .language
            .as_ref()
            .is_some_and(|l| self.lang_list.contains(l))
        {
            self.language = self.lang_list.first().cloned();
        }
        if self.label_length_limit == 0 {
            self.label_length_limit = defaults.label_length_limit;
        }
        if self.value_length_limit == 0 {
            self.value_length_limit = defaults.value_length_limit;
        }
        if self.text_edit_row_span == 0 {
            self.text_edit_row_span = defaults.text_edit_row_span;
        }
        self
    }

    #[inline]
    #[must_use]
    pub fn edit(&self) -> bool {
        self.mode == Mode::Edit
    }

    /// Main language
    #[must_use]
    pub fn main_language(&self) -> &str {
        self.language
            .as_deref()
            .or_else(|| self.lang_list.first().map(String::as_str))
            .unwrap_or("fr")
    }

    /// Translation mode in effect
    #[inline]
    #[must_use]
    pub fn translation_enabled(&self) -> bool {
        self.translation && self.edit()
    }

    /// Fields without value are left out
    #[inline]
    #[must_use]
    pub fn hide_blank(&self) -> bool {
        self.read_hide_blank && !self.edit()
    }

    /// Fields missing from the template are ghosted
    #[inline]
    #[must_use]
    pub fn hide_unlisted(&self) -> bool {
        (self.read_hide_unlisted && !self.edit()) || (self.edit_hide_unlisted && self.edit())
    }

    /// Only the values in the main language are displayed
    #[inline]
    #[must_use]
    pub fn only_current_language(&self) -> bool {
        (self.read_only_current_language && !self.edit())
            || (self.edit_only_current_language && self.edit() && !self.translation_enabled())
    }

    /// Cap on the rows a single widget may take
    #[inline]
    #[must_use]
    pub fn max_rowspan(&self) -> usize {
        if self.edit() {
            30
        } else {
            1
        }
    }

    /// Tree session matching the configuration
    #[must_use]
    pub fn session(&self) -> Session {
        let mut session = Session::new(self.lang_list.iter().cloned())
            .with_source_buttons(self.edit())
            .with_language_buttons(self.translation_enabled());
        session.set_main_language(self.main_language());
        session
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = DictConfig::default();
        assert!(config.edit());
        assert!(!config.hide_blank());
        assert!(!config.hide_unlisted());
        assert!(!config.only_current_language());
        assert_eq!(config.main_language(), "fr");
        assert_eq!(config.max_rowspan(), 30);
    }

    #[test]
    fn read_mode_flags() {
        let config = DictConfig::read().with_translation(true);
        assert!(!config.translation_enabled());
        assert!(config.hide_blank());
        assert!(config.hide_unlisted());
        assert!(config.only_current_language());
        assert_eq!(config.max_rowspan(), 1);
    }

    #[test]
    fn translation_disables_language_filter() {
        let mut config = DictConfig::default();
        config.edit_only_current_language = true;
        assert!(config.only_current_language());
        let config = config.with_translation(true);
        assert!(!config.only_current_language());
        assert!(config.session().language_buttons());
    }

    #[test]
    fn unusable_values_fall_back() {
        let config = DictConfig::from_json(
            r#"{"mode": "preview", "lang_list": [], "language": "de", "label_length_limit": 0}"#,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Edit);
        assert_eq!(config.lang_list, ["fr", "en"]);
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.label_length_limit, 25);
    }

    #[test]
    fn yaml_and_toml() {
        let yaml = DictConfig::from_yaml("mode: read\nlang_list: [en, fr]\n").unwrap();
        assert_eq!(yaml.mode, Mode::Read);
        assert_eq!(yaml.main_language(), "en");

        let toml = DictConfig::from_toml("translation = true\nlanguage = \"en\"\n").unwrap();
        assert!(toml.translation_enabled());
        assert_eq!(toml.session().main_language().unwrap(), "en");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "text_edit_row_span: 4").unwrap();
        let config = DictConfig::from_path(file.path()).unwrap();
        assert_eq!(config.text_edit_row_span, 4);

        let other = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let err = DictConfig::from_path(other.path()).unwrap_err();
        assert!(matches!(err, DictError::UnsupportedFormat(_)));
    }
}
