//! Model dictionary management
//!
//! The dictionary is a JSON index file listing the models a host knows
//! about. Entries are looked up by name; the matched entry carries the
//! config URL and the model's emotion map.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::model::emotion::EmotionMap;

/// One model dictionary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Display name, also the lookup key
    pub name: String,
    /// URL of the model configuration document
    pub url: String,
    /// Keyword-to-expression-index map; keys lowercased on load
    #[serde(default)]
    pub emotion_map: EmotionMap,
}

/// In-memory model dictionary
#[derive(Debug, Clone)]
pub struct ModelDict {
    entries: Vec<ModelInfo>,
}

impl ModelDict {
    /// Load a dictionary from a JSON file
    ///
    /// Missing files and malformed JSON are hard errors. Content that is
    /// not valid UTF-8 is decoded lossily with a warning.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            log::error!("model dictionary not found at {}", path.display());
            Error::from(e)
        })?;

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                log::warn!(
                    "model dictionary at {} is not valid UTF-8, decoding lossily",
                    path.display()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };

        let entries: Vec<ModelInfo> = serde_json::from_str(&content).map_err(|e| {
            log::error!("failed to parse model dictionary at {}: {e}", path.display());
            Error::from(e)
        })?;

        log::info!("model dictionary loaded: {} entries", entries.len());
        Ok(Self { entries })
    }

    /// Build a dictionary from entries already in memory
    pub fn from_entries(entries: Vec<ModelInfo>) -> Self {
        Self { entries }
    }

    /// Find the entry for `name`
    pub fn lookup(&self, name: &str) -> Result<&ModelInfo> {
        self.entries.iter().find(|m| m.name == name).ok_or_else(|| {
            log::error!("unable to find '{name}' in model dictionary");
            Error::ModelNotFound(name.to_string())
        })
    }

    /// All entries in file order
    pub fn entries(&self) -> &[ModelInfo] {
        &self.entries
    }

    /// All model names in file order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {
            "name": "chino",
            "url": "http://localhost:9000/chino/model3.json",
            "emotionMap": {"neutral": 0, "Joy": 3, "anger": 2}
        },
        {
            "name": "bare",
            "url": "http://localhost:9000/bare/model3.json"
        }
    ]"#;

    fn write_dict(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp dict");
        file.write_all(content.as_bytes()).expect("write temp dict");
        file
    }

    #[test]
    fn test_load_and_lookup() {
        let file = write_dict(SAMPLE);
        let dict = ModelDict::load(file.path()).expect("load dictionary");

        assert_eq!(dict.entries().len(), 2);
        assert_eq!(dict.names().collect::<Vec<_>>(), ["chino", "bare"]);

        let info = dict.lookup("chino").expect("lookup chino");
        assert_eq!(info.url, "http://localhost:9000/chino/model3.json");
        assert_eq!(info.emotion_map.get("joy"), Some(3));
    }

    #[test]
    fn test_missing_emotion_map_defaults_empty() {
        let file = write_dict(SAMPLE);
        let dict = ModelDict::load(file.path()).expect("load dictionary");
        assert!(dict.lookup("bare").expect("lookup bare").emotion_map.is_empty());
    }

    #[test]
    fn test_lookup_unknown_name() {
        let file = write_dict(SAMPLE);
        let dict = ModelDict::load(file.path()).expect("load dictionary");

        let err = dict.lookup("mocha").expect_err("lookup should fail");
        assert!(matches!(err, Error::ModelNotFound(ref name) if name == "mocha"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ModelDict::load(Path::new("/nonexistent/model_dict.json"))
            .expect_err("load should fail");
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_dict("{ not json");
        let err = ModelDict::load(file.path()).expect_err("load should fail");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_invalid_utf8_is_lossy() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp dict");
        file.write_all(b"[{\"name\": \"a\xFFb\", \"url\": \"http://x/m.json\"}]")
            .expect("write temp dict");

        let dict = ModelDict::load(file.path()).expect("load dictionary");
        assert_eq!(dict.entries().len(), 1);
        assert!(dict.entries()[0].name.contains('\u{FFFD}'));
    }
}
