// ABOUTME: Variable collections and their modes
// ABOUTME: Lookup helpers match by id first, then by case-insensitive name

use serde::{Deserialize, Serialize};

/// A named variant of a collection (e.g. "Light", "Dark")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: String,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: name.into(),
        }
    }
}

/// A group of variables sharing the same set of modes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableCollection {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub modes: Vec<Mode>,
}

impl VariableCollection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modes: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.modes.push(Mode::new(mode_id, name));
        self
    }

    /// Find a mode by id, falling back to a case-insensitive name match
    pub fn find_mode(&self, key: &str) -> Option<&Mode> {
        self.modes
            .iter()
            .find(|mode| mode.mode_id == key)
            .or_else(|| {
                self.modes
                    .iter()
                    .find(|mode| mode.name.eq_ignore_ascii_case(key.trim()))
            })
    }

    pub fn default_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }

    /// Whether `key` matches this collection's id or (case-insensitively) its name
    pub fn matches(&self, key: &str) -> bool {
        self.id == key || self.name.eq_ignore_ascii_case(key.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> VariableCollection {
        VariableCollection::new("VariableCollectionId:1:0", "Semantic")
            .with_mode("1:0", "Light")
            .with_mode("1:1", "Dark")
    }

    #[test]
    fn test_find_mode_by_id_or_name() {
        let collection = collection();
        assert_eq!(collection.find_mode("1:1").unwrap().name, "Dark");
        assert_eq!(collection.find_mode("light").unwrap().mode_id, "1:0");
        assert!(collection.find_mode("sepia").is_none());
        assert_eq!(collection.default_mode().unwrap().mode_id, "1:0");
    }

    #[test]
    fn test_matches_collection() {
        let collection = collection();
        assert!(collection.matches("VariableCollectionId:1:0"));
        assert!(collection.matches("semantic"));
        assert!(!collection.matches("primitives"));
    }

    #[test]
    fn test_decode_host_collection() {
        let json = r#"{"id": "c1", "name": "Tokens", "modes": [{"modeId": "m1", "name": "Light"}]}"#;
        let collection: VariableCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.modes, vec![Mode::new("m1", "Light")]);
    }
}
