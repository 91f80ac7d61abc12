use serde::{Deserialize, Serialize};

/// A product that can be observed at locations (e.g. a drug).
///
/// `name` is the canonical identifier and unique case-insensitively.
/// `code` is an optional alternate code (an NDC in the pharmacy domain) and
/// `synonyms` hold alternate names; both participate in identifier resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// UUID v4 identifier.
    pub id: String,
    /// Canonical name, unique case-insensitively.
    pub name: String,
    /// Optional alternate code.
    pub code: Option<String>,
    /// Alternate names resolving to this item.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl Item {
    /// Create a new item with a generated id and no code or synonyms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            code: None,
            synonyms: Vec::new(),
        }
    }

    /// Builder-style alternate code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Builder-style synonym list.
    pub fn with_synonyms(mut self, synonyms: Vec<String>) -> Self {
        self.synonyms = synonyms;
        self
    }
}
