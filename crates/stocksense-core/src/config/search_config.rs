use serde::{Deserialize, Serialize};

use super::defaults;

/// Search subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result cap applied when a query specifies none.
    pub default_limit: usize,
    /// Hard upper bound on the result cap; requested limits clamp to
    /// [1, max_limit].
    pub max_limit: usize,
    /// Result cap for item autocomplete suggestions.
    pub suggest_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_SEARCH_LIMIT,
            max_limit: defaults::MAX_SEARCH_LIMIT,
            suggest_limit: defaults::DEFAULT_SUGGEST_LIMIT,
        }
    }
}
