//! Per-country index configuration record.

use serde::Serialize;

/// Prefix of every per-country media index.
pub const INDEX_PREFIX: &str = "media";

pub const FILTERABLE_ATTRIBUTES: [&str; 2] = ["genres", "provider_names"];

/// Order matters: earlier attributes weigh more in relevance.
pub const SEARCHABLE_ATTRIBUTES: [&str; 2] = ["original_title", "title"];

pub const SORTABLE_ATTRIBUTES: [&str; 1] = ["popularity"];

/// `sort` sits right after `words`, ahead of the engine default position,
/// so a requested sort order beats typo and proximity scoring.
pub const RANKING_RULES: [&str; 6] = ["words", "sort", "typo", "proximity", "attribute", "exactness"];

/// Index name for a country code, e.g. `media_DK`.
pub fn index_name(country_code: &str) -> String {
    format!("{}_{}", INDEX_PREFIX, country_code.trim())
}

/// The settings applied to one country's media index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSettings {
    pub index: String,
    pub filterable_attributes: Vec<String>,
    pub searchable_attributes: Vec<String>,
    pub sortable_attributes: Vec<String>,
    pub ranking_rules: Vec<String>,
}

impl IndexSettings {
    pub fn for_country(country_code: &str) -> Self {
        Self {
            index: index_name(country_code),
            filterable_attributes: to_owned(&FILTERABLE_ATTRIBUTES),
            searchable_attributes: to_owned(&SEARCHABLE_ATTRIBUTES),
            sortable_attributes: to_owned(&SORTABLE_ATTRIBUTES),
            ranking_rules: to_owned(&RANKING_RULES),
        }
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
