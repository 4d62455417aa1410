//! Per-country index configuration.

use std::collections::HashSet;

use crate::search::client::{SearchError, SearchService};
use crate::search::settings::IndexSettings;

/// Apply the media index settings for every supported country code.
///
/// Four settings calls per country, one per category. The first failure
/// aborts the run and is returned to the caller. Repeated country codes are
/// only applied once. Returns the number of indexes configured.
pub async fn update_index<S>(search: &S, country_codes: &[String]) -> Result<usize, SearchError>
where
    S: SearchService + ?Sized,
{
    let mut seen = HashSet::new();
    let mut configured = 0;

    for code in country_codes.iter().map(|c| c.trim()) {
        if !seen.insert(code) {
            continue;
        }
        let settings = IndexSettings::for_country(code);
        apply_index_settings(search, &settings).await?;
        configured += 1;
    }

    tracing::info!(indexes = configured, "Search indexes configured");
    Ok(configured)
}

/// Apply one configuration record.
pub async fn apply_index_settings<S>(search: &S, settings: &IndexSettings) -> Result<(), SearchError>
where
    S: SearchService + ?Sized,
{
    let index = settings.index.as_str();

    search
        .update_filterable_attributes(index, &settings.filterable_attributes)
        .await?;
    search
        .update_searchable_attributes(index, &settings.searchable_attributes)
        .await?;
    search
        .update_sortable_attributes(index, &settings.sortable_attributes)
        .await?;
    search.update_ranking_rules(index, &settings.ranking_rules).await?;

    tracing::debug!(index = %index, "Index settings applied");
    Ok(())
}
