//! Provider list merging.

/// Free providers missing from `flatrate`, in their original order, followed
/// by every flatrate provider.
///
/// Only membership across the two lists is filtered; duplicates inside
/// either list are kept.
pub fn unique_list<T: PartialEq + Clone>(flatrate: &[T], free: &[T]) -> Vec<T> {
    free.iter()
        .filter(|provider| !flatrate.contains(provider))
        .chain(flatrate.iter())
        .cloned()
        .collect()
}
