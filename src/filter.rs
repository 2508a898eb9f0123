//! Local filtering of the algorithm list.

use crate::models::{Algorithm, Tag};
use crate::tags::same_tag;

/// True when name or description contains `search` (case-insensitive) and
/// the algorithm carries every tag in `selected`.
pub fn matches(algorithm: &Algorithm, search: &str, selected: &[Tag]) -> bool {
    let needle = search.to_lowercase();
    let text_match = algorithm.name.to_lowercase().contains(&needle)
        || algorithm.description.to_lowercase().contains(&needle);

    text_match
        && selected.iter().all(|wanted| {
            algorithm
                .tags
                .iter()
                .any(|tag| same_tag(&tag.name, &wanted.name))
        })
}

pub fn filter_algorithms(algorithms: &[Algorithm], search: &str, selected: &[Tag]) -> Vec<Algorithm> {
    algorithms
        .iter()
        .filter(|algorithm| matches(algorithm, search, selected))
        .cloned()
        .collect()
}
