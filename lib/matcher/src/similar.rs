//! Related-monument lookup
//!
//! Ranks the other monuments in a catalog by how much they have in common
//! with a given one: shared architecture tags, overlapping location and
//! shared content tags.

use heritage_core::{Catalog, MonumentId, MonumentRecord};

/// Default number of related monuments returned
pub const DEFAULT_SIMILAR_LIMIT: usize = 3;

const SHARED_ARCHITECTURE_WEIGHT: u32 = 2;
const SAME_LOCATION_BONUS: u32 = 3;

/// Monuments related to `id`, most related first
///
/// Only monuments with a signature can score; an unsigned one counts as
/// unrelated. When the target has no signature, or nothing relates to it,
/// the first `limit` catalog monuments are returned instead. Unknown ids
/// yield an empty list.
pub fn similar_monuments<'a>(id: &MonumentId, catalog: &'a Catalog, limit: usize) -> Vec<&'a MonumentRecord> {
    let Some(target) = catalog.get_by_id(id) else {
        return Vec::new();
    };

    let Some(signature) = catalog.signature(id) else {
        return catalog_head(catalog, limit);
    };

    let target_location = target.location.to_lowercase();

    let mut scored: Vec<(&MonumentRecord, u32)> = catalog
        .monuments()
        .all()
        .filter(|other| other.id != target.id)
        .map(|other| {
            let Some(other_sig) = catalog.signature(&other.id) else {
                return (other, 0);
            };

            let shared = signature
                .architecture_tags
                .iter()
                .filter(|tag| other_sig.architecture_tags.contains(tag))
                .count() as u32;
            let mut score = SHARED_ARCHITECTURE_WEIGHT * shared;

            if locations_overlap(&target_location, &other.location.to_lowercase()) {
                score += SAME_LOCATION_BONUS;
            }

            score += target.tags.iter().filter(|tag| other.tags.contains(tag)).count() as u32;

            (other, score)
        })
        .filter(|(_, score)| *score > 0)
        .collect();

    if scored.is_empty() {
        return catalog_head(catalog, limit);
    }

    // stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored.into_iter().take(limit).map(|(record, _)| record).collect()
}

fn catalog_head(catalog: &Catalog, limit: usize) -> Vec<&MonumentRecord> {
    catalog.monuments().all().take(limit).collect()
}

fn locations_overlap(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}
