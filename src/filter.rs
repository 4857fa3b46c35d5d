//! Pure filtering and ordering over the character collection.
//!
//! These functions never mutate their input; `apply` returns references
//! into the collection in their original relative order.

use crate::models::Character;
use crate::utils::contains_ignore_case;

/// Derive the visible list from the collection and the two filter values.
///
/// A character passes when its lower-cased name contains the lower-cased
/// `name_query` (empty query matches all), and its species equals
/// `species_filter` exactly (empty filter matches all). The name predicate
/// runs first; both preserve input order.
pub fn apply<'a>(
    characters: &'a [Character],
    name_query: &str,
    species_filter: &str,
) -> Vec<&'a Character> {
    characters
        .iter()
        .filter(|c| contains_ignore_case(&c.name, name_query))
        .filter(|c| species_filter.is_empty() || c.species == species_filter)
        .collect()
}

/// Sort the collection by name: ascending, case-sensitive, stable.
/// Characters with equal names keep their relative fetch order.
pub fn sort_by_name(characters: &mut [Character]) {
    characters.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Distinct species present in the collection, sorted, for the species
/// selector. The empty string (no constraint) is not included.
pub fn species_options(characters: &[Character]) -> Vec<String> {
    let mut options: Vec<String> = characters
        .iter()
        .map(|c| c.species.clone())
        .filter(|s| !s.is_empty())
        .collect();
    options.sort();
    options.dedup();
    options
}

// ============================================================================
// Tests
// ============================================================================
