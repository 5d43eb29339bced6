//! # Checklist Query
//!
//! Pure, side-effect-free selection of controls from the loaded standard
//! indexes. One generic engine ([`Filterable`] + [`select`]) serves both
//! standards; each standard contributes a query type describing the filter
//! axes it actually supports.
//!
//! The indexes are flattened in canonical document order at load time, so
//! filtering preserves the category/section grouping callers rely on for
//! rendered output. Identical inputs always yield an identical ordered
//! sequence.

mod checklist;
mod requirements;

pub use checklist::{build_checklist, ChecklistQuery};
pub use requirements::{search_requirements, RequirementFilters};

/// An item that can decide whether it matches a query. All active predicates
/// of a query are ANDed; axes a query leaves unset pass everything.
pub trait Filterable {
    type Query;

    fn matches(&self, query: &Self::Query) -> bool;
}

/// Filter a pre-sorted slice, preserving its order. The output borrows from
/// the index; nothing is cloned or mutated.
pub fn select<'a, T: Filterable>(items: &'a [T], query: &T::Query) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(query)).collect()
}
