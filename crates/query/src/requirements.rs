//! Free-text search over the pipeline standard.

use serde::{Deserialize, Serialize};

use checklist_protocol::Level;
use checklist_taxonomy::{PipelineIndex, Requirement};

use crate::{select, Filterable};

/// Filters for pipeline-requirement search. Every field is optional; an
/// unset (or empty) filter passes everything, and active filters compose
/// with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementFilters {
    /// Case-insensitive substring matched across id, description, category
    /// and subcategory names, and the external mapping fields. Empty or
    /// whitespace-only search matches everything.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub levels: Option<Vec<Level>>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub subcategories: Option<Vec<String>>,
}

impl RequirementFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        let levels: Vec<Level> = levels.into_iter().collect();
        self.levels = if levels.is_empty() {
            None
        } else {
            Some(levels)
        };
        self
    }

    /// Category codes are case-normalized to upper-case at this boundary.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.categories = normalize_codes(categories);
        self
    }

    /// Subcategory codes are case-normalized to upper-case at this boundary.
    #[must_use]
    pub fn with_subcategories<I, S>(mut self, subcategories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.subcategories = normalize_codes(subcategories);
        self
    }
}

fn normalize_codes<I, S>(codes: I) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized: Vec<String> = codes
        .into_iter()
        .map(|code| code.as_ref().trim().to_uppercase())
        .filter(|code| !code.is_empty())
        .collect();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

impl Filterable for Requirement {
    type Query = RequirementFilters;

    fn matches(&self, filters: &RequirementFilters) -> bool {
        if let Some(levels) = &filters.levels {
            if !levels.iter().any(|&level| self.applies_at(level)) {
                return false;
            }
        }
        if let Some(categories) = &filters.categories {
            if !categories.contains(&self.category_id) {
                return false;
            }
        }
        if let Some(subcategories) = &filters.subcategories {
            // Requirements without a subcategory pass any subcategory filter.
            if !self.subcategory_id.is_empty() && !subcategories.contains(&self.subcategory_id) {
                return false;
            }
        }
        matches_search(self, filters.search.as_deref())
    }
}

fn matches_search(requirement: &Requirement, search: Option<&str>) -> bool {
    let Some(search) = search else {
        return true;
    };
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    let haystack = [
        requirement.id.as_str(),
        requirement.description.as_str(),
        requirement.category_name.as_str(),
        requirement.subcategory_name.as_str(),
        requirement.nist_mapping.as_str(),
        requirement.owasp_risk.as_str(),
        requirement.cwe_mapping.as_str(),
        requirement.cwe_description.as_str(),
    ]
    .join(" ")
    .to_lowercase();

    haystack.contains(&needle)
}

/// Answer "which pipeline requirements match `filters`", in document order.
/// Pure and side-effect-free.
pub fn search_requirements<'a>(
    index: &'a PipelineIndex,
    filters: &RequirementFilters,
) -> Vec<&'a Requirement> {
    let requirements = select(index.requirements(), filters);
    log::debug!(
        "Requirement search matched {} of {}",
        requirements.len(),
        index.requirements().len()
    );
    requirements
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_taxonomy::pipeline_index;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_filters_returns_every_requirement() {
        let index = pipeline_index();
        let results = search_requirements(index, &RequirementFilters::new());
        assert_eq!(results.len(), index.requirements().len());
    }

    #[test]
    fn filters_by_category_id() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_categories(["V3"]);
        let results = search_requirements(index, &filters);

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.category_id == "V3"));
    }

    #[test]
    fn filters_by_level() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_levels([Level::L1]);
        let results = search_requirements(index, &filters);

        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.applies_at(Level::L1)));
    }

    #[test]
    fn search_matches_across_description_and_mappings() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_search("Multi-Factor Authentication");
        let results = search_requirements(index, &filters);
        assert!(results.iter().any(|r| r.id == "V1.1.1"));

        // CWE text is part of the haystack too.
        let filters = RequirementFilters::new().with_search("hard-coded credentials");
        let results = search_requirements(index, &filters);
        assert!(results.iter().any(|r| r.id == "V1.1.2"));
    }

    #[test]
    fn search_is_case_insensitive() {
        let index = pipeline_index();
        let upper = search_requirements(
            index,
            &RequirementFilters::new().with_search("ROLLBACK"),
        );
        let lower = search_requirements(
            index,
            &RequirementFilters::new().with_search("rollback"),
        );
        assert!(!upper.is_empty());
        assert_eq!(
            upper.iter().map(|r| &r.id).collect::<Vec<_>>(),
            lower.iter().map(|r| &r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn blank_search_matches_everything() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_search("   ");
        let results = search_requirements(index, &filters);
        assert_eq!(results.len(), index.requirements().len());
    }

    #[test]
    fn filters_compose_with_and() {
        let index = pipeline_index();
        let filters = RequirementFilters::new()
            .with_categories(["V4"])
            .with_levels([Level::L1])
            .with_search("rollback");
        let results = search_requirements(index, &filters);

        assert!(!results.is_empty());
        for requirement in results {
            assert_eq!(requirement.category_id, "V4");
            assert!(requirement.applies_at(Level::L1));
        }
    }

    #[test]
    fn subcategory_codes_are_case_normalized() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_subcategories(["v2.5"]);
        let results = search_requirements(index, &filters);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.subcategory_id == "V2.5"));
    }

    #[test]
    fn results_stay_in_document_order() {
        let index = pipeline_index();
        let filters = RequirementFilters::new().with_categories(["V1", "V4"]);
        let results = search_requirements(index, &filters);
        let positions: Vec<usize> = results
            .iter()
            .map(|r| {
                index
                    .requirements()
                    .iter()
                    .position(|other| other.id == r.id)
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
