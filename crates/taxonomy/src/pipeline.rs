//! Loader for the pipeline standard (SPVS).
//!
//! The pipeline taxonomy ships as CSV: one row per requirement, with the
//! category/subcategory pair repeated on every row and per-level
//! applicability flag columns. Loading produces an immutable
//! [`PipelineIndex`] with natural-sorted category and subcategory lists.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use checklist_protocol::{natural_cmp, Level};

use crate::error::{Result, TaxonomyError};
use crate::types::StandardInfo;

const BUILTIN_PIPELINE: &str = include_str!("../../../data/spvs-1.0.0-en.csv");

/// One verifiable requirement of the pipeline standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub description: String,
    pub category_id: String,
    pub category_name: String,
    pub subcategory_id: String,
    pub subcategory_name: String,
    /// Levels at which the requirement applies. A row with no flag applies
    /// at every level.
    pub levels: Vec<Level>,
    pub nist_mapping: String,
    pub owasp_risk: String,
    pub cwe_mapping: String,
    pub cwe_description: String,
}

impl Requirement {
    #[must_use]
    pub fn applies_at(&self, level: Level) -> bool {
        self.levels.contains(&level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineCategory {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    pub category_id: String,
}

/// Immutable, flattened index of the pipeline standard.
#[derive(Debug, Clone)]
pub struct PipelineIndex {
    info: StandardInfo,
    requirements: Vec<Requirement>,
    categories: Vec<PipelineCategory>,
    subcategories: Vec<Subcategory>,
}

impl PipelineIndex {
    pub fn from_csv_str(raw: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(raw.as_bytes());

        let mut requirements = Vec::new();
        let mut category_names: HashMap<String, String> = HashMap::new();
        let mut subcategory_entries: HashMap<String, Subcategory> = HashMap::new();

        for row in reader.records() {
            let row = row?;
            let field = |index: usize| row.get(index).unwrap_or("").trim();

            let category_id = field(0);
            let requirement_id = field(4);
            // Divider and section-header rows carry no category/requirement.
            if category_id.is_empty() || category_id == "-" || requirement_id.is_empty() {
                continue;
            }

            let category_id = category_id.to_uppercase();
            let category_name = field(1).to_string();
            let subcategory_id = field(2).to_uppercase();
            let subcategory_name = field(3).to_string();

            if !category_name.is_empty() {
                match category_names.get(&category_id) {
                    None => {
                        category_names.insert(category_id.clone(), category_name.clone());
                    }
                    Some(first) if *first != category_name => {
                        return Err(TaxonomyError::CategoryNameConflict {
                            code: category_id,
                            first: first.clone(),
                            second: category_name,
                        });
                    }
                    Some(_) => {}
                }
            }

            if !subcategory_id.is_empty() && !subcategory_name.is_empty() {
                match subcategory_entries.get(&subcategory_id) {
                    None => {
                        subcategory_entries.insert(
                            subcategory_id.clone(),
                            Subcategory {
                                id: subcategory_id.clone(),
                                name: subcategory_name.clone(),
                                category_id: category_id.clone(),
                            },
                        );
                    }
                    Some(existing) if existing.name != subcategory_name => {
                        return Err(TaxonomyError::SubcategoryNameConflict {
                            code: subcategory_id,
                            first: existing.name.clone(),
                            second: subcategory_name,
                        });
                    }
                    Some(_) => {}
                }
            }

            let mut levels = Vec::with_capacity(3);
            for (flag_index, level) in [(6, Level::L1), (7, Level::L2), (8, Level::L3)] {
                if field(flag_index).eq_ignore_ascii_case("X") {
                    levels.push(level);
                }
            }
            if levels.is_empty() {
                levels = vec![Level::L1, Level::L2, Level::L3];
            }

            requirements.push(Requirement {
                id: requirement_id.to_string(),
                description: normalize_text(field(5)),
                category_id: category_id.clone(),
                category_name,
                subcategory_id,
                subcategory_name,
                levels,
                nist_mapping: field(9).to_string(),
                owasp_risk: field(10).to_string(),
                cwe_mapping: field(11).to_string(),
                cwe_description: field(12).to_string(),
            });
        }

        if requirements.is_empty() {
            return Err(TaxonomyError::EmptyDocument);
        }

        let mut categories: Vec<PipelineCategory> = category_names
            .into_iter()
            .map(|(id, name)| PipelineCategory { id, name })
            .collect();
        categories.sort_by(|a, b| natural_cmp(&a.id, &b.id));

        let mut subcategories: Vec<Subcategory> = subcategory_entries.into_values().collect();
        subcategories.sort_by(|a, b| natural_cmp(&a.id, &b.id));

        let info = StandardInfo {
            name: "Secure Pipeline Verification Standard".to_string(),
            short_name: "SPVS".to_string(),
            version: "1.0.0".to_string(),
            total_controls: requirements.len(),
        };

        log::info!(
            "Loaded {} v{}: {} requirements, {} categories, {} subcategories",
            info.short_name,
            info.version,
            requirements.len(),
            categories.len(),
            subcategories.len()
        );

        Ok(Self {
            info,
            requirements,
            categories,
            subcategories,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_csv_str(&raw)
    }

    #[must_use]
    pub const fn info(&self) -> &StandardInfo {
        &self.info
    }

    /// All requirements in document order.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Categories sorted by natural code order.
    #[must_use]
    pub fn categories(&self) -> &[PipelineCategory] {
        &self.categories
    }

    /// Subcategories sorted by natural code order.
    #[must_use]
    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    #[must_use]
    pub fn has_category(&self, code: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.id.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn has_subcategory(&self, code: &str) -> bool {
        self.subcategories
            .iter()
            .any(|subcategory| subcategory.id.eq_ignore_ascii_case(code))
    }
}

/// The embedded pipeline standard, loaded once per process.
pub fn pipeline_index() -> &'static PipelineIndex {
    static INDEX: Lazy<PipelineIndex> = Lazy::new(|| {
        PipelineIndex::from_csv_str(BUILTIN_PIPELINE)
            .expect("embedded pipeline standard must parse")
    });
    &INDEX
}

fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "category_id,category_name,subcategory_id,subcategory_name,req_id,req_description,level1,level2,level3,nist_mapping,owasp_risk,cwe_mapping,cwe_description\n";

    #[test]
    fn builtin_standard_loads() {
        let index = pipeline_index();
        assert_eq!(index.info().short_name, "SPVS");
        assert_eq!(index.categories().len(), 5);
        assert!(index.requirements().len() > 20);
        assert!(index.has_subcategory("V3.4"));
    }

    #[test]
    fn categories_and_subcategories_sort_naturally() {
        let index = pipeline_index();
        let ids: Vec<&str> = index.categories().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V2", "V3", "V4", "V5"]);

        let sub_ids: Vec<&str> = index
            .subcategories()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        let mut sorted = sub_ids.clone();
        sorted.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(sub_ids, sorted);
    }

    #[test]
    fn divider_and_incomplete_rows_are_skipped() {
        let raw = format!(
            "{HEADER}\
             V1,Cat One,V1.1,Sub One,V1.1.1,First requirement,X,X,X,,,,\n\
             -,,,,,,,,,,,,\n\
             V2,Cat Two,V2.1,Sub Two,,Orphan row without id,X,,,,,,\n\
             V2,Cat Two,V2.1,Sub Two,V2.1.1,Second requirement,,X,X,,,,\n"
        );
        let index = PipelineIndex::from_csv_str(&raw).unwrap();
        assert_eq!(index.requirements().len(), 2);
        assert_eq!(index.categories().len(), 2);
    }

    #[test]
    fn codes_are_upper_cased() {
        let raw = format!("{HEADER}v1,Cat,v1.1,Sub,V1.1.1,Req text,X,,,,,,\n");
        let index = PipelineIndex::from_csv_str(&raw).unwrap();
        let requirement = &index.requirements()[0];
        assert_eq!(requirement.category_id, "V1");
        assert_eq!(requirement.subcategory_id, "V1.1");
    }

    #[test]
    fn missing_level_flags_mean_all_levels() {
        let raw = format!("{HEADER}V1,Cat,V1.1,Sub,V1.1.1,Req text,,,,,,,\n");
        let index = PipelineIndex::from_csv_str(&raw).unwrap();
        assert_eq!(
            index.requirements()[0].levels,
            vec![Level::L1, Level::L2, Level::L3]
        );
    }

    #[test]
    fn level_flags_are_parsed_per_column() {
        let raw = format!("{HEADER}V1,Cat,V1.1,Sub,V1.1.1,Req text,,X,X,,,,\n");
        let index = PipelineIndex::from_csv_str(&raw).unwrap();
        let requirement = &index.requirements()[0];
        assert!(!requirement.applies_at(Level::L1));
        assert!(requirement.applies_at(Level::L2));
        assert!(requirement.applies_at(Level::L3));
    }

    #[test]
    fn conflicting_subcategory_names_are_rejected() {
        let raw = format!(
            "{HEADER}\
             V1,Cat,V1.1,Sub Name,V1.1.1,First,X,,,,,,\n\
             V1,Cat,V1.1,Other Name,V1.1.2,Second,X,,,,,,\n"
        );
        let err = PipelineIndex::from_csv_str(&raw).unwrap_err();
        assert!(matches!(err, TaxonomyError::SubcategoryNameConflict { .. }));
    }

    #[test]
    fn empty_csv_is_fatal() {
        let err = PipelineIndex::from_csv_str(HEADER).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyDocument));
    }

    #[test]
    fn quoted_descriptions_with_commas_survive() {
        let raw = format!(
            "{HEADER}V1,Cat,V1.1,Sub,V1.1.1,\"Commas, quotes, and  spacing\",X,,,,,,\n"
        );
        let index = PipelineIndex::from_csv_str(&raw).unwrap();
        assert_eq!(
            index.requirements()[0].description,
            "Commas, quotes, and spacing"
        );
    }
}
