//! Loader/flattener for the application standard.
//!
//! The raw document is a nested, ordered tree (categories → sections →
//! items). Loading flattens it, depth-first in source order, into an
//! immutable [`TaxonomyIndex`]: a flat control sequence in canonical order,
//! deduplicated category list, and an id lookup. The loader runs once at
//! process start; any shape problem is fatal.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::classification;
use crate::error::{Result, TaxonomyError};
use crate::types::{Category, Control, Ordinal, StandardInfo};

const BUILTIN_APPLICATION: &str = include_str!("../../../data/application-standard.json");

/// Raw nested shape of a standard document.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardDocument {
    pub name: String,
    #[serde(rename = "shortName")]
    pub short_name: String,
    pub version: String,
    pub categories: Vec<RawCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCategory {
    pub code: String,
    pub name: String,
    pub sections: Vec<RawSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSection {
    pub code: String,
    pub name: String,
    pub items: Vec<RawItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub level: Option<RawLevel>,
}

/// Source documents carry levels as small integers or strings; both are
/// accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLevel {
    Number(i64),
    Text(String),
}

/// Immutable, flattened index of the application standard. Built once,
/// frozen for the remainder of the process.
#[derive(Debug, Clone)]
pub struct TaxonomyIndex {
    info: StandardInfo,
    controls: Vec<Control>,
    categories: Vec<Category>,
    by_id: HashMap<String, usize>,
}

impl TaxonomyIndex {
    pub fn from_document(document: &StandardDocument) -> Result<Self> {
        let mut controls = Vec::new();
        let mut categories: Vec<Category> = Vec::new();
        let mut category_names: HashMap<String, String> = HashMap::new();

        for (category_position, category) in document.categories.iter().enumerate() {
            let category_ordinal = code_ordinal(&category.code, category_position);

            match category_names.get(&category.code) {
                None => {
                    category_names.insert(category.code.clone(), category.name.clone());
                    categories.push(Category {
                        id: category.code.clone(),
                        name: category.name.clone(),
                        ordinal: category_ordinal,
                    });
                }
                Some(first) if *first != category.name => {
                    return Err(TaxonomyError::CategoryNameConflict {
                        code: category.code.clone(),
                        first: first.clone(),
                        second: category.name.clone(),
                    });
                }
                Some(_) => {}
            }

            let tags = classification::tags_for(&category.code);

            for (section_position, section) in category.sections.iter().enumerate() {
                for (item_position, item) in section.items.iter().enumerate() {
                    let ordinal = Ordinal::from_control_id(&item.id).unwrap_or(Ordinal::new(
                        category_ordinal,
                        section_position as u32 + 1,
                        item_position as u32 + 1,
                    ));

                    controls.push(Control {
                        id: item.id.clone(),
                        description: normalize_text(&item.description),
                        level: resolve_level(item.level.as_ref(), &item.id),
                        category_id: category.code.clone(),
                        category_name: category.name.clone(),
                        section_id: section.code.clone(),
                        section_name: section.name.clone(),
                        ordinal,
                        roles: tags.roles.to_vec(),
                        application_types: tags.application_types.to_vec(),
                        disciplines: tags.disciplines.to_vec(),
                        technologies: tags.technologies.to_vec(),
                    });
                }
            }
        }

        if controls.is_empty() {
            return Err(TaxonomyError::EmptyDocument);
        }

        controls.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.id.cmp(&b.id)));
        categories.sort_by_key(|c| c.ordinal);

        let mut by_id = HashMap::with_capacity(controls.len());
        for (index, control) in controls.iter().enumerate() {
            if by_id.insert(control.id.clone(), index).is_some() {
                return Err(TaxonomyError::DuplicateControlId(control.id.clone()));
            }
        }

        let info = StandardInfo {
            name: document.name.clone(),
            short_name: document.short_name.clone(),
            version: document.version.clone(),
            total_controls: controls.len(),
        };

        log::info!(
            "Loaded {} '{}' v{}: {} controls across {} categories",
            info.short_name,
            info.name,
            info.version,
            controls.len(),
            categories.len()
        );

        Ok(Self {
            info,
            controls,
            categories,
            by_id,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let document: StandardDocument = serde_json::from_str(raw)?;
        Self::from_document(&document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    #[must_use]
    pub const fn info(&self) -> &StandardInfo {
        &self.info
    }

    /// All controls in canonical document order.
    #[must_use]
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    /// Deduplicated categories sorted by ordinal.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn control(&self, id: &str) -> Option<&Control> {
        self.by_id.get(id).map(|&index| &self.controls[index])
    }

    /// Whether a category code (any casing) exists in this standard.
    #[must_use]
    pub fn has_category(&self, code: &str) -> bool {
        self.categories
            .iter()
            .any(|category| category.id.eq_ignore_ascii_case(code))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// The embedded application standard, loaded once per process. A malformed
/// embedded document aborts startup — serving from a partial index is worse
/// than not starting.
pub fn application_index() -> &'static TaxonomyIndex {
    static INDEX: Lazy<TaxonomyIndex> = Lazy::new(|| {
        TaxonomyIndex::from_json_str(BUILTIN_APPLICATION)
            .expect("embedded application standard must parse")
    });
    &INDEX
}

fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Levels outside 1-3 (or unparseable) degrade to the most restrictive level
/// instead of failing: malformed data must never under-report exposure.
fn resolve_level(raw: Option<&RawLevel>, control_id: &str) -> u8 {
    let parsed = match raw {
        Some(RawLevel::Number(value)) => Some(*value),
        Some(RawLevel::Text(value)) => value.trim().trim_start_matches(['L', 'l']).parse().ok(),
        None => None,
    };

    match parsed {
        Some(level @ 1..=3) => level as u8,
        _ => {
            log::warn!("Control {control_id} has no usable level marker; treating as level 3");
            3
        }
    }
}

fn code_ordinal(code: &str, position: usize) -> u32 {
    let digits: String = code.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(position as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(categories: &str) -> String {
        format!(
            r#"{{
                "name": "Test Standard",
                "shortName": "TST",
                "version": "1.0",
                "categories": {categories}
            }}"#
        )
    }

    #[test]
    fn builtin_standard_loads() {
        let index = application_index();
        assert_eq!(index.info().short_name, "ASVS");
        assert!(index.len() > 30);
        assert_eq!(index.categories().len(), 14);
    }

    #[test]
    fn builtin_categories_are_in_ordinal_order() {
        let ids: Vec<&str> = application_index()
            .categories()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids[0], "V1");
        assert_eq!(ids[9], "V10");
        assert_eq!(ids[13], "V14");
    }

    #[test]
    fn controls_sort_canonically_even_when_declared_out_of_order() {
        let raw = document(
            r#"[
                {"code": "V2", "name": "Second", "sections": [
                    {"code": "V2.1", "name": "S", "items": [
                        {"id": "V2.1.10", "description": "late item", "level": 1},
                        {"id": "V2.1.2", "description": "early item", "level": 1}
                    ]}
                ]},
                {"code": "V1", "name": "First", "sections": [
                    {"code": "V1.1", "name": "S", "items": [
                        {"id": "V1.1.1", "description": "first", "level": 1}
                    ]}
                ]}
            ]"#,
        );
        let index = TaxonomyIndex::from_json_str(&raw).unwrap();
        let ids: Vec<&str> = index.controls().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["V1.1.1", "V2.1.2", "V2.1.10"]);
    }

    #[test]
    fn description_whitespace_is_normalized() {
        let raw = document(
            r#"[
                {"code": "V1", "name": "C", "sections": [
                    {"code": "V1.1", "name": "S", "items": [
                        {"id": "V1.1.1", "description": "two\n  spaced   words", "level": 1}
                    ]}
                ]}
            ]"#,
        );
        let index = TaxonomyIndex::from_json_str(&raw).unwrap();
        assert_eq!(index.controls()[0].description, "two spaced words");
    }

    #[test]
    fn missing_or_garbled_level_degrades_to_three() {
        let raw = document(
            r#"[
                {"code": "V1", "name": "C", "sections": [
                    {"code": "V1.1", "name": "S", "items": [
                        {"id": "V1.1.1", "description": "no level"},
                        {"id": "V1.1.2", "description": "bad level", "level": "advanced"},
                        {"id": "V1.1.3", "description": "out of range", "level": 9},
                        {"id": "V1.1.4", "description": "string level", "level": "2"},
                        {"id": "V1.1.5", "description": "prefixed level", "level": "L1"}
                    ]}
                ]}
            ]"#,
        );
        let index = TaxonomyIndex::from_json_str(&raw).unwrap();
        let levels: Vec<u8> = index.controls().iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![3, 3, 3, 2, 1]);
    }

    #[test]
    fn unknown_category_code_gets_everyone_tags() {
        let raw = document(
            r#"[
                {"code": "X7", "name": "Unknown", "sections": [
                    {"code": "X7.1", "name": "S", "items": [
                        {"id": "X7.1.1", "description": "item", "level": 1}
                    ]}
                ]}
            ]"#,
        );
        let index = TaxonomyIndex::from_json_str(&raw).unwrap();
        let control = &index.controls()[0];
        assert!(!control.roles.is_empty());
        assert!(!control.disciplines.is_empty());
        assert!(!control.technologies.is_empty());
    }

    #[test]
    fn conflicting_category_names_are_rejected() {
        let raw = document(
            r#"[
                {"code": "V1", "name": "First Name", "sections": [
                    {"code": "V1.1", "name": "S", "items": [
                        {"id": "V1.1.1", "description": "a", "level": 1}
                    ]}
                ]},
                {"code": "V1", "name": "Different Name", "sections": [
                    {"code": "V1.2", "name": "S", "items": [
                        {"id": "V1.2.1", "description": "b", "level": 1}
                    ]}
                ]}
            ]"#,
        );
        let err = TaxonomyIndex::from_json_str(&raw).unwrap_err();
        assert!(matches!(err, TaxonomyError::CategoryNameConflict { .. }));
    }

    #[test]
    fn duplicate_control_ids_are_rejected() {
        let raw = document(
            r#"[
                {"code": "V1", "name": "C", "sections": [
                    {"code": "V1.1", "name": "S", "items": [
                        {"id": "V1.1.1", "description": "a", "level": 1},
                        {"id": "V1.1.1", "description": "b", "level": 2}
                    ]}
                ]}
            ]"#,
        );
        let err = TaxonomyIndex::from_json_str(&raw).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateControlId(_)));
    }

    #[test]
    fn empty_document_is_fatal() {
        let raw = document("[]");
        let err = TaxonomyIndex::from_json_str(&raw).unwrap_err();
        assert!(matches!(err, TaxonomyError::EmptyDocument));
    }

    #[test]
    fn garbled_document_is_fatal() {
        let err = TaxonomyIndex::from_json_str("{\"name\": \"half a docu").unwrap_err();
        assert!(matches!(err, TaxonomyError::Json(_)));
    }

    #[test]
    fn control_lookup_by_id() {
        let index = application_index();
        let control = index.control("V2.1.1").unwrap();
        assert_eq!(control.category_id, "V2");
        assert_eq!(control.level, 1);
        assert!(index.control("V99.1.1").is_none());
    }
}
