//! Checklist selection over the application standard.

use serde::{Deserialize, Serialize};

use checklist_protocol::{ApplicationType, Discipline, Level, Role, Technology};
use checklist_taxonomy::{Control, TaxonomyIndex};

use crate::{select, Filterable};

/// A checklist profile: the mandatory level/role/platform axes plus the
/// optional developer-refinement axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistQuery {
    pub level: Level,
    pub role: Role,
    pub application_type: ApplicationType,
    #[serde(default)]
    pub discipline: Option<Discipline>,
    #[serde(default)]
    pub technology: Option<Technology>,
    /// Category codes to restrict to; stored upper-cased. `None` (or empty)
    /// means no category restriction.
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl ChecklistQuery {
    #[must_use]
    pub const fn new(level: Level, role: Role, application_type: ApplicationType) -> Self {
        Self {
            level,
            role,
            application_type,
            discipline: None,
            technology: None,
            categories: None,
        }
    }

    #[must_use]
    pub const fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = Some(discipline);
        self
    }

    #[must_use]
    pub const fn with_technology(mut self, technology: Technology) -> Self {
        self.technology = Some(technology);
        self
    }

    /// Restrict to the given category codes. Codes are case-normalized to
    /// upper-case here, at the boundary; an empty list means no restriction.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized: Vec<String> = categories
            .into_iter()
            .map(|code| code.as_ref().trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();
        self.categories = if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        };
        self
    }
}

impl Filterable for Control {
    type Query = ChecklistQuery;

    fn matches(&self, query: &ChecklistQuery) -> bool {
        // Monotonic inclusion: a level-3 profile also gets level-1 and
        // level-2 controls.
        if self.level > query.level.rank() {
            return false;
        }
        if !self.has_role(query.role) {
            return false;
        }
        if !self.has_application_type(query.application_type) {
            return false;
        }
        if let Some(discipline) = query.discipline {
            if !self.has_discipline(discipline) {
                return false;
            }
        }
        if let Some(technology) = query.technology {
            if !self.has_technology(technology) {
                return false;
            }
        }
        if let Some(categories) = &query.categories {
            let code = self.category_id.to_uppercase();
            if !categories.contains(&code) {
                return false;
            }
        }
        true
    }
}

/// Answer "which controls make up the checklist for profile `query`".
///
/// Pure: never mutates the index; output order is the canonical document
/// order `(category, section, item)` ascending.
pub fn build_checklist<'a>(index: &'a TaxonomyIndex, query: &ChecklistQuery) -> Vec<&'a Control> {
    let controls = select(index.controls(), query);
    log::debug!(
        "Checklist for level={} role={} app={}: {} of {} controls",
        query.level,
        query.role,
        query.application_type,
        controls.len(),
        index.len()
    );
    controls
}
