use serde::{Deserialize, Serialize};

use checklist_protocol::{ApplicationType, Discipline, Role, Technology};

/// Canonical document position of a control: category, section, item.
/// Strictly and totally orders every control in a flattened index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ordinal {
    pub category: u32,
    pub section: u32,
    pub item: u32,
}

impl Ordinal {
    #[must_use]
    pub const fn new(category: u32, section: u32, item: u32) -> Self {
        Self {
            category,
            section,
            item,
        }
    }

    /// Parse the canonical position out of a control id such as `V4.1.2`
    /// (category 4, section 1, item 2). Returns `None` when the id does not
    /// carry three dot-separated numeric parts.
    #[must_use]
    pub fn from_control_id(id: &str) -> Option<Self> {
        let digits = id.trim_start_matches(|c: char| !c.is_ascii_digit());
        let mut parts = digits.split('.');
        let category = parts.next()?.parse().ok()?;
        let section = parts.next()?.parse().ok()?;
        let item = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(category, section, item))
    }
}

/// One verifiable requirement of the application standard, flattened out of
/// the nested document with its category tag sets pre-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    /// Globally unique, stable id; also the display handle.
    pub id: String,

    /// Requirement text, normalized to single-spaced.
    pub description: String,

    /// Minimum level (1-3) at which the control is in scope.
    pub level: u8,

    pub category_id: String,
    pub category_name: String,

    pub section_id: String,
    pub section_name: String,

    /// Canonical document position; the query engine's sort key.
    pub ordinal: Ordinal,

    /// Roles the control is recommended to.
    pub roles: Vec<Role>,

    /// Platforms the control applies to.
    pub application_types: Vec<ApplicationType>,

    /// Engineering disciplines the control is most relevant to.
    pub disciplines: Vec<Discipline>,

    /// Technology stacks the control is most relevant to.
    pub technologies: Vec<Technology>,
}

impl Control {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn has_application_type(&self, application_type: ApplicationType) -> bool {
        self.application_types.contains(&application_type)
    }

    #[must_use]
    pub fn has_discipline(&self, discipline: Discipline) -> bool {
        self.disciplines.contains(&discipline)
    }

    #[must_use]
    pub fn has_technology(&self, technology: Technology) -> bool {
        self.technologies.contains(&technology)
    }
}

/// A top-level grouping of the application standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Sort position within the standard.
    pub ordinal: u32,
}

/// Identity card of a loaded standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardInfo {
    pub name: String,
    pub short_name: String,
    pub version: String,
    pub total_controls: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ordinal_parses_from_control_id() {
        assert_eq!(
            Ordinal::from_control_id("V4.1.2"),
            Some(Ordinal::new(4, 1, 2))
        );
        assert_eq!(
            Ordinal::from_control_id("V14.2.10"),
            Some(Ordinal::new(14, 2, 10))
        );
        assert_eq!(Ordinal::from_control_id("V4.1"), None);
        assert_eq!(Ordinal::from_control_id("V4.1.2.3"), None);
        assert_eq!(Ordinal::from_control_id("arch-threat-model"), None);
    }

    #[test]
    fn ordinal_orders_by_triple() {
        let a = Ordinal::new(1, 2, 3);
        let b = Ordinal::new(1, 2, 4);
        let c = Ordinal::new(1, 3, 1);
        let d = Ordinal::new(2, 1, 1);
        assert!(a < b && b < c && c < d);
    }
}
