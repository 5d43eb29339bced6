//! # Checklist Protocol
//!
//! Shared boundary vocabulary for the checklist engine: verification levels,
//! user roles, application platforms, engineering disciplines, and technology
//! tags, plus the natural (numeric-aware) string ordering used everywhere
//! category codes are sorted.
//!
//! Every enum here has a stable wire form (the serde representation), a
//! case-insensitive `FromStr`, and a `Display` that emits the wire form, so
//! values round-trip byte-identically across the request layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod natural;

pub use natural::natural_cmp;

/// Parse failure for any protocol enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value: '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Verification rigor tier. Queries at level N include all controls whose
/// minimum level is <= N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    L1,
    L2,
    L3,
}

impl Level {
    /// Internal integer form (1-3).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
        }
    }

    /// Inverse of [`Level::rank`]. Out-of-range input saturates to the most
    /// restrictive level so malformed data never under-reports exposure.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Self {
        match rank {
            1 => Self::L1,
            2 => Self::L2,
            _ => Self::L3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::L1 => "Level 1 – Opportunistic",
            Self::L2 => "Level 2 – Standard",
            Self::L3 => "Level 3 – Advanced",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L3" => Ok(Self::L3),
            _ => Err(ParseEnumError::new("level", s)),
        }
    }
}

/// Portal user role. Drives checklist scoping and the discipline fallback in
/// questionnaire scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Architect,
    Developer,
    Tester,
    BusinessAnalyst,
    DataScientist,
    Executive,
}

impl Role {
    pub const ALL: [Self; 6] = [
        Self::Architect,
        Self::Developer,
        Self::Tester,
        Self::BusinessAnalyst,
        Self::DataScientist,
        Self::Executive,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Architect => "Security Architect",
            Self::Developer => "Developer",
            Self::Tester => "QA Tester",
            Self::BusinessAnalyst => "Business Analyst",
            Self::DataScientist => "Data Scientist",
            Self::Executive => "Executive Stakeholder",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Architect => "architect",
            Self::Developer => "developer",
            Self::Tester => "tester",
            Self::BusinessAnalyst => "business-analyst",
            Self::DataScientist => "data-scientist",
            Self::Executive => "executive",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "architect" => Ok(Self::Architect),
            "developer" => Ok(Self::Developer),
            "tester" => Ok(Self::Tester),
            "business-analyst" => Ok(Self::BusinessAnalyst),
            "data-scientist" => Ok(Self::DataScientist),
            "executive" => Ok(Self::Executive),
            _ => Err(ParseEnumError::new("role", s)),
        }
    }
}

/// Application delivery platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    Web,
    Mobile,
    Api,
}

impl ApplicationType {
    pub const ALL: [Self; 3] = [Self::Web, Self::Mobile, Self::Api];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Web => "Web Application",
            Self::Mobile => "Mobile / Hybrid Application",
            Self::Api => "API / Microservice",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Mobile => "mobile",
            Self::Api => "api",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "mobile" => Ok(Self::Mobile),
            "api" => Ok(Self::Api),
            _ => Err(ParseEnumError::new("application type", s)),
        }
    }
}

/// Engineering discipline a control is most relevant to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discipline {
    Frontend,
    Backend,
    Mobile,
    Fullstack,
    DataAnalyst,
    Devops,
    SecurityEngineer,
    QaEngineer,
    ProjectManager,
}

impl Discipline {
    pub const ALL: [Self; 9] = [
        Self::Frontend,
        Self::Backend,
        Self::Mobile,
        Self::Fullstack,
        Self::DataAnalyst,
        Self::Devops,
        Self::SecurityEngineer,
        Self::QaEngineer,
        Self::ProjectManager,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend Developer",
            Self::Backend => "Backend Developer",
            Self::Mobile => "Mobile Developer",
            Self::Fullstack => "Fullstack Developer",
            Self::DataAnalyst => "Data Analyst / Engineer",
            Self::Devops => "DevOps / Platform",
            Self::SecurityEngineer => "Security Engineer",
            Self::QaEngineer => "QA / Test Engineer",
            Self::ProjectManager => "Project / Delivery Manager",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Mobile => "mobile",
            Self::Fullstack => "fullstack",
            Self::DataAnalyst => "data-analyst",
            Self::Devops => "devops",
            Self::SecurityEngineer => "security-engineer",
            Self::QaEngineer => "qa-engineer",
            Self::ProjectManager => "project-manager",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "frontend" => Ok(Self::Frontend),
            "backend" => Ok(Self::Backend),
            "mobile" => Ok(Self::Mobile),
            "fullstack" => Ok(Self::Fullstack),
            "data-analyst" => Ok(Self::DataAnalyst),
            "devops" => Ok(Self::Devops),
            "security-engineer" => Ok(Self::SecurityEngineer),
            "qa-engineer" => Ok(Self::QaEngineer),
            "project-manager" => Ok(Self::ProjectManager),
            _ => Err(ParseEnumError::new("discipline", s)),
        }
    }
}

/// Technology stack tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Technology {
    Typescript,
    Javascript,
    Python,
    Java,
    Csharp,
    Go,
    Ruby,
    Php,
    Kotlin,
    Swift,
}

impl Technology {
    pub const ALL: [Self; 10] = [
        Self::Typescript,
        Self::Javascript,
        Self::Python,
        Self::Java,
        Self::Csharp,
        Self::Go,
        Self::Ruby,
        Self::Php,
        Self::Kotlin,
        Self::Swift,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Typescript => "TypeScript",
            Self::Javascript => "JavaScript",
            Self::Python => "Python",
            Self::Java => "Java",
            Self::Csharp => "C#",
            Self::Go => "Go",
            Self::Ruby => "Ruby",
            Self::Php => "PHP",
            Self::Kotlin => "Kotlin",
            Self::Swift => "Swift",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Typescript => "typescript",
            Self::Javascript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Csharp => "csharp",
            Self::Go => "go",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::Kotlin => "kotlin",
            Self::Swift => "swift",
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Technology {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "typescript" => Ok(Self::Typescript),
            "javascript" => Ok(Self::Javascript),
            "python" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "csharp" => Ok(Self::Csharp),
            "go" => Ok(Self::Go),
            "ruby" => Ok(Self::Ruby),
            "php" => Ok(Self::Php),
            "kotlin" => Ok(Self::Kotlin),
            "swift" => Ok(Self::Swift),
            _ => Err(ParseEnumError::new("technology", s)),
        }
    }
}

/// A recommended technology: either one concrete tag or "all" when the
/// questionnaire gives no signal to narrow it down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TechnologyChoice {
    Tag(Technology),
    #[serde(with = "all_literal")]
    All,
}

mod all_literal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str("all")
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
        let value = String::deserialize(deserializer)?;
        if value == "all" {
            Ok(())
        } else {
            Err(D::Error::custom(format!("expected 'all', got '{value}'")))
        }
    }
}

impl fmt::Display for TechnologyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Tag(tag) => f.write_str(tag.as_str()),
        }
    }
}

impl FromStr for TechnologyChoice {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Technology::from_str(s).map(Self::Tag)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn level_wire_form_round_trips() {
        for level in [Level::L1, Level::L2, Level::L3] {
            let json = serde_json::to_string(&level).unwrap();
            assert_eq!(json, format!("\"{level}\""));
            let back: Level = serde_json::from_str(&json).unwrap();
            assert_eq!(back, level);
        }
    }

    #[test]
    fn level_rank_is_monotonic_and_saturating() {
        assert!(Level::L1 < Level::L2 && Level::L2 < Level::L3);
        assert_eq!(Level::from_rank(1), Level::L1);
        assert_eq!(Level::from_rank(0), Level::L3);
        assert_eq!(Level::from_rank(9), Level::L3);
    }

    #[test]
    fn role_parses_kebab_case() {
        assert_eq!(
            "business-analyst".parse::<Role>().unwrap(),
            Role::BusinessAnalyst
        );
        assert_eq!("Developer".parse::<Role>().unwrap(), Role::Developer);
        assert!("intern".parse::<Role>().is_err());
    }

    #[test]
    fn role_serde_matches_display() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
    }

    #[test]
    fn discipline_serde_matches_display() {
        for discipline in Discipline::ALL {
            let json = serde_json::to_string(&discipline).unwrap();
            assert_eq!(json, format!("\"{discipline}\""));
        }
    }

    #[test]
    fn technology_choice_serializes_all_as_literal() {
        assert_eq!(
            serde_json::to_string(&TechnologyChoice::All).unwrap(),
            "\"all\""
        );
        assert_eq!(
            serde_json::to_string(&TechnologyChoice::Tag(Technology::Kotlin)).unwrap(),
            "\"kotlin\""
        );
        let parsed: TechnologyChoice = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, TechnologyChoice::All);
    }
}
