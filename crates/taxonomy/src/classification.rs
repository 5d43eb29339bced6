//! Static classification of application-standard categories.
//!
//! The standard document itself only carries structure and text; which roles,
//! platforms, disciplines, and technologies a category speaks to is curated
//! lookup data, not runtime state. Category codes missing from the table get
//! the explicit "applies to everyone" entry — never empty sets, which would
//! silently over-filter every query for that category.

use checklist_protocol::{ApplicationType, Discipline, Role, Technology};

/// Tag sets attached to every control of a category at flatten time.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTags {
    pub roles: &'static [Role],
    pub application_types: &'static [ApplicationType],
    pub disciplines: &'static [Discipline],
    pub technologies: &'static [Technology],
}

const ALL_APPS: &[ApplicationType] = &ApplicationType::ALL;
const ALL_TECH: &[Technology] = &Technology::ALL;

/// Fallback for category codes the table does not know.
pub const EVERYONE: CategoryTags = CategoryTags {
    roles: &Role::ALL,
    application_types: ALL_APPS,
    disciplines: &Discipline::ALL,
    technologies: ALL_TECH,
};

const TABLE: &[(&str, CategoryTags)] = &[
    (
        "V1",
        CategoryTags {
            roles: &[Role::Architect, Role::BusinessAnalyst, Role::Executive],
            application_types: ALL_APPS,
            disciplines: &[Discipline::SecurityEngineer, Discipline::ProjectManager],
            technologies: ALL_TECH,
        },
    ),
    (
        "V2",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer, Role::Tester],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Fullstack,
                Discipline::SecurityEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V3",
        CategoryTags {
            roles: &[Role::Developer, Role::Tester],
            application_types: &[ApplicationType::Web, ApplicationType::Mobile],
            disciplines: &[
                Discipline::Frontend,
                Discipline::Backend,
                Discipline::Fullstack,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V4",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer, Role::Tester],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Fullstack,
                Discipline::SecurityEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V5",
        CategoryTags {
            roles: &[Role::Developer, Role::Tester],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Frontend,
                Discipline::Backend,
                Discipline::Fullstack,
                Discipline::Mobile,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V6",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer],
            application_types: ALL_APPS,
            disciplines: &[Discipline::Backend, Discipline::SecurityEngineer],
            technologies: ALL_TECH,
        },
    ),
    (
        "V7",
        CategoryTags {
            roles: &[Role::Developer, Role::Tester],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Devops,
                Discipline::SecurityEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V8",
        CategoryTags {
            roles: &[
                Role::Architect,
                Role::Developer,
                Role::BusinessAnalyst,
                Role::DataScientist,
            ],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Frontend,
                Discipline::DataAnalyst,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V9",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer],
            application_types: ALL_APPS,
            disciplines: &[Discipline::Backend, Discipline::Devops],
            technologies: ALL_TECH,
        },
    ),
    (
        "V10",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer, Role::Tester],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Devops,
                Discipline::SecurityEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V11",
        CategoryTags {
            roles: &[Role::Developer, Role::Tester, Role::BusinessAnalyst],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Backend,
                Discipline::Fullstack,
                Discipline::QaEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
    (
        "V12",
        CategoryTags {
            roles: &[Role::Developer, Role::Tester],
            application_types: &[ApplicationType::Web, ApplicationType::Api],
            disciplines: &[Discipline::Backend, Discipline::Fullstack],
            technologies: ALL_TECH,
        },
    ),
    (
        "V13",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer, Role::Tester],
            application_types: &[ApplicationType::Web, ApplicationType::Api],
            disciplines: &[Discipline::Backend, Discipline::Fullstack],
            technologies: &[
                Technology::Typescript,
                Technology::Javascript,
                Technology::Python,
                Technology::Java,
                Technology::Csharp,
                Technology::Go,
            ],
        },
    ),
    (
        "V14",
        CategoryTags {
            roles: &[Role::Architect, Role::Developer, Role::Executive],
            application_types: ALL_APPS,
            disciplines: &[
                Discipline::Devops,
                Discipline::Backend,
                Discipline::SecurityEngineer,
            ],
            technologies: ALL_TECH,
        },
    ),
];

/// Look up the tag sets for a category code. Unknown codes get [`EVERYONE`].
#[must_use]
pub fn tags_for(category_code: &str) -> CategoryTags {
    TABLE
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(category_code))
        .map_or(EVERYONE, |(_, tags)| *tags)
}
