//! Questionnaire scoring for the application standard.
//!
//! The weight table and thresholds below are business rules with sign-off;
//! change them deliberately, not incidentally. Each answer contributes its
//! weight independently, and the cumulative score maps to a recommended
//! level through the two thresholds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use checklist_protocol::{ApplicationType, Discipline, Level, Role, Technology, TechnologyChoice};
use checklist_taxonomy::TaxonomyIndex;

use crate::normalize_focus;
use crate::questions::{answered_yes, Answers};

// Weight table. "handlesPayments" carries the largest weight;
// "modernFramework" is a penalty weight applied when answered negatively.
const WEIGHT_HANDLES_PAYMENTS: u32 = 3;
const WEIGHT_STORES_PII: u32 = 2;
const WEIGHT_EXTERNALLY_FACING: u32 = 2;
const WEIGHT_ACCEPTS_USER_INPUT: u32 = 2;
const WEIGHT_USES_DATABASE: u32 = 1;
const WEIGHT_THIRD_PARTY: u32 = 1;
const WEIGHT_LEGACY_FRAMEWORK: u32 = 1;
const WEIGHT_FRONTEND_UI: u32 = 1;
const WEIGHT_AUTHENTICATION: u32 = 1;
const WEIGHT_ROLE_MANAGEMENT: u32 = 1;
const WEIGHT_SENSITIVE_LOGGING: u32 = 1;
const WEIGHT_MULTI_TENANT: u32 = 2;

const L2_THRESHOLD: u32 = 4;
const L3_THRESHOLD: u32 = 7;

/// Scored outcome of the application questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecommendation {
    pub level: Level,
    pub application_type: ApplicationType,
    pub discipline: Discipline,
    pub technology: TechnologyChoice,
    pub notes: Vec<String>,
    pub recommended_categories: Vec<String>,
}

/// Score the application questionnaire. Deterministic: the same answers and
/// role always produce a byte-identical recommendation, including note order
/// and sorted category lists. The index is only consulted to drop
/// recommended categories that do not exist in the loaded standard.
#[must_use]
pub fn score_application(
    answers: &Answers,
    role: Role,
    index: &TaxonomyIndex,
) -> ApplicationRecommendation {
    let yes = |id: &str| answered_yes(answers, id);

    let mut score = 0u32;
    if yes("handlesPayments") {
        score += WEIGHT_HANDLES_PAYMENTS;
    }
    if yes("storesPII") {
        score += WEIGHT_STORES_PII;
    }
    if yes("externallyFacing") {
        score += WEIGHT_EXTERNALLY_FACING;
    }
    if yes("acceptsUserInput") {
        score += WEIGHT_ACCEPTS_USER_INPUT;
    }
    if yes("usesDatabase") {
        score += WEIGHT_USES_DATABASE;
    }
    if yes("integratesThirdParty") {
        score += WEIGHT_THIRD_PARTY;
    }
    if !yes("modernFramework") {
        score += WEIGHT_LEGACY_FRAMEWORK;
    }
    if yes("hasFrontendUI") {
        score += WEIGHT_FRONTEND_UI;
    }
    if yes("implementsAuthentication") {
        score += WEIGHT_AUTHENTICATION;
    }
    if yes("requiresRoleManagement") {
        score += WEIGHT_ROLE_MANAGEMENT;
    }
    if yes("logsSensitiveEvents") {
        score += WEIGHT_SENSITIVE_LOGGING;
    }
    if yes("multiTenantDeployment") {
        score += WEIGHT_MULTI_TENANT;
    }

    let level = determine_level(score);
    log::debug!("Application questionnaire scored {score} -> {level}");

    ApplicationRecommendation {
        level,
        application_type: determine_application_type(answers),
        discipline: determine_discipline(answers, role),
        technology: determine_technology(answers),
        notes: collect_notes(answers),
        recommended_categories: normalize_focus(collect_categories(answers), |code| {
            index.has_category(code)
        }),
    }
}

fn determine_level(score: u32) -> Level {
    if score >= L3_THRESHOLD {
        Level::L3
    } else if score >= L2_THRESHOLD {
        Level::L2
    } else {
        Level::L1
    }
}

fn determine_application_type(answers: &Answers) -> ApplicationType {
    if answered_yes(answers, "mobileClient") {
        ApplicationType::Mobile
    } else if answered_yes(answers, "apiService") {
        ApplicationType::Api
    } else {
        ApplicationType::Web
    }
}

/// Ordered guard list; first match wins. Answers can satisfy several guards
/// at once (a mobile client with a browser UI), so the order is part of the
/// contract.
fn determine_discipline(answers: &Answers, role: Role) -> Discipline {
    if answered_yes(answers, "hasFrontendUI") {
        return Discipline::Frontend;
    }
    if answered_yes(answers, "mobileClient") {
        return Discipline::Mobile;
    }
    if answered_yes(answers, "apiService") {
        return Discipline::Backend;
    }
    match role {
        Role::Developer => {
            if answered_yes(answers, "externallyFacing") {
                Discipline::Fullstack
            } else {
                Discipline::Backend
            }
        }
        Role::Tester => Discipline::QaEngineer,
        Role::Architect | Role::Executive => Discipline::SecurityEngineer,
        Role::BusinessAnalyst | Role::DataScientist => Discipline::ProjectManager,
    }
}

fn determine_technology(answers: &Answers) -> TechnologyChoice {
    if answered_yes(answers, "hasFrontendUI") {
        TechnologyChoice::Tag(Technology::Typescript)
    } else if answered_yes(answers, "mobileClient") {
        TechnologyChoice::Tag(Technology::Kotlin)
    } else if answered_yes(answers, "apiService") {
        TechnologyChoice::Tag(Technology::Java)
    } else {
        TechnologyChoice::All
    }
}

fn collect_notes(answers: &Answers) -> Vec<String> {
    let yes = |id: &str| answered_yes(answers, id);
    let mut notes = Vec::new();

    if yes("handlesPayments") {
        notes.push(
            "Payment handling observed: ensure PCI-aligned controls and fraud monitoring."
                .to_string(),
        );
    }
    if yes("storesPII") {
        notes.push(
            "PII/regulated data present: document privacy controls and retention policies."
                .to_string(),
        );
    }
    if yes("externallyFacing") {
        notes.push(
            "Externally facing surface: reinforce perimeter, logging, and monitoring.".to_string(),
        );
    }
    if !yes("modernFramework") {
        notes.push(
            "Legacy stack detected: review patch cadence and hardening commitments.".to_string(),
        );
    }
    if yes("integratesThirdParty") {
        notes.push(
            "Third-party integrations: capture supply-chain security expectations.".to_string(),
        );
    }
    if yes("implementsAuthentication") {
        notes.push(
            "Authentication in scope: confirm MFA, session management, and credential hygiene."
                .to_string(),
        );
    }
    if yes("requiresRoleManagement") {
        notes.push(
            "Complex authorization: catalogue roles, least privilege, and tenant separation rules."
                .to_string(),
        );
    }
    if yes("logsSensitiveEvents") {
        notes.push(
            "Security logging present: ensure tamper resistance and monitoring coverage."
                .to_string(),
        );
    }
    if yes("multiTenantDeployment") {
        notes.push(
            "Multi-tenant/cloud deployment: document isolation, secrets, and configuration controls."
                .to_string(),
        );
    }
    if yes("hasFrontendUI") {
        notes.push(
            "Frontend UI detected: emphasise client-side security, content handling, and session controls."
                .to_string(),
        );
    }

    notes
}

fn collect_categories(answers: &Answers) -> BTreeSet<String> {
    let yes = |id: &str| answered_yes(answers, id);
    let mut categories = BTreeSet::new();
    let mut add = |codes: &[&str]| {
        for code in codes {
            categories.insert((*code).to_string());
        }
    };

    if yes("handlesPayments") || yes("storesPII") {
        add(&["V2", "V3", "V6"]);
    }
    if yes("acceptsUserInput") {
        add(&["V5", "V11"]);
    }
    if yes("usesDatabase") {
        add(&["V9", "V10"]);
    }
    if yes("integratesThirdParty") {
        add(&["V12", "V13"]);
    }
    if yes("externallyFacing") {
        add(&["V1", "V2"]);
    }
    if !yes("modernFramework") {
        add(&["V14"]);
    }
    if yes("hasFrontendUI") {
        add(&["V1", "V5", "V11"]);
    }
    if yes("implementsAuthentication") {
        add(&["V2", "V3"]);
    }
    if yes("requiresRoleManagement") {
        add(&["V4"]);
    }
    if yes("logsSensitiveEvents") {
        add(&["V10"]);
    }
    if yes("multiTenantDeployment") {
        add(&["V14"]);
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_taxonomy::application_index;
    use pretty_assertions::assert_eq;

    fn answers_of(yes_ids: &[&str]) -> Answers {
        yes_ids
            .iter()
            .map(|id| ((*id).to_string(), true))
            .collect()
    }

    #[test]
    fn all_negative_answers_stay_at_level_one() {
        let recommendation = score_application(&Answers::new(), Role::Developer, application_index());

        // An unanswered questionnaire still trips the legacy-framework
        // penalty, so the advice is not completely empty.
        assert_eq!(recommendation.level, Level::L1);
        assert_eq!(recommendation.recommended_categories, vec!["V14"]);
        assert_eq!(recommendation.notes.len(), 1);
        assert_eq!(recommendation.application_type, ApplicationType::Web);
        assert_eq!(recommendation.technology, TechnologyChoice::All);
    }

    #[test]
    fn high_risk_answers_escalate_to_level_three() {
        let answers = answers_of(&[
            "handlesPayments",
            "storesPII",
            "externallyFacing",
            "modernFramework",
        ]);
        let recommendation = score_application(&answers, Role::Developer, application_index());

        assert_eq!(recommendation.level, Level::L3);
        assert!(recommendation
            .recommended_categories
            .iter()
            .any(|c| c == "V6"));
        assert!(recommendation.notes.len() >= 3);
    }

    #[test]
    fn mid_band_answers_land_on_level_two() {
        let answers = answers_of(&["externallyFacing", "acceptsUserInput", "modernFramework"]);
        let recommendation = score_application(&answers, Role::Developer, application_index());
        assert_eq!(recommendation.level, Level::L2);
    }

    #[test]
    fn scoring_is_idempotent() {
        let answers = answers_of(&[
            "handlesPayments",
            "hasFrontendUI",
            "usesDatabase",
            "modernFramework",
        ]);
        let first = score_application(&answers, Role::Architect, application_index());
        let second = score_application(&answers, Role::Architect, application_index());
        assert_eq!(first, second);
    }

    #[test]
    fn platform_and_technology_follow_the_guard_order() {
        let answers = answers_of(&["mobileClient", "apiService", "modernFramework"]);
        let recommendation = score_application(&answers, Role::Developer, application_index());
        assert_eq!(recommendation.application_type, ApplicationType::Mobile);
        assert_eq!(recommendation.discipline, Discipline::Mobile);
        assert_eq!(
            recommendation.technology,
            TechnologyChoice::Tag(Technology::Kotlin)
        );

        // A browser UI wins over both platform flags for discipline.
        let answers = answers_of(&["hasFrontendUI", "mobileClient", "modernFramework"]);
        let recommendation = score_application(&answers, Role::Developer, application_index());
        assert_eq!(recommendation.discipline, Discipline::Frontend);
        assert_eq!(
            recommendation.technology,
            TechnologyChoice::Tag(Technology::Typescript)
        );
    }

    #[test]
    fn role_fallback_decides_discipline_without_platform_signals() {
        let base = answers_of(&["modernFramework"]);
        let cases = [
            (Role::Developer, Discipline::Backend),
            (Role::Tester, Discipline::QaEngineer),
            (Role::Architect, Discipline::SecurityEngineer),
            (Role::Executive, Discipline::SecurityEngineer),
            (Role::BusinessAnalyst, Discipline::ProjectManager),
            (Role::DataScientist, Discipline::ProjectManager),
        ];
        for (role, expected) in cases {
            let recommendation = score_application(&base, role, application_index());
            assert_eq!(recommendation.discipline, expected, "{role}");
        }

        let external = answers_of(&["externallyFacing", "modernFramework"]);
        let recommendation = score_application(&external, Role::Developer, application_index());
        assert_eq!(recommendation.discipline, Discipline::Fullstack);
    }

    #[test]
    fn recommended_categories_are_sorted_naturally_and_deduplicated() {
        let answers = answers_of(&[
            "acceptsUserInput",
            "usesDatabase",
            "hasFrontendUI",
            "modernFramework",
        ]);
        let recommendation = score_application(&answers, Role::Developer, application_index());
        // V5/V11 triggered twice (input + UI) must appear once, in natural
        // order.
        assert_eq!(
            recommendation.recommended_categories,
            vec!["V1", "V5", "V9", "V10", "V11"]
        );
    }

    #[test]
    fn categories_missing_from_the_loaded_standard_are_dropped() {
        let raw = r#"{
            "name": "Slim", "shortName": "SLIM", "version": "0.1",
            "categories": [
                {"code": "V5", "name": "Validation", "sections": [
                    {"code": "V5.1", "name": "Input", "items": [
                        {"id": "V5.1.1", "description": "x", "level": 1}
                    ]}
                ]}
            ]
        }"#;
        let slim = TaxonomyIndex::from_json_str(raw).unwrap();
        let answers = answers_of(&["acceptsUserInput", "modernFramework"]);
        let recommendation = score_application(&answers, Role::Developer, &slim);
        // V11 and V14 do not exist in the slim standard.
        assert_eq!(recommendation.recommended_categories, vec!["V5"]);
    }
}
