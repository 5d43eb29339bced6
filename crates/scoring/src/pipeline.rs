//! Questionnaire scoring for the pipeline standard.
//!
//! Unlike the application scorer's straight-line weight checks, the pipeline
//! rules are uniform enough to live in one static table. Rules are evaluated
//! in table order, so note emission order is fixed.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use checklist_protocol::Level;
use checklist_taxonomy::PipelineIndex;

use crate::normalize_focus;
use crate::questions::{answered_yes, Answers};

const L2_THRESHOLD: u32 = 5;
const L3_THRESHOLD: u32 = 10;

struct ScoringRule {
    question: &'static str,
    weight: u32,
    categories: &'static [&'static str],
    subcategories: &'static [&'static str],
    note: &'static str,
}

static RULES: &[ScoringRule] = &[
    ScoringRule {
        question: "handlesPayments",
        weight: 3,
        categories: &["V1", "V4"],
        subcategories: &["V1.1", "V4.4"],
        note: "Financial workloads in the release path: tighten access control and deployment verification.",
    },
    ScoringRule {
        question: "usesHostedRunners",
        weight: 2,
        categories: &["V3"],
        subcategories: &["V3.1"],
        note: "Shared/hosted runners detected: harden the build environment and enforce isolation.",
    },
    ScoringRule {
        question: "usesSelfHostedRunners",
        weight: 2,
        categories: &["V3"],
        subcategories: &["V3.1"],
        note: "Self-hosted runners require patch management, credential rotation, and tamper monitoring.",
    },
    ScoringRule {
        question: "managesPipelineSecrets",
        weight: 2,
        categories: &["V2", "V3"],
        subcategories: &["V2.5", "V3.2"],
        note: "Pipeline-managed secrets: emphasise vaulting, rotation, and least privilege across toolchains.",
    },
    ScoringRule {
        question: "deploysToProduction",
        weight: 3,
        categories: &["V4"],
        subcategories: &["V4.3", "V4.4"],
        note: "Production automation in scope: tighten release approvals, deployment controls, and rollback plans.",
    },
    ScoringRule {
        question: "supportsMultipleEnvironments",
        weight: 1,
        categories: &["V4"],
        subcategories: &["V4.2"],
        note: "Multi-environment promotion: standardise approvals and environment parity checks.",
    },
    ScoringRule {
        question: "integratesThirdPartyServices",
        weight: 2,
        categories: &["V2"],
        subcategories: &["V2.6", "V3.3"],
        note: "Third-party integrations present: vet plug-ins, pin versions, and monitor marketplace risk.",
    },
    ScoringRule {
        question: "managesInfrastructureAsCode",
        weight: 2,
        categories: &["V3", "V4"],
        subcategories: &["V3.4", "V4.1"],
        note: "IaC orchestration: enforce policy-as-code, scanning, and artifact integrity before rollout.",
    },
    ScoringRule {
        question: "handlesSensitiveCode",
        weight: 2,
        categories: &["V1", "V5"],
        subcategories: &["V1.1", "V5.2"],
        note: "Sensitive code/data detected: tighten identity, access reviews, and operational enforcement.",
    },
    ScoringRule {
        question: "requiresAuditTrail",
        weight: 2,
        categories: &["V5"],
        subcategories: &["V5.1", "V5.4"],
        note: "Audit requirements present: implement immutable logging, alert routing, and retention baselines.",
    },
    ScoringRule {
        question: "usesAttestationOrSigning",
        weight: 2,
        categories: &["V3", "V4"],
        subcategories: &["V3.4", "V4.3"],
        note: "Artifact attestation required: enforce signing, provenance, and verification gates.",
    },
];

/// Scored outcome of the pipeline questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineRecommendation {
    pub level: Level,
    pub focus_categories: Vec<String>,
    pub focus_subcategories: Vec<String>,
    pub notes: Vec<String>,
}

/// Score the pipeline questionnaire. Deterministic for a given answer map;
/// the index is only consulted to drop focus codes absent from the loaded
/// standard.
#[must_use]
pub fn score_pipeline(answers: &Answers, index: &PipelineIndex) -> PipelineRecommendation {
    let mut score = 0u32;
    let mut categories = BTreeSet::new();
    let mut subcategories = BTreeSet::new();
    let mut notes = Vec::new();

    for rule in RULES {
        if !answered_yes(answers, rule.question) {
            continue;
        }
        score += rule.weight;
        for code in rule.categories {
            categories.insert((*code).to_string());
        }
        for code in rule.subcategories {
            subcategories.insert((*code).to_string());
        }
        notes.push(rule.note.to_string());
    }

    let level = determine_level(score);
    log::debug!("Pipeline questionnaire scored {score} -> {level}");

    PipelineRecommendation {
        level,
        focus_categories: normalize_focus(categories, |code| index.has_category(code)),
        focus_subcategories: normalize_focus(subcategories, |code| index.has_subcategory(code)),
        notes,
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
