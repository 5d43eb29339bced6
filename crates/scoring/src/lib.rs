//! Questionnaire catalogs and recommendation scoring.
//!
//! Two scorers share one shape: read a boolean answer map, accumulate a
//! weighted score, map it through fixed thresholds to a recommended level,
//! and collect advisory notes plus focus category codes. Both are pure
//! functions of their inputs; the standard indexes are consulted read-only
//! to validate focus codes.

use std::collections::BTreeSet;

use checklist_protocol::natural_cmp;

mod application;
mod pipeline;
mod questions;
mod submission;

pub use application::{score_application, ApplicationRecommendation};
pub use pipeline::{score_pipeline, PipelineRecommendation};
pub use questions::{answered_yes, Answers, Question, APPLICATION_QUESTIONS, PIPELINE_QUESTIONS};
pub use submission::{ApplicationSubmission, PipelineSubmission};

/// Upper-case focus codes, keep only those the loaded standard actually
/// defines, and return them in natural order.
fn normalize_focus(codes: BTreeSet<String>, is_valid: impl Fn(&str) -> bool) -> Vec<String> {
    let mut kept: Vec<String> = codes
        .into_iter()
        .map(|code| code.to_uppercase())
        .filter(|code| is_valid(code))
        .collect();
    kept.sort_by(|a, b| natural_cmp(a, b));
    kept.dedup();
    kept
}
