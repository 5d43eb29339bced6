//! Answered questionnaires bundled with their scored outcome.

use serde::{Deserialize, Serialize};

use checklist_protocol::Role;

use crate::application::ApplicationRecommendation;
use crate::pipeline::PipelineRecommendation;
use crate::questions::Answers;

/// A completed application questionnaire: who answered, what they answered,
/// and what the scorer concluded at that time. The recommendation is a
/// snapshot; re-scoring the same answers later may differ only if the
/// weight tables change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub role: Role,
    pub answers: Answers,
    pub recommendation: ApplicationRecommendation,
}

/// A completed pipeline questionnaire with its scored outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSubmission {
    pub answers: Answers,
    pub recommendation: PipelineRecommendation,
}
