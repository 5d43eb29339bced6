//! Static questionnaire catalogs.
//!
//! Both catalogs are fixed, ordered lists; answers reference questions by
//! id, and note emission follows catalog order. Questions are never mutated
//! at runtime.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

/// One yes/no questionnaire question. Catalog entries are static data;
/// they serialize out but are never read back in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
    pub tags: &'static [&'static str],
}

/// Boolean answers keyed by question id. A missing key means "no"; it is
/// never an error.
pub type Answers = HashMap<String, bool>;

/// Whether a question was answered affirmatively.
#[must_use]
pub fn answered_yes(answers: &Answers, question_id: &str) -> bool {
    answers.get(question_id).copied().unwrap_or(false)
}

/// Questionnaire for the application standard, in presentation (and note
/// emission) order.
pub static APPLICATION_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        Question {
            id: "handlesPayments",
            text: "Does the application handle payment transactions or store financial data?",
            help_text: Some(
                "Payment or financial workflows raise the bar for integrity and fraud protections.",
            ),
            tags: &["risk", "financial"],
        },
        Question {
            id: "storesPII",
            text: "Does the application store personally identifiable information (PII) or regulated data?",
            help_text: Some(
                "PII and regulated data typically require stronger controls and evidencing.",
            ),
            tags: &["risk", "privacy"],
        },
        Question {
            id: "externallyFacing",
            text: "Is the application externally facing / internet accessible?",
            help_text: None,
            tags: &["risk"],
        },
        Question {
            id: "acceptsUserInput",
            text: "Does the application accept untrusted user input or user generated content?",
            help_text: None,
            tags: &["validation"],
        },
        Question {
            id: "usesDatabase",
            text: "Does the application persist data in a database or data store?",
            help_text: None,
            tags: &["data"],
        },
        Question {
            id: "integratesThirdParty",
            text: "Does the application integrate with third-party APIs or services?",
            help_text: None,
            tags: &["third-party"],
        },
        Question {
            id: "modernFramework",
            text: "Is the application built with modern, actively maintained frameworks?",
            help_text: Some(
                "Legacy stacks often need additional hardening and patch-management focus.",
            ),
            tags: &["stack"],
        },
        Question {
            id: "hasFrontendUI",
            text: "Does the application provide a browser-based user interface for end-users?",
            help_text: None,
            tags: &["ui", "frontend"],
        },
        Question {
            id: "implementsAuthentication",
            text: "Does the application implement authentication or integrate with an identity provider (SSO/IdP)?",
            help_text: None,
            tags: &["auth"],
        },
        Question {
            id: "requiresRoleManagement",
            text: "Do you need role-based access control or multi-tenant authorization separation?",
            help_text: None,
            tags: &["authz"],
        },
        Question {
            id: "logsSensitiveEvents",
            text: "Does the application generate audit or security-relevant logs that require protection?",
            help_text: None,
            tags: &["logging", "monitoring"],
        },
        Question {
            id: "multiTenantDeployment",
            text: "Will the application run in a shared cloud or multi-tenant environment (SaaS)?",
            help_text: Some(
                "Shared environments raise expectations around isolation, configuration, and secrets management.",
            ),
            tags: &["deployment"],
        },
        Question {
            id: "mobileClient",
            text: "Does the solution include a native or mobile client?",
            help_text: None,
            tags: &["platform"],
        },
        Question {
            id: "apiService",
            text: "Is the solution primarily an API or service consumed programmatically?",
            help_text: None,
            tags: &["platform"],
        },
    ]
});

/// Questionnaire for the pipeline standard, in presentation (and note
/// emission) order.
pub static PIPELINE_QUESTIONS: Lazy<Vec<Question>> = Lazy::new(|| {
    vec![
        Question {
            id: "handlesPayments",
            text: "Does the pipeline build or deploy services that process payment or financial data?",
            help_text: Some(
                "Financial workloads raise the assurance bar for every stage of the release path.",
            ),
            tags: &["risk", "governance"],
        },
        Question {
            id: "usesHostedRunners",
            text: "Does your CI/CD pipeline rely on shared or SaaS-hosted runners/agents?",
            help_text: Some(
                "Hosted runners increase exposure to shared infrastructure risk and require stronger hardening.",
            ),
            tags: &["environment", "integrate"],
        },
        Question {
            id: "usesSelfHostedRunners",
            text: "Do you operate self-hosted runners or build agents within your own infrastructure?",
            help_text: Some(
                "Self-hosted runners require patching, credential hygiene, and isolation controls.",
            ),
            tags: &["environment", "integrate"],
        },
        Question {
            id: "managesPipelineSecrets",
            text: "Does the pipeline manage or inject credentials, secrets, or signing keys?",
            help_text: Some(
                "Secret storage, rotation, and least-privilege policies are critical when pipelines broker credentials.",
            ),
            tags: &["secrets", "integrate"],
        },
        Question {
            id: "deploysToProduction",
            text: "Can the pipeline promote changes directly into production systems?",
            help_text: Some(
                "Production deployments through automation typically require advanced change control and release governance.",
            ),
            tags: &["release", "operate"],
        },
        Question {
            id: "supportsMultipleEnvironments",
            text: "Does the pipeline orchestrate multiple environments (dev/test/stage/prod)?",
            help_text: Some(
                "Promotion across environments demands guardrails around approvals, artifact integrity, and configuration drift.",
            ),
            tags: &["release"],
        },
        Question {
            id: "integratesThirdPartyServices",
            text: "Does the pipeline rely on third-party integrations or marketplace plug-ins?",
            help_text: Some(
                "Third-party components introduce supply chain risk and require vetting, monitoring, and fallback plans.",
            ),
            tags: &["supply-chain"],
        },
        Question {
            id: "managesInfrastructureAsCode",
            text: "Does the pipeline apply infrastructure as code (IaC) or configuration changes?",
            help_text: Some(
                "IaC pipelines must enforce policy-as-code, change reviews, and drift detection to avoid production misconfigurations.",
            ),
            tags: &["iac", "release"],
        },
        Question {
            id: "handlesSensitiveCode",
            text: "Does the pipeline process proprietary, regulated, or otherwise sensitive source code or data?",
            help_text: Some(
                "Higher-sensitivity codebases require tightened access controls, auditing, and monitoring throughout the toolchain.",
            ),
            tags: &["governance"],
        },
        Question {
            id: "requiresAuditTrail",
            text: "Do compliance or governance programs require immutable audit trails for pipeline activity?",
            help_text: Some(
                "Operational accountability pressures logging, detection, and incident response capabilities in release pipelines.",
            ),
            tags: &["compliance", "operate"],
        },
        Question {
            id: "usesAttestationOrSigning",
            text: "Do you require artifact signing, attestations, or provenance tracking before releases?",
            help_text: Some(
                "Integrity controls tie directly into the Integrate and Release practices, especially around artifact verification.",
            ),
            tags: &["integrity", "release"],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_are_unique_per_catalog() {
        for catalog in [&*APPLICATION_QUESTIONS, &*PIPELINE_QUESTIONS] {
            let mut ids: Vec<&str> = catalog.iter().map(|q| q.id).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), before);
        }
    }

    #[test]
    fn missing_answers_read_as_no() {
        let answers = Answers::new();
        assert!(!answered_yes(&answers, "handlesPayments"));

        let mut answers = Answers::new();
        answers.insert("handlesPayments".to_string(), true);
        assert!(answered_yes(&answers, "handlesPayments"));
    }

    #[test]
    fn catalogs_have_expected_sizes() {
        assert_eq!(APPLICATION_QUESTIONS.len(), 14);
        assert_eq!(PIPELINE_QUESTIONS.len(), 11);
    }
}
