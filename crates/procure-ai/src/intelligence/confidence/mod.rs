pub mod matcher;
mod sources;

pub use matcher::{find_managed_category, matches_managed_category};
pub use sources::{
    InternalSource, ProviderType, ResponseSources, SourceOrigin, SourceRef, WebSource,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum proprietary sources for a trust badge on a managed category.
const MANAGED_CATEGORY_THRESHOLD: usize = 2;
/// Minimum proprietary sources for a trust badge on any category.
const STRONG_COVERAGE_THRESHOLD: usize = 3;
const PARTIAL_COVERAGE_THRESHOLD: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
    WebOnly,
}

impl ConfidenceLevel {
    pub const fn badge_label(self) -> &'static str {
        match self {
            Self::High => "High confidence",
            Self::Medium => "Medium confidence",
            Self::Low => "Low confidence",
            Self::WebOnly => "Web sources only",
        }
    }
}

/// Which internal sources count toward the coverage thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InternalSourcePolicy {
    /// Only sources tagged with the proprietary provider.
    #[default]
    ProprietaryOnly,
    /// Every internal source, whatever its provider.
    AnyInternal,
}

impl InternalSourcePolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "proprietary" | "proprietary_only" => Some(Self::ProprietaryOnly),
            "any" | "any_internal" => Some(Self::AnyInternal),
            _ => None,
        }
    }

    fn count(self, sources: &ResponseSources) -> usize {
        match self {
            Self::ProprietaryOnly => sources.proprietary_count(),
            Self::AnyInternal => sources.internal.len(),
        }
    }
}

/// Trust assessment for the evidence behind a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceDescriptor {
    pub level: ConfidenceLevel,
    pub reason: String,
    pub is_managed_category: bool,
    pub matched_category: Option<String>,
    pub beroe_source_count: usize,
    pub web_source_count: usize,
    pub show_expand_to_web: bool,
}

/// Ordered decision list over source counts and managed-category membership.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceConfidenceClassifier {
    policy: InternalSourcePolicy,
}

impl SourceConfidenceClassifier {
    pub fn new(policy: InternalSourcePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InternalSourcePolicy {
        self.policy
    }

    pub fn classify<S: AsRef<str>>(
        &self,
        sources: &ResponseSources,
        detected_category: Option<&str>,
        managed_categories: Option<&[S]>,
    ) -> ConfidenceDescriptor {
        let internal = self.policy.count(sources);
        let web = sources.web.len();
        let matched_category = match (detected_category, managed_categories) {
            (Some(detected), Some(managed)) => find_managed_category(detected, managed),
            _ => None,
        };
        let is_managed_category = matched_category.is_some();

        let (level, reason, show_expand_to_web) =
            if is_managed_category && internal >= MANAGED_CATEGORY_THRESHOLD {
                (
                    ConfidenceLevel::High,
                    "comprehensive coverage for this category",
                    false,
                )
            } else if internal >= STRONG_COVERAGE_THRESHOLD {
                (ConfidenceLevel::High, "strong internal data coverage", false)
            } else if internal >= PARTIAL_COVERAGE_THRESHOLD {
                (
                    ConfidenceLevel::Medium,
                    "partial internal data available",
                    true,
                )
            } else if web > 0 {
                (ConfidenceLevel::WebOnly, "based on external research", false)
            } else {
                (ConfidenceLevel::Low, "limited source data available", true)
            };

        debug!(
            level = ?level,
            internal,
            web,
            managed = is_managed_category,
            policy = ?self.policy,
            "classified source confidence"
        );

        ConfidenceDescriptor {
            level,
            reason: reason.to_string(),
            is_managed_category,
            matched_category: matched_category.map(str::to_string),
            beroe_source_count: internal,
            web_source_count: web,
            show_expand_to_web,
        }
    }
}

/// Classify with the default proprietary-only counting policy.
pub fn calculate_source_confidence<S: AsRef<str>>(
    sources: &ResponseSources,
    detected_category: Option<&str>,
    managed_categories: Option<&[S]>,
) -> ConfidenceDescriptor {
    SourceConfidenceClassifier::default().classify(sources, detected_category, managed_categories)
}
