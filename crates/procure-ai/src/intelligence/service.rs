use serde::{Deserialize, Serialize};

use super::confidence::{
    ConfidenceDescriptor, InternalSourcePolicy, ResponseSources, SourceConfidenceClassifier,
    SourceRef,
};
use super::context::{build_data_context, ContextOptions};
use super::domain::{Intent, Surface};
use super::selection::{escalate, resolve, Escalation, Resolution, SelectionEngine};

/// Selection request: intent, target surface and whatever data is at hand.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    pub intent: Intent,
    pub surface: Surface,
    #[serde(flatten)]
    pub options: ContextOptions,
    /// Also run the expand-to-detail pass for the next richer surface.
    #[serde(default)]
    pub include_expansion: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub resolution: Resolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expansion: Option<Escalation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceRequest {
    pub sources: ResponseSources,
    /// Flat tagged references, merged into `sources`.
    pub source_refs: Vec<SourceRef>,
    pub detected_category: Option<String>,
    pub managed_categories: Option<Vec<String>>,
}

/// Facade pairing the selection engine with the confidence classifier.
#[derive(Debug, Clone)]
pub struct IntelligenceService {
    engine: SelectionEngine<'static>,
    classifier: SourceConfidenceClassifier,
    default_managed_categories: Vec<String>,
}

impl Default for IntelligenceService {
    fn default() -> Self {
        Self::new(InternalSourcePolicy::default(), Vec::new())
    }
}

impl IntelligenceService {
    pub fn new(policy: InternalSourcePolicy, default_managed_categories: Vec<String>) -> Self {
        Self {
            engine: SelectionEngine::standard(),
            classifier: SourceConfidenceClassifier::new(policy),
            default_managed_categories,
        }
    }

    pub fn engine(&self) -> &SelectionEngine<'static> {
        &self.engine
    }

    pub fn select(&self, request: SelectionRequest) -> SelectionResponse {
        let SelectionRequest {
            intent,
            surface,
            options,
            include_expansion,
        } = request;

        let context = build_data_context(intent, options);
        let resolution = resolve(&self.engine, &context, surface);
        let expansion = if include_expansion {
            escalate(&self.engine, &context, surface)
        } else {
            None
        };

        SelectionResponse {
            resolution,
            expansion,
        }
    }

    /// Request-supplied managed categories take precedence over the configured defaults.
    pub fn confidence(&self, request: ConfidenceRequest) -> ConfidenceDescriptor {
        let ConfidenceRequest {
            mut sources,
            source_refs,
            detected_category,
            managed_categories,
        } = request;

        let flat = ResponseSources::partition(source_refs);
        sources.internal.extend(flat.internal);
        sources.web.extend(flat.web);

        let managed = managed_categories.unwrap_or_else(|| self.default_managed_categories.clone());
        self.classifier
            .classify(&sources, detected_category.as_deref(), Some(managed.as_slice()))
    }
}
