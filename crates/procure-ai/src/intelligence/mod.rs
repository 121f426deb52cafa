//! Decision layer for the procurement intelligence assistant.
//!
//! Two independent subsystems live here: component selection (which
//! presentation component renders a turn, at which surface) and source
//! confidence (how far the evidence behind a response can be trusted). Both
//! are pure functions of their inputs.

pub mod confidence;
pub mod context;
pub mod domain;
pub mod import;
pub mod router;
pub mod selection;
pub mod service;
pub mod widget;

#[cfg(test)]
mod tests;

pub use confidence::{
    calculate_source_confidence, ConfidenceDescriptor, ConfidenceLevel, InternalSourcePolicy,
    ResponseSources, SourceConfidenceClassifier,
};
pub use context::{build_data_context, ContextOptions, DataContext, DataKind};
pub use domain::{
    Intent, PortfolioSnapshot, RiskChange, RiskDistribution, RiskLevel, SubIntent, Supplier,
    Surface,
};
pub use import::{SupplierCsvImporter, SupplierImportError};
pub use router::intelligence_router;
pub use selection::{
    escalate, resolve, select_component, widget_config, ComponentConfig, ComponentId, Escalation,
    Resolution, SelectionEngine, SelectionRule,
};
pub use service::{
    ConfidenceRequest, IntelligenceService, SelectionRequest, SelectionResponse,
};
pub use widget::WidgetPayload;
