use metrics_exporter_prometheus::PrometheusHandle;
use procure_ai::config::IntelligenceConfig;
use procure_ai::error::AppError;
use procure_ai::intelligence::IntelligenceService;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn intelligence_service(config: &IntelligenceConfig) -> IntelligenceService {
    IntelligenceService::new(
        config.internal_source_policy,
        config.managed_categories.clone(),
    )
}

/// Clap value parser for the snake_case wire names of intents, surfaces and sub-intents.
pub(crate) fn parse_wire_enum<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("'{raw}' is not a recognized value"))
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_ai::intelligence::{Intent, InternalSourcePolicy, SubIntent, Surface};

    #[test]
    fn wire_enum_parser_accepts_cli_spellings() {
        assert_eq!(
            parse_wire_enum::<Intent>("portfolio-overview"),
            Ok(Intent::PortfolioOverview)
        );
        assert_eq!(parse_wire_enum::<Surface>("Panel"), Ok(Surface::Panel));
        assert_eq!(
            parse_wire_enum::<SubIntent>("score_inquiry"),
            Ok(SubIntent::ScoreInquiry)
        );
        assert!(parse_wire_enum::<Surface>("sidebar").is_err());
    }

    #[test]
    fn service_uses_configured_categories() {
        let service = intelligence_service(&IntelligenceConfig {
            managed_categories: vec!["Copper".to_string()],
            internal_source_policy: InternalSourcePolicy::AnyInternal,
        });
        let descriptor = service.confidence(procure_ai::intelligence::ConfidenceRequest {
            detected_category: Some("copper".to_string()),
            ..Default::default()
        });
        assert!(descriptor.is_managed_category);
    }
}
