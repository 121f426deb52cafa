use serde::Serialize;
use tracing::{debug, warn};

use super::rules::handoff_applies;
use super::{ComponentConfig, ComponentId, SelectionEngine};
use crate::intelligence::context::DataContext;
use crate::intelligence::domain::Surface;
use crate::intelligence::widget::WidgetPayload;

/// What the renderer should do for a turn once every fallback has been tried.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Component { config: ComponentConfig },
    /// Nothing to render, either by rule or because no data fits.
    NoPresentation,
    /// A widget arrived with a type tag no renderer handles.
    Placeholder {
        #[serde(rename = "typeTag")]
        type_tag: String,
    },
}

impl Resolution {
    pub fn config(&self) -> Option<&ComponentConfig> {
        match self {
            Self::Component { config } => Some(config),
            _ => None,
        }
    }

    pub fn placeholder_label(&self) -> Option<String> {
        match self {
            Self::Placeholder { type_tag } => Some(format!("Unsupported widget type: {type_tag}")),
            _ => None,
        }
    }
}

/// Type-keyed lookup that turns a generic widget payload straight into a config.
///
/// Returns `None` for unknown type tags.
pub fn widget_config(payload: &WidgetPayload, surface: Surface) -> Option<ComponentConfig> {
    let component = match payload {
        WidgetPayload::RiskDistribution(_) => ComponentId::RiskDistributionWidget,
        WidgetPayload::SupplierTable(_) => ComponentId::SupplierTable,
        WidgetPayload::SupplierRiskCard(_) => ComponentId::SupplierRiskCard,
        WidgetPayload::PriceGauge(_) => ComponentId::PriceGauge,
        WidgetPayload::AlertCard(_) => ComponentId::AlertCard,
        WidgetPayload::MetricRow(_) => ComponentId::MetricRow,
        WidgetPayload::TrendChart(_) => ComponentId::ScoreTrendChart,
        WidgetPayload::Unknown { .. } => return None,
    };

    let mut config = ComponentConfig::for_surface(component, surface);
    match payload {
        WidgetPayload::RiskDistribution(distribution) => {
            config = config
                .with_prop("distribution", distribution)
                .with_prop("totalSuppliers", distribution.total())
                .with_prop("percentages", distribution.percentages());
        }
        WidgetPayload::SupplierTable(table) => {
            config = config
                .with_prop("title", &table.title)
                .with_prop("suppliers", &table.suppliers)
                .with_prop("totalCount", table.suppliers.len());
        }
        WidgetPayload::SupplierRiskCard(supplier) => {
            config = config.with_prop("supplier", supplier);
        }
        other => {
            if let serde_json::Value::Object(fields) = other.data() {
                config.props.extend(fields);
            }
        }
    }

    Some(config.with_prop("source", "widget"))
}

/// Run selection, then the caller-side fallback chain.
///
/// Order: rule selection, type-keyed widget lookup, labeled placeholder for
/// unknown widget types, and finally "no presentation". Widgets are never
/// rendered for turns that require a handoff.
pub fn resolve(engine: &SelectionEngine<'_>, context: &DataContext, surface: Surface) -> Resolution {
    if let Some(config) = engine.select(context, surface) {
        if config.renders_nothing() {
            return Resolution::NoPresentation;
        }
        return Resolution::Component { config };
    }

    let Some(payload) = context.widget.as_ref() else {
        return Resolution::NoPresentation;
    };

    if handoff_applies(context) {
        warn!(
            type_tag = payload.type_tag(),
            intent = context.intent.label(),
            "widget withheld from a turn that requires handoff"
        );
        return Resolution::NoPresentation;
    }

    match widget_config(payload, surface) {
        Some(config) => {
            debug!(
                type_tag = payload.type_tag(),
                component = config.component.name(),
                "resolved widget payload by type tag"
            );
            Resolution::Component { config }
        }
        None => {
            warn!(
                type_tag = payload.type_tag(),
                intent = context.intent.label(),
                "unrecognized widget type; rendering placeholder"
            );
            Resolution::Placeholder {
                type_tag: payload.type_tag().to_string(),
            }
        }
    }
}
