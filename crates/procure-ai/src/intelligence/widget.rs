use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::domain::{RiskDistribution, Supplier};

/// Free-form widget produced by the response-generation model.
///
/// Used as an escape hatch when no structured domain data fits the turn. Known
/// type tags decode into typed variants; anything else is preserved verbatim
/// in `Unknown` so the renderer can surface a labeled placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWidgetPayload", into = "RawWidgetPayload")]
pub enum WidgetPayload {
    RiskDistribution(RiskDistribution),
    SupplierTable(SupplierTableData),
    SupplierRiskCard(Supplier),
    PriceGauge(PriceGaugeData),
    AlertCard(AlertCardData),
    MetricRow(MetricRowData),
    TrendChart(TrendChartData),
    Unknown { type_tag: String, data: Value },
}

impl WidgetPayload {
    pub const RISK_DISTRIBUTION: &'static str = "risk_distribution";
    pub const SUPPLIER_TABLE: &'static str = "supplier_table";
    pub const SUPPLIER_RISK_CARD: &'static str = "supplier_risk_card";
    pub const PRICE_GAUGE: &'static str = "price_gauge";
    pub const ALERT_CARD: &'static str = "alert_card";
    pub const METRIC_ROW: &'static str = "metric_row";
    pub const TREND_CHART: &'static str = "trend_chart";

    /// Decode a raw `{ type, data }` pair.
    pub fn from_parts(type_tag: &str, data: Value) -> Self {
        match type_tag {
            Self::RISK_DISTRIBUTION => decode(type_tag, data, Self::RiskDistribution),
            Self::SUPPLIER_TABLE => decode(type_tag, data, Self::SupplierTable),
            Self::SUPPLIER_RISK_CARD => decode(type_tag, data, Self::SupplierRiskCard),
            Self::PRICE_GAUGE => decode(type_tag, data, Self::PriceGauge),
            Self::ALERT_CARD => decode(type_tag, data, Self::AlertCard),
            Self::METRIC_ROW => decode(type_tag, data, Self::MetricRow),
            Self::TREND_CHART => decode(type_tag, data, Self::TrendChart),
            other => Self::Unknown {
                type_tag: other.to_string(),
                data,
            },
        }
    }

    pub fn type_tag(&self) -> &str {
        match self {
            Self::RiskDistribution(_) => Self::RISK_DISTRIBUTION,
            Self::SupplierTable(_) => Self::SUPPLIER_TABLE,
            Self::SupplierRiskCard(_) => Self::SUPPLIER_RISK_CARD,
            Self::PriceGauge(_) => Self::PRICE_GAUGE,
            Self::AlertCard(_) => Self::ALERT_CARD,
            Self::MetricRow(_) => Self::METRIC_ROW,
            Self::TrendChart(_) => Self::TREND_CHART,
            Self::Unknown { type_tag, .. } => type_tag,
        }
    }

    /// Data blob as JSON, regardless of variant.
    pub fn data(&self) -> Value {
        let encoded = match self {
            Self::RiskDistribution(data) => serde_json::to_value(data),
            Self::SupplierTable(data) => serde_json::to_value(data),
            Self::SupplierRiskCard(data) => serde_json::to_value(data),
            Self::PriceGauge(data) => serde_json::to_value(data),
            Self::AlertCard(data) => serde_json::to_value(data),
            Self::MetricRow(data) => serde_json::to_value(data),
            Self::TrendChart(data) => serde_json::to_value(data),
            Self::Unknown { data, .. } => return data.clone(),
        };
        encoded.unwrap_or(Value::Null)
    }
}

fn decode<T, F>(type_tag: &str, data: Value, wrap: F) -> WidgetPayload
where
    T: DeserializeOwned,
    F: FnOnce(T) -> WidgetPayload,
{
    match serde_json::from_value::<T>(data.clone()) {
        Ok(decoded) => wrap(decoded),
        Err(err) => {
            warn!(type_tag, error = %err, "widget payload data does not match its type tag");
            WidgetPayload::Unknown {
                type_tag: type_tag.to_string(),
                data,
            }
        }
    }
}

/// Wire shape of a widget payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWidgetPayload {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub data: Value,
}

impl From<RawWidgetPayload> for WidgetPayload {
    fn from(raw: RawWidgetPayload) -> Self {
        Self::from_parts(&raw.type_tag, raw.data)
    }
}

impl From<WidgetPayload> for RawWidgetPayload {
    fn from(payload: WidgetPayload) -> Self {
        Self {
            type_tag: payload.type_tag().to_string(),
            data: payload.data(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierTableData {
    #[serde(default)]
    pub title: Option<String>,
    pub suppliers: Vec<Supplier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceGaugeData {
    pub commodity: String,
    pub current_price: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub change_percent: Option<f64>,
    #[serde(default)]
    pub range_low: Option<f64>,
    #[serde(default)]
    pub range_high: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertCardData {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub change: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRowData {
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendChartData {
    #[serde(default)]
    pub title: Option<String>,
    pub points: Vec<TrendPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_type_tags_decode_into_typed_variants() {
        let payload: WidgetPayload = serde_json::from_value(json!({
            "type": "alert_card",
            "data": { "title": "Port strike", "message": "Rotterdam delays", "severity": "warning" }
        }))
        .expect("payload decodes");

        match payload {
            WidgetPayload::AlertCard(card) => {
                assert_eq!(card.severity, AlertSeverity::Warning);
                assert_eq!(card.title, "Port strike");
            }
            other => panic!("expected alert card, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_tags_are_preserved() {
        let payload: WidgetPayload = serde_json::from_value(json!({
            "type": "sankey_flow",
            "data": { "nodes": [] }
        }))
        .expect("payload decodes");

        assert_eq!(payload.type_tag(), "sankey_flow");
        assert!(matches!(payload, WidgetPayload::Unknown { .. }));
    }

    #[test]
    fn mismatched_data_falls_back_to_unknown_with_original_tag() {
        let payload = WidgetPayload::from_parts("price_gauge", json!({ "commodity": 42 }));

        assert_eq!(payload.type_tag(), "price_gauge");
        assert!(matches!(payload, WidgetPayload::Unknown { .. }));
    }

    #[test]
    fn serializes_back_to_type_and_data() {
        let payload = WidgetPayload::MetricRow(MetricRowData {
            metrics: vec![Metric {
                label: "Spend".to_string(),
                value: "$4.2M".to_string(),
                change: None,
            }],
        });

        let encoded = serde_json::to_value(&payload).expect("payload encodes");
        assert_eq!(encoded["type"], "metric_row");
        assert_eq!(encoded["data"]["metrics"][0]["label"], "Spend");
    }
}
