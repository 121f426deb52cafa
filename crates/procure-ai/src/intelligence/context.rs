use serde::{Deserialize, Serialize};

use super::domain::{
    Intent, PortfolioSnapshot, ResponseMetadata, RiskChange, SubIntent, Supplier,
};
use super::widget::WidgetPayload;

/// Kinds of data a selection rule can require before it may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    Portfolio,
    Suppliers,
    /// Two or more suppliers, enough to compare side by side.
    SupplierSet,
    FocusSupplier,
    RiskChanges,
    Widget,
}

/// Optional inputs gathered by upstream systems for a single turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextOptions {
    pub sub_intent: Option<SubIntent>,
    pub portfolio: Option<PortfolioSnapshot>,
    pub suppliers: Vec<Supplier>,
    pub supplier: Option<Supplier>,
    pub risk_changes: Vec<RiskChange>,
    pub widget: Option<WidgetPayload>,
    pub result_count: Option<usize>,
    pub requires_handoff: bool,
}

/// Uniform, immutable decision input for the selection engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataContext {
    pub intent: Intent,
    pub sub_intent: Option<SubIntent>,
    pub portfolio: Option<PortfolioSnapshot>,
    pub suppliers: Vec<Supplier>,
    pub focus_supplier: Option<Supplier>,
    pub risk_changes: Vec<RiskChange>,
    pub widget: Option<WidgetPayload>,
    pub metadata: ResponseMetadata,
}

impl DataContext {
    pub fn has(&self, kind: DataKind) -> bool {
        match kind {
            DataKind::Portfolio => self.portfolio.is_some(),
            DataKind::Suppliers => !self.suppliers.is_empty(),
            DataKind::SupplierSet => self.suppliers.len() >= 2,
            DataKind::FocusSupplier => self.focus_supplier.is_some(),
            DataKind::RiskChanges => !self.risk_changes.is_empty(),
            DataKind::Widget => self.widget.is_some(),
        }
    }

    pub fn has_all(&self, kinds: &[DataKind]) -> bool {
        kinds.iter().all(|kind| self.has(*kind))
    }
}

/// Assemble a data context, applying the focus-supplier and result-count defaults.
pub fn build_data_context(intent: Intent, options: ContextOptions) -> DataContext {
    let ContextOptions {
        sub_intent,
        portfolio,
        suppliers,
        supplier,
        risk_changes,
        widget,
        result_count,
        requires_handoff,
    } = options;

    let focus_supplier = supplier.or_else(|| suppliers.first().cloned());
    let result_count = result_count.unwrap_or(suppliers.len());

    DataContext {
        intent,
        sub_intent,
        portfolio,
        suppliers,
        focus_supplier,
        risk_changes,
        widget,
        metadata: ResponseMetadata {
            result_count,
            requires_handoff,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intelligence::domain::RiskLevel;

    fn supplier(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: format!("Supplier {id}"),
            category: None,
            country: None,
            spend: None,
            risk_score: None,
            risk_level: RiskLevel::Unrated,
            trend: None,
        }
    }

    #[test]
    fn empty_options_carry_only_the_intent() {
        let context = build_data_context(Intent::General, ContextOptions::default());

        assert_eq!(context.intent, Intent::General);
        assert!(context.portfolio.is_none());
        assert!(context.suppliers.is_empty());
        assert!(context.focus_supplier.is_none());
        assert!(context.widget.is_none());
        assert_eq!(context.metadata, ResponseMetadata::default());
    }

    #[test]
    fn focus_supplier_defaults_to_first_listed() {
        let context = build_data_context(
            Intent::SupplierDeepDive,
            ContextOptions {
                suppliers: vec![supplier("a"), supplier("b")],
                ..ContextOptions::default()
            },
        );

        assert_eq!(context.focus_supplier.as_ref().map(|s| s.id.as_str()), Some("a"));
        assert_eq!(context.metadata.result_count, 2);
        assert!(context.has(DataKind::SupplierSet));
    }

    #[test]
    fn explicit_focus_and_result_count_win() {
        let context = build_data_context(
            Intent::SupplierDeepDive,
            ContextOptions {
                suppliers: vec![supplier("a")],
                supplier: Some(supplier("z")),
                result_count: Some(40),
                ..ContextOptions::default()
            },
        );

        assert_eq!(context.focus_supplier.as_ref().map(|s| s.id.as_str()), Some("z"));
        assert_eq!(context.metadata.result_count, 40);
        assert!(!context.has(DataKind::SupplierSet));
    }
}
