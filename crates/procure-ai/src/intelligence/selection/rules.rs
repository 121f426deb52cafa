use std::fmt;

use super::builders;
use super::{ComponentConfig, ComponentId};
use crate::intelligence::context::{DataContext, DataKind};
use crate::intelligence::domain::{Intent, SubIntent, Surface};

/// Intents a rule responds to.
#[derive(Debug, Clone, Copy)]
pub enum IntentScope {
    Any,
    OneOf(&'static [Intent]),
}

impl IntentScope {
    pub fn contains(&self, intent: Intent) -> bool {
        match self {
            Self::Any => true,
            Self::OneOf(intents) => intents.contains(&intent),
        }
    }
}

/// One entry of the selection rule table.
///
/// A rule matches when the intent is in scope, the surface is eligible, every
/// required data kind is present, the sub-intent (if constrained) agrees and
/// the optional guard passes. `build` is only invoked for the winning rule.
#[derive(Clone, Copy)]
pub struct SelectionRule {
    pub id: &'static str,
    pub priority: i32,
    pub intents: IntentScope,
    pub sub_intents: Option<&'static [SubIntent]>,
    pub surfaces: &'static [Surface],
    pub requires: &'static [DataKind],
    pub guard: Option<fn(&DataContext) -> bool>,
    /// Component the builder produces; used for eligibility lookups.
    pub component: ComponentId,
    pub build: fn(&DataContext, Surface) -> ComponentConfig,
}

impl SelectionRule {
    pub fn matches(&self, context: &DataContext, surface: Surface) -> bool {
        if !self.intents.contains(context.intent) || !self.surfaces.contains(&surface) {
            return false;
        }

        if let Some(sub_intents) = self.sub_intents {
            match context.sub_intent {
                Some(sub_intent) if sub_intents.contains(&sub_intent) => {}
                _ => return false,
            }
        }

        if !context.has_all(self.requires) {
            return false;
        }

        self.guard.map_or(true, |guard| guard(context))
    }
}

impl fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionRule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("intents", &self.intents)
            .field("sub_intents", &self.sub_intents)
            .field("surfaces", &self.surfaces)
            .field("requires", &self.requires)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

const CONVERSATION: &[Surface] = &[Surface::Inline, Surface::Compact];
const PANELS: &[Surface] = &[Surface::Panel, Surface::Expanded];
const ANY_SURFACE: &[Surface] = &[
    Surface::Inline,
    Surface::Compact,
    Surface::Panel,
    Surface::Expanded,
    Surface::Standalone,
];

const LISTING_INTENTS: &[Intent] = &[Intent::PortfolioOverview, Intent::FilteredDiscovery];

pub(crate) fn handoff_applies(context: &DataContext) -> bool {
    context.intent == Intent::RestrictedQuery || context.metadata.requires_handoff
}

/// Score and trend questions have dedicated inline views.
fn risk_card_applies(context: &DataContext) -> bool {
    !matches!(
        context.sub_intent,
        Some(SubIntent::ScoreInquiry | SubIntent::HistoricalTrend)
    )
}

fn trend_requested(context: &DataContext) -> bool {
    context.intent == Intent::TrendDetection
        || context.sub_intent == Some(SubIntent::HistoricalTrend)
}

/// Process-lifetime rule table, in declaration order.
pub static STANDARD_RULES: [SelectionRule; 17] = [
    SelectionRule {
        id: "restricted-handoff",
        priority: 150,
        intents: IntentScope::Any,
        sub_intents: None,
        surfaces: ANY_SURFACE,
        requires: &[],
        guard: Some(handoff_applies),
        component: ComponentId::HandoffCard,
        build: builders::handoff_card,
    },
    SelectionRule {
        id: "score-breakdown",
        priority: 110,
        intents: IntentScope::OneOf(&[Intent::SupplierDeepDive]),
        sub_intents: Some(&[SubIntent::ScoreInquiry]),
        surfaces: CONVERSATION,
        requires: &[DataKind::FocusSupplier],
        guard: None,
        component: ComponentId::ScoreBreakdownWidget,
        build: builders::score_breakdown,
    },
    SelectionRule {
        id: "risk-distribution",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::PortfolioOverview]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::Portfolio],
        guard: None,
        component: ComponentId::RiskDistributionWidget,
        build: builders::risk_distribution,
    },
    SelectionRule {
        id: "portfolio-dashboard",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::PortfolioOverview]),
        sub_intents: None,
        surfaces: PANELS,
        requires: &[DataKind::Portfolio],
        guard: None,
        component: ComponentId::PortfolioDashboard,
        build: builders::portfolio_dashboard,
    },
    SelectionRule {
        id: "supplier-risk-card",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::SupplierDeepDive]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::FocusSupplier],
        guard: Some(risk_card_applies),
        component: ComponentId::SupplierRiskCard,
        build: builders::supplier_risk_card,
    },
    SelectionRule {
        id: "supplier-detail",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::SupplierDeepDive]),
        sub_intents: None,
        surfaces: PANELS,
        requires: &[DataKind::FocusSupplier],
        guard: None,
        component: ComponentId::SupplierDetailPanel,
        build: builders::supplier_detail,
    },
    SelectionRule {
        id: "comparison-table",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::Comparison]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::SupplierSet],
        guard: None,
        component: ComponentId::ComparisonTable,
        build: builders::comparison_table,
    },
    SelectionRule {
        id: "comparison-panel",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::Comparison]),
        sub_intents: None,
        surfaces: PANELS,
        requires: &[DataKind::SupplierSet],
        guard: None,
        component: ComponentId::SupplierComparison,
        build: builders::supplier_comparison,
    },
    SelectionRule {
        id: "risk-change-alert",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::TrendDetection]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::RiskChanges],
        guard: None,
        component: ComponentId::RiskChangeAlert,
        build: builders::risk_change_alert,
    },
    SelectionRule {
        id: "trend-analysis",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::TrendDetection]),
        sub_intents: None,
        surfaces: PANELS,
        requires: &[DataKind::RiskChanges],
        guard: None,
        component: ComponentId::TrendAnalysisPanel,
        build: builders::trend_analysis,
    },
    SelectionRule {
        id: "category-exposure",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::MarketContext]),
        sub_intents: None,
        surfaces: &[
            Surface::Inline,
            Surface::Compact,
            Surface::Panel,
            Surface::Expanded,
        ],
        requires: &[DataKind::Suppliers],
        guard: None,
        component: ComponentId::CategoryExposure,
        build: builders::category_exposure,
    },
    SelectionRule {
        id: "action-confirmation",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::ActionTrigger]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::FocusSupplier],
        guard: None,
        component: ComponentId::ActionConfirmation,
        build: builders::action_confirmation,
    },
    SelectionRule {
        id: "alert-setup",
        priority: 100,
        intents: IntentScope::OneOf(&[Intent::SetupConfig]),
        sub_intents: None,
        surfaces: &[Surface::Inline, Surface::Panel],
        requires: &[],
        guard: None,
        component: ComponentId::AlertSetupForm,
        build: builders::alert_setup,
    },
    SelectionRule {
        id: "supplier-trend",
        priority: 90,
        intents: IntentScope::OneOf(&[Intent::TrendDetection, Intent::SupplierDeepDive]),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::FocusSupplier],
        guard: Some(trend_requested),
        component: ComponentId::ScoreTrendChart,
        build: builders::score_trend,
    },
    SelectionRule {
        id: "supplier-table",
        priority: 50,
        intents: IntentScope::OneOf(LISTING_INTENTS),
        sub_intents: None,
        surfaces: CONVERSATION,
        requires: &[DataKind::Suppliers],
        guard: None,
        component: ComponentId::SupplierTable,
        build: builders::supplier_table,
    },
    SelectionRule {
        id: "supplier-table-panel",
        priority: 50,
        intents: IntentScope::OneOf(LISTING_INTENTS),
        sub_intents: None,
        surfaces: PANELS,
        requires: &[DataKind::Suppliers],
        guard: None,
        component: ComponentId::SupplierTablePanel,
        build: builders::supplier_table_panel,
    },
    SelectionRule {
        id: "no-visual",
        priority: 0,
        intents: IntentScope::OneOf(&[Intent::ExplainWhy, Intent::General]),
        sub_intents: None,
        surfaces: ANY_SURFACE,
        requires: &[],
        guard: None,
        component: ComponentId::NoVisual,
        build: builders::no_visual,
    },
];
