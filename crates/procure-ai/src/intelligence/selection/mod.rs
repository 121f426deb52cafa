mod builders;
pub mod escalation;
pub mod fallback;
pub mod rules;

pub use escalation::{escalate, Escalation};
pub use fallback::{resolve, widget_config, Resolution};
pub use rules::{IntentScope, SelectionRule, STANDARD_RULES};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::context::DataContext;
use super::domain::Surface;

/// Presentation components the renderer knows how to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentId {
    RiskDistributionWidget,
    PortfolioDashboard,
    SupplierRiskCard,
    SupplierDetailPanel,
    ScoreBreakdownWidget,
    ScoreTrendChart,
    ComparisonTable,
    SupplierComparison,
    RiskChangeAlert,
    TrendAnalysisPanel,
    CategoryExposure,
    SupplierTable,
    SupplierTablePanel,
    ActionConfirmation,
    AlertSetupForm,
    HandoffCard,
    PriceGauge,
    AlertCard,
    MetricRow,
    /// Deliberately renders nothing.
    #[serde(rename = "none")]
    NoVisual,
}

impl ComponentId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::RiskDistributionWidget => "RiskDistributionWidget",
            Self::PortfolioDashboard => "PortfolioDashboard",
            Self::SupplierRiskCard => "SupplierRiskCard",
            Self::SupplierDetailPanel => "SupplierDetailPanel",
            Self::ScoreBreakdownWidget => "ScoreBreakdownWidget",
            Self::ScoreTrendChart => "ScoreTrendChart",
            Self::ComparisonTable => "ComparisonTable",
            Self::SupplierComparison => "SupplierComparison",
            Self::RiskChangeAlert => "RiskChangeAlert",
            Self::TrendAnalysisPanel => "TrendAnalysisPanel",
            Self::CategoryExposure => "CategoryExposure",
            Self::SupplierTable => "SupplierTable",
            Self::SupplierTablePanel => "SupplierTablePanel",
            Self::ActionConfirmation => "ActionConfirmation",
            Self::AlertSetupForm => "AlertSetupForm",
            Self::HandoffCard => "HandoffCard",
            Self::PriceGauge => "PriceGauge",
            Self::AlertCard => "AlertCard",
            Self::MetricRow => "MetricRow",
            Self::NoVisual => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Default,
    Compact,
    Detailed,
}

impl Variant {
    pub const fn for_surface(surface: Surface) -> Self {
        match surface {
            Surface::Compact => Self::Compact,
            Surface::Panel | Surface::Expanded => Self::Detailed,
            Surface::Inline | Surface::Standalone => Self::Default,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeClass {
    Sm,
    Md,
    Lg,
    Full,
}

impl SizeClass {
    pub const fn for_surface(surface: Surface) -> Self {
        match surface {
            Surface::Compact => Self::Sm,
            Surface::Inline => Self::Md,
            Surface::Panel | Surface::Standalone => Self::Lg,
            Surface::Expanded => Self::Full,
        }
    }
}

/// Instructions for the renderer: which component to mount and with what props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentConfig {
    pub component: ComponentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeClass>,
    #[serde(default)]
    pub props: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expands_to: Option<ComponentId>,
}

impl ComponentConfig {
    /// Config sized and styled for the given surface.
    pub fn for_surface(component: ComponentId, surface: Surface) -> Self {
        Self {
            component,
            variant: Some(Variant::for_surface(surface)),
            size: Some(SizeClass::for_surface(surface)),
            props: BTreeMap::new(),
            expands_to: None,
        }
    }

    /// Marker config for turns that need no visual presentation.
    pub fn no_visual() -> Self {
        Self {
            component: ComponentId::NoVisual,
            variant: None,
            size: None,
            props: BTreeMap::new(),
            expands_to: None,
        }
    }

    /// Insert a prop. A value that cannot be represented as JSON (for
    /// example a map with non-string keys) is stored as `null` and logged.
    pub fn with_prop<V: Serialize>(mut self, key: &str, value: V) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|err| {
            warn!(
                component = self.component.name(),
                prop = key,
                error = %err,
                "prop value is not representable as JSON"
            );
            Value::Null
        });
        self.props.insert(key.to_string(), value);
        self
    }

    pub fn expanding_to(mut self, component: ComponentId) -> Self {
        self.expands_to = Some(component);
        self
    }

    pub fn renders_nothing(&self) -> bool {
        self.component == ComponentId::NoVisual
    }
}

/// Greedy, winner-take-all arbitration over a rule set.
#[derive(Debug, Clone, Copy)]
pub struct SelectionEngine<'r> {
    rules: &'r [SelectionRule],
}

impl SelectionEngine<'static> {
    pub fn standard() -> Self {
        Self::new(&STANDARD_RULES)
    }
}

impl Default for SelectionEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> SelectionEngine<'r> {
    pub fn new(rules: &'r [SelectionRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'r [SelectionRule] {
        self.rules
    }

    /// Matching rules ordered by descending priority, declaration order on ties.
    pub fn candidates(&self, context: &DataContext, surface: Surface) -> Vec<&'r SelectionRule> {
        let mut matched: Vec<&'r SelectionRule> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(context, surface))
            .collect();
        matched.sort_by(|a, b| b.priority.cmp(&a.priority));
        matched
    }

    pub fn select(&self, context: &DataContext, surface: Surface) -> Option<ComponentConfig> {
        let candidates = self.candidates(context, surface);
        let Some(winner) = candidates.first() else {
            debug!(
                intent = context.intent.label(),
                surface = surface.label(),
                "no selection rule matched"
            );
            return None;
        };

        debug!(
            rule = winner.id,
            priority = winner.priority,
            matched = candidates.len(),
            intent = context.intent.label(),
            surface = surface.label(),
            "selection rule won"
        );

        Some((winner.build)(context, surface))
    }

    /// Components declared by rules that accept the given surface.
    pub fn eligible_components(&self, surface: Surface) -> Vec<ComponentId> {
        let mut components: Vec<ComponentId> = self
            .rules
            .iter()
            .filter(|rule| rule.surfaces.contains(&surface))
            .map(|rule| rule.component)
            .collect();
        components.sort();
        components.dedup();
        components
    }
}

/// Select a component configuration with the standard rule set.
pub fn select_component(context: &DataContext, surface: Surface) -> Option<ComponentConfig> {
    SelectionEngine::standard().select(context, surface)
}
