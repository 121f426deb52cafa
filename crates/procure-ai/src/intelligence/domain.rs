use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Conversational intent supplied by the upstream classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    PortfolioOverview,
    FilteredDiscovery,
    SupplierDeepDive,
    Comparison,
    TrendDetection,
    MarketContext,
    ActionTrigger,
    SetupConfig,
    RestrictedQuery,
    ExplainWhy,
    General,
}

impl Intent {
    pub const fn label(self) -> &'static str {
        match self {
            Self::PortfolioOverview => "portfolio_overview",
            Self::FilteredDiscovery => "filtered_discovery",
            Self::SupplierDeepDive => "supplier_deep_dive",
            Self::Comparison => "comparison",
            Self::TrendDetection => "trend_detection",
            Self::MarketContext => "market_context",
            Self::ActionTrigger => "action_trigger",
            Self::SetupConfig => "setup_config",
            Self::RestrictedQuery => "restricted_query",
            Self::ExplainWhy => "explain_why",
            Self::General => "general",
        }
    }
}

/// Optional refinement of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubIntent {
    ByRiskLevel,
    ByCategory,
    ByRegion,
    ScoreInquiry,
    HistoricalTrend,
    NewsEvents,
    SpendExposure,
}

/// Rendering context a component will appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Inline,
    Compact,
    Panel,
    Expanded,
    Standalone,
}

impl Surface {
    pub const fn all() -> [Self; 5] {
        [
            Self::Inline,
            Self::Compact,
            Self::Panel,
            Self::Expanded,
            Self::Standalone,
        ]
    }

    /// Surface an expand affordance escalates to, if any.
    pub const fn richer(self) -> Option<Self> {
        match self {
            Self::Compact | Self::Inline => Some(Self::Panel),
            Self::Panel => Some(Self::Expanded),
            Self::Expanded | Self::Standalone => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Compact => "compact",
            Self::Panel => "panel",
            Self::Expanded => "expanded",
            Self::Standalone => "standalone",
        }
    }
}

/// Supplier risk tier, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    High,
    MediumHigh,
    Medium,
    Low,
    Unrated,
}

impl RiskLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::High,
            Self::MediumHigh,
            Self::Medium,
            Self::Low,
            Self::Unrated,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::MediumHigh => "Medium-High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unrated => "Unrated",
        }
    }

    /// Tier for a 0-100 risk score where higher means riskier.
    pub fn from_score(score: Option<u8>) -> Self {
        match score {
            Some(score) if score >= 75 => Self::High,
            Some(score) if score >= 60 => Self::MediumHigh,
            Some(score) if score >= 40 => Self::Medium,
            Some(_) => Self::Low,
            None => Self::Unrated,
        }
    }
}

/// Supplier counts per risk tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDistribution {
    #[serde(default)]
    pub high: u32,
    #[serde(default)]
    pub medium_high: u32,
    #[serde(default)]
    pub medium: u32,
    #[serde(default)]
    pub low: u32,
    #[serde(default)]
    pub unrated: u32,
}

impl RiskDistribution {
    pub fn count(&self, level: RiskLevel) -> u32 {
        match level {
            RiskLevel::High => self.high,
            RiskLevel::MediumHigh => self.medium_high,
            RiskLevel::Medium => self.medium,
            RiskLevel::Low => self.low,
            RiskLevel::Unrated => self.unrated,
        }
    }

    /// Widened so five full `u32` tiers cannot overflow.
    pub fn total(&self) -> u64 {
        RiskLevel::ordered()
            .into_iter()
            .map(|level| u64::from(self.count(level)))
            .sum()
    }

    /// Integer percentages per tier, in `RiskLevel::ordered()` order.
    ///
    /// Uses the largest-remainder method so a non-empty distribution always
    /// sums to exactly 100. An empty distribution yields all zeros.
    pub fn percentages(&self) -> [u32; 5] {
        let total = self.total();
        let mut shares = [0u32; 5];
        if total == 0 {
            return shares;
        }

        let mut remainders = Vec::with_capacity(5);
        for (index, level) in RiskLevel::ordered().into_iter().enumerate() {
            let scaled = u64::from(self.count(level)) * 100;
            shares[index] = (scaled / total) as u32;
            remainders.push((index, scaled % total));
        }

        let assigned: u32 = shares.iter().sum();
        // stable sort keeps tier order on equal remainders
        remainders.sort_by(|a, b| b.1.cmp(&a.1));
        for (index, _) in remainders.into_iter().take((100 - assigned) as usize) {
            shares[index] += 1;
        }

        shares
    }
}

/// Aggregate view over the user's supplier portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub total_suppliers: u32,
    #[serde(default)]
    pub total_spend: Option<f64>,
    pub distribution: RiskDistribution,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

/// Direction of a supplier's recent score movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTrend {
    Improving,
    Stable,
    Worsening,
}

/// Supplier record as returned by the data-retrieval layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub spend: Option<f64>,
    #[serde(default)]
    pub risk_score: Option<u8>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub trend: Option<ScoreTrend>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Worsened,
    Improved,
    Unchanged,
}

/// A supplier's risk score moving between two assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskChange {
    pub supplier_id: String,
    pub supplier_name: String,
    pub previous_score: u8,
    pub current_score: u8,
    pub previous_level: RiskLevel,
    pub current_level: RiskLevel,
    #[serde(default)]
    pub changed_on: Option<NaiveDate>,
}

impl RiskChange {
    pub fn delta(&self) -> i16 {
        i16::from(self.current_score) - i16::from(self.previous_score)
    }

    pub fn direction(&self) -> ChangeDirection {
        match self.delta() {
            delta if delta > 0 => ChangeDirection::Worsened,
            delta if delta < 0 => ChangeDirection::Improved,
            _ => ChangeDirection::Unchanged,
        }
    }
}

/// Metadata describing the response the context was built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub result_count: usize,
    pub requires_handoff: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_sum_to_one_hundred() {
        let distribution = RiskDistribution {
            high: 1,
            medium_high: 1,
            medium: 1,
            low: 0,
            unrated: 0,
        };

        let shares = distribution.percentages();
        assert_eq!(shares.iter().sum::<u32>(), 100);
        assert_eq!(shares, [34, 33, 33, 0, 0]);
    }

    #[test]
    fn percentages_are_zero_for_empty_distribution() {
        assert_eq!(RiskDistribution::default().percentages(), [0; 5]);
    }

    #[test]
    fn saturated_tiers_neither_overflow_nor_break_the_sum() {
        let distribution = RiskDistribution {
            high: u32::MAX,
            medium_high: u32::MAX,
            medium: 0,
            low: 1,
            unrated: u32::MAX,
        };

        assert_eq!(distribution.total(), 3 * u64::from(u32::MAX) + 1);
        let shares = distribution.percentages();
        assert_eq!(shares.iter().sum::<u32>(), 100);
        assert_eq!(shares, [34, 33, 0, 0, 33]);

        let lopsided = RiskDistribution {
            high: u32::MAX,
            low: 1,
            ..RiskDistribution::default()
        };
        assert_eq!(lopsided.percentages(), [100, 0, 0, 0, 0]);
    }

    #[test]
    fn risk_change_direction_follows_score_delta() {
        let change = RiskChange {
            supplier_id: "sup-1".to_string(),
            supplier_name: "Acme Metals".to_string(),
            previous_score: 52,
            current_score: 71,
            previous_level: RiskLevel::Medium,
            current_level: RiskLevel::MediumHigh,
            changed_on: None,
        };

        assert_eq!(change.delta(), 19);
        assert_eq!(change.direction(), ChangeDirection::Worsened);
    }

    #[test]
    fn surfaces_escalate_towards_expanded() {
        assert_eq!(Surface::Compact.richer(), Some(Surface::Panel));
        assert_eq!(Surface::Inline.richer(), Some(Surface::Panel));
        assert_eq!(Surface::Panel.richer(), Some(Surface::Expanded));
        assert_eq!(Surface::Expanded.richer(), None);
        assert_eq!(Surface::Standalone.richer(), None);
    }

    #[test]
    fn risk_level_from_score_uses_tier_thresholds() {
        assert_eq!(RiskLevel::from_score(Some(80)), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(Some(60)), RiskLevel::MediumHigh);
        assert_eq!(RiskLevel::from_score(Some(45)), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(Some(10)), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(None), RiskLevel::Unrated);
    }
}
