//! Config builders for the standard rule table.
//!
//! Predicates guarantee the required data is present, but builders still read
//! optional context fields defensively and treat absent collections as empty.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::{ComponentConfig, ComponentId};
use crate::intelligence::context::DataContext;
use crate::intelligence::domain::{
    ChangeDirection, Intent, RiskChange, RiskDistribution, RiskLevel, SubIntent, Supplier, Surface,
};

const COMPACT_ROW_LIMIT: usize = 5;
const INLINE_ROW_LIMIT: usize = 10;
const COMPACT_CHANGE_LIMIT: usize = 3;
const INLINE_CHANGE_LIMIT: usize = 5;
const INLINE_COMPARISON_LIMIT: usize = 4;
const DASHBOARD_TOP_SUPPLIERS: usize = 10;
const PEER_LIMIT: usize = 5;

fn row_limit(surface: Surface) -> Option<usize> {
    match surface {
        Surface::Compact => Some(COMPACT_ROW_LIMIT),
        Surface::Inline => Some(INLINE_ROW_LIMIT),
        _ => None,
    }
}

fn supplier_row(supplier: &Supplier) -> Value {
    json!({
        "supplierId": supplier.id,
        "name": supplier.name,
        "category": supplier.category,
        "country": supplier.country,
        "spend": supplier.spend,
        "riskScore": supplier.risk_score,
        "riskLevel": supplier.risk_level,
        "riskLabel": supplier.risk_level.label(),
        "trend": supplier.trend,
    })
}

fn change_row(change: &RiskChange) -> Value {
    json!({
        "supplierId": change.supplier_id,
        "supplierName": change.supplier_name,
        "previousScore": change.previous_score,
        "currentScore": change.current_score,
        "previousLevel": change.previous_level,
        "currentLevel": change.current_level,
        "delta": change.delta(),
        "direction": change.direction(),
        "changedOn": change.changed_on,
    })
}

/// Suppliers ordered riskiest first; unscored suppliers sink to the bottom.
fn by_risk(suppliers: &[Supplier]) -> Vec<&Supplier> {
    let mut ordered: Vec<&Supplier> = suppliers.iter().collect();
    ordered.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    ordered
}

fn by_spend(suppliers: &[Supplier]) -> Vec<&Supplier> {
    let mut ordered: Vec<&Supplier> = suppliers.iter().collect();
    ordered.sort_by(|a, b| {
        b.spend
            .unwrap_or(0.0)
            .total_cmp(&a.spend.unwrap_or(0.0))
    });
    ordered
}

/// Changes ordered by magnitude, largest movement first.
fn by_magnitude(changes: &[RiskChange]) -> Vec<&RiskChange> {
    let mut ordered: Vec<&RiskChange> = changes.iter().collect();
    ordered.sort_by(|a, b| b.delta().abs().cmp(&a.delta().abs()));
    ordered
}

fn breakdown(distribution: &RiskDistribution) -> Vec<Value> {
    let percentages = distribution.percentages();
    RiskLevel::ordered()
        .into_iter()
        .zip(percentages)
        .map(|(level, percentage)| {
            json!({
                "level": level,
                "label": level.label(),
                "count": distribution.count(level),
                "percentage": percentage,
            })
        })
        .collect()
}

fn change_counts(changes: &[RiskChange]) -> (usize, usize) {
    changes.iter().fold((0, 0), |(worsened, improved), change| {
        match change.direction() {
            ChangeDirection::Worsened => (worsened + 1, improved),
            ChangeDirection::Improved => (worsened, improved + 1),
            ChangeDirection::Unchanged => (worsened, improved),
        }
    })
}

fn filter_label(sub_intent: Option<SubIntent>) -> Option<&'static str> {
    match sub_intent? {
        SubIntent::ByRiskLevel => Some("risk level"),
        SubIntent::ByCategory => Some("category"),
        SubIntent::ByRegion => Some("region"),
        SubIntent::SpendExposure => Some("spend"),
        _ => None,
    }
}

pub(super) fn handoff_card(context: &DataContext, surface: Surface) -> ComponentConfig {
    let reason = if context.intent == Intent::RestrictedQuery {
        "restricted_query"
    } else {
        "restricted_data"
    };

    ComponentConfig::for_surface(ComponentId::HandoffCard, surface)
        .with_prop("reason", reason)
        .with_prop("resultCount", context.metadata.result_count)
        .with_prop(
            "message",
            "This request needs data that is only available through your account team.",
        )
}

pub(super) fn risk_distribution(context: &DataContext, surface: Surface) -> ComponentConfig {
    let distribution = context
        .portfolio
        .as_ref()
        .map(|portfolio| portfolio.distribution)
        .unwrap_or_default();
    let total_suppliers = context
        .portfolio
        .as_ref()
        .map(|portfolio| u64::from(portfolio.total_suppliers))
        .unwrap_or_else(|| distribution.total());

    ComponentConfig::for_surface(ComponentId::RiskDistributionWidget, surface)
        .with_prop("totalSuppliers", total_suppliers)
        .with_prop(
            "totalSpend",
            context.portfolio.as_ref().and_then(|p| p.total_spend),
        )
        .with_prop("distribution", distribution)
        .with_prop("breakdown", breakdown(&distribution))
        .with_prop(
            "elevatedRiskCount",
            u64::from(distribution.high) + u64::from(distribution.medium_high),
        )
        .expanding_to(ComponentId::PortfolioDashboard)
}

pub(super) fn portfolio_dashboard(context: &DataContext, surface: Surface) -> ComponentConfig {
    let distribution = context
        .portfolio
        .as_ref()
        .map(|portfolio| portfolio.distribution)
        .unwrap_or_default();
    let top_suppliers: Vec<Value> = by_spend(&context.suppliers)
        .into_iter()
        .take(DASHBOARD_TOP_SUPPLIERS)
        .map(supplier_row)
        .collect();
    let (worsened, improved) = change_counts(&context.risk_changes);

    ComponentConfig::for_surface(ComponentId::PortfolioDashboard, surface)
        .with_prop(
            "totalSuppliers",
            context
                .portfolio
                .as_ref()
                .map(|portfolio| u64::from(portfolio.total_suppliers))
                .unwrap_or_else(|| distribution.total()),
        )
        .with_prop(
            "totalSpend",
            context.portfolio.as_ref().and_then(|p| p.total_spend),
        )
        .with_prop(
            "lastUpdated",
            context.portfolio.as_ref().and_then(|p| p.last_updated),
        )
        .with_prop("distribution", distribution)
        .with_prop("breakdown", breakdown(&distribution))
        .with_prop("topSuppliers", top_suppliers)
        .with_prop("worsenedCount", worsened)
        .with_prop("improvedCount", improved)
}

pub(super) fn supplier_risk_card(context: &DataContext, surface: Surface) -> ComponentConfig {
    let supplier = context.focus_supplier.as_ref().map(supplier_row);

    ComponentConfig::for_surface(ComponentId::SupplierRiskCard, surface)
        .with_prop("supplier", supplier)
        .expanding_to(ComponentId::SupplierDetailPanel)
}

pub(super) fn supplier_detail(context: &DataContext, surface: Surface) -> ComponentConfig {
    let focus = context.focus_supplier.as_ref();
    let related: Vec<Value> = focus
        .map(|supplier| {
            by_magnitude(&context.risk_changes)
                .into_iter()
                .filter(|change| change.supplier_id == supplier.id)
                .map(change_row)
                .collect()
        })
        .unwrap_or_default();
    let peers: Vec<Value> = focus
        .map(|supplier| {
            by_risk(&context.suppliers)
                .into_iter()
                .filter(|peer| peer.id != supplier.id && peer.category == supplier.category)
                .take(PEER_LIMIT)
                .map(supplier_row)
                .collect()
        })
        .unwrap_or_default();

    ComponentConfig::for_surface(ComponentId::SupplierDetailPanel, surface)
        .with_prop("supplier", focus.map(supplier_row))
        .with_prop("recentChanges", related)
        .with_prop("categoryPeers", peers)
}

/// Score band boundaries for a tier, inclusive on both ends.
fn tier_band(level: RiskLevel) -> Option<(u8, u8)> {
    match level {
        RiskLevel::High => Some((75, 100)),
        RiskLevel::MediumHigh => Some((60, 74)),
        RiskLevel::Medium => Some((40, 59)),
        RiskLevel::Low => Some((0, 39)),
        RiskLevel::Unrated => None,
    }
}

pub(super) fn score_breakdown(context: &DataContext, surface: Surface) -> ComponentConfig {
    let focus = context.focus_supplier.as_ref();
    let band = focus.and_then(|supplier| tier_band(supplier.risk_level));
    let tiers: Vec<Value> = RiskLevel::ordered()
        .into_iter()
        .filter_map(|level| {
            tier_band(level).map(|(floor, ceiling)| {
                json!({ "level": level, "label": level.label(), "floor": floor, "ceiling": ceiling })
            })
        })
        .collect();

    ComponentConfig::for_surface(ComponentId::ScoreBreakdownWidget, surface)
        .with_prop("supplier", focus.map(supplier_row))
        .with_prop("tierFloor", band.map(|(floor, _)| floor))
        .with_prop("tierCeiling", band.map(|(_, ceiling)| ceiling))
        .with_prop("tiers", tiers)
        .expanding_to(ComponentId::SupplierDetailPanel)
}

pub(super) fn score_trend(context: &DataContext, surface: Surface) -> ComponentConfig {
    let focus = context.focus_supplier.as_ref();
    let mut history: Vec<&RiskChange> = focus
        .map(|supplier| {
            context
                .risk_changes
                .iter()
                .filter(|change| change.supplier_id == supplier.id)
                .collect()
        })
        .unwrap_or_default();
    history.sort_by_key(|change| change.changed_on);

    let points: Vec<Value> = history
        .iter()
        .map(|change| json!({ "date": change.changed_on, "score": change.current_score }))
        .collect();

    ComponentConfig::for_surface(ComponentId::ScoreTrendChart, surface)
        .with_prop("supplier", focus.map(supplier_row))
        .with_prop("trend", focus.and_then(|supplier| supplier.trend))
        .with_prop("baselineScore", history.first().map(|c| c.previous_score))
        .with_prop("points", points)
        .expanding_to(ComponentId::SupplierDetailPanel)
}

fn lowest_risk(suppliers: &[Supplier]) -> Option<&str> {
    suppliers
        .iter()
        .filter(|supplier| supplier.risk_score.is_some())
        .min_by_key(|supplier| supplier.risk_score)
        .map(|supplier| supplier.id.as_str())
}

fn highest_spend(suppliers: &[Supplier]) -> Option<&str> {
    by_spend(suppliers)
        .into_iter()
        .find(|supplier| supplier.spend.is_some())
        .map(|supplier| supplier.id.as_str())
}

pub(super) fn comparison_table(context: &DataContext, surface: Surface) -> ComponentConfig {
    let rows: Vec<Value> = context
        .suppliers
        .iter()
        .take(INLINE_COMPARISON_LIMIT)
        .map(supplier_row)
        .collect();

    ComponentConfig::for_surface(ComponentId::ComparisonTable, surface)
        .with_prop("suppliers", rows)
        .with_prop("columns", ["riskScore", "riskLevel", "spend", "category"])
        .with_prop("lowestRiskSupplierId", lowest_risk(&context.suppliers))
        .with_prop(
            "truncated",
            context.suppliers.len() > INLINE_COMPARISON_LIMIT,
        )
        .expanding_to(ComponentId::SupplierComparison)
}

pub(super) fn supplier_comparison(context: &DataContext, surface: Surface) -> ComponentConfig {
    let rows: Vec<Value> = context.suppliers.iter().map(supplier_row).collect();

    ComponentConfig::for_surface(ComponentId::SupplierComparison, surface)
        .with_prop("suppliers", rows)
        .with_prop(
            "columns",
            ["riskScore", "riskLevel", "trend", "spend", "category", "country"],
        )
        .with_prop("lowestRiskSupplierId", lowest_risk(&context.suppliers))
        .with_prop("highestSpendSupplierId", highest_spend(&context.suppliers))
}

pub(super) fn risk_change_alert(context: &DataContext, surface: Surface) -> ComponentConfig {
    let limit = if surface == Surface::Compact {
        COMPACT_CHANGE_LIMIT
    } else {
        INLINE_CHANGE_LIMIT
    };
    let changes: Vec<Value> = by_magnitude(&context.risk_changes)
        .into_iter()
        .take(limit)
        .map(change_row)
        .collect();
    let (worsened, improved) = change_counts(&context.risk_changes);
    let tone = if worsened > 0 {
        "negative"
    } else if improved > 0 {
        "positive"
    } else {
        "neutral"
    };

    ComponentConfig::for_surface(ComponentId::RiskChangeAlert, surface)
        .with_prop("changes", changes)
        .with_prop("totalChanges", context.risk_changes.len())
        .with_prop("worsenedCount", worsened)
        .with_prop("improvedCount", improved)
        .with_prop("tone", tone)
        .expanding_to(ComponentId::TrendAnalysisPanel)
}

pub(super) fn trend_analysis(context: &DataContext, surface: Surface) -> ComponentConfig {
    let changes: Vec<Value> = by_magnitude(&context.risk_changes)
        .into_iter()
        .map(change_row)
        .collect();
    let (worsened, improved) = change_counts(&context.risk_changes);
    let tier_moves = context
        .risk_changes
        .iter()
        .filter(|change| change.previous_level != change.current_level)
        .count();

    ComponentConfig::for_surface(ComponentId::TrendAnalysisPanel, surface)
        .with_prop("changes", changes)
        .with_prop("worsenedCount", worsened)
        .with_prop("improvedCount", improved)
        .with_prop("tierMoves", tier_moves)
}

const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Default)]
struct CategoryTally {
    suppliers: usize,
    spend: f64,
    elevated: usize,
}

pub(super) fn category_exposure(context: &DataContext, surface: Surface) -> ComponentConfig {
    let mut tallies: BTreeMap<&str, CategoryTally> = BTreeMap::new();
    for supplier in &context.suppliers {
        let category = supplier.category.as_deref().unwrap_or(UNCATEGORIZED);
        let tally = tallies.entry(category).or_default();
        tally.suppliers += 1;
        tally.spend += supplier.spend.unwrap_or(0.0);
        if matches!(supplier.risk_level, RiskLevel::High | RiskLevel::MediumHigh) {
            tally.elevated += 1;
        }
    }

    let mut categories: Vec<(&str, CategoryTally)> = tallies.into_iter().collect();
    categories.sort_by(|a, b| b.1.spend.total_cmp(&a.1.spend));
    let categories: Vec<Value> = categories
        .into_iter()
        .map(|(category, tally)| {
            json!({
                "category": category,
                "supplierCount": tally.suppliers,
                "spend": tally.spend,
                "elevatedRiskCount": tally.elevated,
            })
        })
        .collect();

    let config = ComponentConfig::for_surface(ComponentId::CategoryExposure, surface)
        .with_prop("categories", categories)
        .with_prop("supplierCount", context.suppliers.len());

    if surface.richer().is_some() {
        config.expanding_to(ComponentId::CategoryExposure)
    } else {
        config
    }
}

pub(super) fn action_confirmation(context: &DataContext, surface: Surface) -> ComponentConfig {
    ComponentConfig::for_surface(ComponentId::ActionConfirmation, surface)
        .with_prop("supplier", context.focus_supplier.as_ref().map(supplier_row))
        .with_prop(
            "availableActions",
            ["add_to_watchlist", "set_risk_alert", "request_assessment"],
        )
}

pub(super) fn alert_setup(context: &DataContext, surface: Surface) -> ComponentConfig {
    ComponentConfig::for_surface(ComponentId::AlertSetupForm, surface)
        .with_prop(
            "supplierId",
            context.focus_supplier.as_ref().map(|s| s.id.as_str()),
        )
        .with_prop("defaultThreshold", RiskLevel::MediumHigh)
        .with_prop("channels", ["email", "in_app"])
}

pub(super) fn supplier_table(context: &DataContext, surface: Surface) -> ComponentConfig {
    let ordered = by_risk(&context.suppliers);
    let limit = row_limit(surface).unwrap_or(ordered.len());
    let rows: Vec<Value> = ordered.into_iter().take(limit).map(supplier_row).collect();

    ComponentConfig::for_surface(ComponentId::SupplierTable, surface)
        .with_prop("suppliers", rows)
        .with_prop("totalCount", context.metadata.result_count)
        .with_prop("sortedBy", "riskScore")
        .with_prop("filteredBy", filter_label(context.sub_intent))
        .expanding_to(ComponentId::SupplierTablePanel)
}

pub(super) fn supplier_table_panel(context: &DataContext, surface: Surface) -> ComponentConfig {
    let rows: Vec<Value> = by_risk(&context.suppliers)
        .into_iter()
        .map(supplier_row)
        .collect();

    ComponentConfig::for_surface(ComponentId::SupplierTablePanel, surface)
        .with_prop("suppliers", rows)
        .with_prop("totalCount", context.metadata.result_count)
        .with_prop("sortedBy", "riskScore")
        .with_prop("filteredBy", filter_label(context.sub_intent))
}

pub(super) fn no_visual(_context: &DataContext, _surface: Surface) -> ComponentConfig {
    ComponentConfig::no_visual()
}
