use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::intelligence::confidence::{InternalSource, ProviderType, WebSource};
use crate::intelligence::context::{build_data_context, ContextOptions, DataContext};
use crate::intelligence::domain::{
    Intent, PortfolioSnapshot, RiskChange, RiskDistribution, RiskLevel, ScoreTrend, Supplier,
};

pub(super) fn supplier(id: &str, score: Option<u8>) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: format!("Supplier {id}"),
        category: Some("Steel (Hot Rolled Coil)".to_string()),
        country: Some("DE".to_string()),
        spend: Some(250_000.0),
        risk_score: score,
        risk_level: RiskLevel::from_score(score),
        trend: Some(ScoreTrend::Stable),
    }
}

pub(super) fn suppliers() -> Vec<Supplier> {
    vec![
        supplier("sup-1", Some(82)),
        supplier("sup-2", Some(45)),
        supplier("sup-3", Some(18)),
    ]
}

pub(super) fn portfolio() -> PortfolioSnapshot {
    PortfolioSnapshot {
        total_suppliers: 20,
        total_spend: Some(12_500_000.0),
        distribution: RiskDistribution {
            high: 2,
            medium_high: 1,
            medium: 3,
            low: 4,
            unrated: 10,
        },
        last_updated: NaiveDate::from_ymd_opt(2026, 9, 30),
    }
}

pub(super) fn risk_change(id: &str, previous: u8, current: u8) -> RiskChange {
    RiskChange {
        supplier_id: id.to_string(),
        supplier_name: format!("Supplier {id}"),
        previous_score: previous,
        current_score: current,
        previous_level: RiskLevel::from_score(Some(previous)),
        current_level: RiskLevel::from_score(Some(current)),
        changed_on: NaiveDate::from_ymd_opt(2026, 10, 1),
    }
}

pub(super) fn context(intent: Intent, options: ContextOptions) -> DataContext {
    build_data_context(intent, options)
}

pub(super) fn portfolio_context() -> DataContext {
    context(
        Intent::PortfolioOverview,
        ContextOptions {
            portfolio: Some(portfolio()),
            ..ContextOptions::default()
        },
    )
}

pub(super) fn proprietary(count: usize) -> Vec<InternalSource> {
    (0..count)
        .map(|index| InternalSource {
            name: format!("Category brief {index}"),
            provider: ProviderType::Beroe,
            url: None,
        })
        .collect()
}

pub(super) fn web(count: usize) -> Vec<WebSource> {
    (0..count)
        .map(|index| WebSource {
            name: format!("News article {index}"),
            url: Some(format!("https://news.example.com/{index}")),
        })
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
