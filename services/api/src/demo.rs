use crate::infra::{intelligence_service, parse_wire_enum, read_json_file};
use clap::Args;
use procure_ai::config::AppConfig;
use procure_ai::error::AppError;
use procure_ai::intelligence::confidence::{InternalSource, ProviderType, WebSource};
use procure_ai::intelligence::{
    ConfidenceDescriptor, ConfidenceRequest, ContextOptions, Intent, IntelligenceService,
    PortfolioSnapshot, Resolution, ResponseSources, RiskChange, RiskDistribution, RiskLevel,
    SelectionRequest, SelectionResponse, SubIntent, Supplier, SupplierCsvImporter, Surface,
    WidgetPayload,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct SelectArgs {
    /// Intent label, e.g. portfolio_overview or supplier-deep-dive
    #[arg(long, value_parser = parse_wire_enum::<Intent>)]
    pub(crate) intent: Intent,
    /// Target surface: inline, compact, panel, expanded or standalone
    #[arg(long, value_parser = parse_wire_enum::<Surface>)]
    pub(crate) surface: Surface,
    /// Optional sub-intent refinement
    #[arg(long, value_parser = parse_wire_enum::<SubIntent>)]
    pub(crate) sub_intent: Option<SubIntent>,
    /// Supplier CSV export used as the turn's supplier list
    #[arg(long)]
    pub(crate) suppliers_csv: Option<PathBuf>,
    /// JSON file with context options (portfolio, riskChanges, widget, ...)
    #[arg(long)]
    pub(crate) payload: Option<PathBuf>,
    /// Also resolve the expand-to-detail view at the next richer surface
    #[arg(long)]
    pub(crate) expand: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ConfidenceArgs {
    /// JSON file with { sources, sourceRefs, detectedCategory, managedCategories }
    #[arg(long)]
    pub(crate) payload: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional supplier CSV export replacing the built-in sample suppliers
    #[arg(long)]
    pub(crate) suppliers_csv: Option<PathBuf>,
    /// Print the full renderer instructions as JSON for every turn
    #[arg(long)]
    pub(crate) verbose: bool,
}

fn configured_service() -> Result<IntelligenceService, AppError> {
    let config = AppConfig::load()?;
    Ok(intelligence_service(&config.intelligence))
}

pub(crate) fn run_select(args: SelectArgs) -> Result<(), AppError> {
    let SelectArgs {
        intent,
        surface,
        sub_intent,
        suppliers_csv,
        payload,
        expand,
    } = args;

    let mut options: ContextOptions = match payload {
        Some(path) => read_json_file(&path)?,
        None => ContextOptions::default(),
    };
    if let Some(path) = suppliers_csv {
        options.suppliers = SupplierCsvImporter::from_path(path)?;
    }
    if sub_intent.is_some() {
        options.sub_intent = sub_intent;
    }

    let response = configured_service()?.select(SelectionRequest {
        intent,
        surface,
        options,
        include_expansion: expand,
    });
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) fn run_confidence(args: ConfidenceArgs) -> Result<(), AppError> {
    let request: ConfidenceRequest = read_json_file(&args.payload)?;
    let descriptor = configured_service()?.confidence(request);
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        suppliers_csv,
        verbose,
    } = args;

    let service = configured_service()?;
    let suppliers = match suppliers_csv {
        Some(path) => {
            let imported = SupplierCsvImporter::from_path(&path)?;
            println!(
                "Loaded {} suppliers from {}",
                imported.len(),
                path.display()
            );
            imported
        }
        None => sample_suppliers(),
    };

    println!("Procurement intelligence demo");
    println!("\nComponent selection");

    let turns = demo_turns(&suppliers);
    for (label, request) in turns {
        let surface = request.surface;
        let response = service.select(request);
        render_selection(label, surface, &response);
        if verbose {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    println!("\nSource confidence");
    for (label, request) in demo_confidence_requests() {
        let descriptor = service.confidence(request);
        render_confidence(label, &descriptor);
    }

    Ok(())
}

fn demo_turns(suppliers: &[Supplier]) -> Vec<(&'static str, SelectionRequest)> {
    let request = |intent, surface, options, include_expansion| SelectionRequest {
        intent,
        surface,
        options,
        include_expansion,
    };

    vec![
        (
            "Portfolio overview",
            request(
                Intent::PortfolioOverview,
                Surface::Inline,
                ContextOptions {
                    portfolio: Some(sample_portfolio()),
                    ..ContextOptions::default()
                },
                true,
            ),
        ),
        (
            "High-risk suppliers",
            request(
                Intent::FilteredDiscovery,
                Surface::Compact,
                ContextOptions {
                    sub_intent: Some(SubIntent::ByRiskLevel),
                    suppliers: suppliers
                        .iter()
                        .filter(|supplier| supplier.risk_level == RiskLevel::High)
                        .cloned()
                        .collect(),
                    ..ContextOptions::default()
                },
                true,
            ),
        ),
        (
            "Why is this supplier's score what it is?",
            request(
                Intent::SupplierDeepDive,
                Surface::Inline,
                ContextOptions {
                    sub_intent: Some(SubIntent::ScoreInquiry),
                    suppliers: suppliers.iter().take(1).cloned().collect(),
                    ..ContextOptions::default()
                },
                true,
            ),
        ),
        (
            "Compare suppliers",
            request(
                Intent::Comparison,
                Surface::Panel,
                ContextOptions {
                    suppliers: suppliers.iter().take(3).cloned().collect(),
                    ..ContextOptions::default()
                },
                false,
            ),
        ),
        (
            "What changed this month?",
            request(
                Intent::TrendDetection,
                Surface::Compact,
                ContextOptions {
                    risk_changes: sample_risk_changes(),
                    ..ContextOptions::default()
                },
                true,
            ),
        ),
        (
            "Full supplier financials",
            request(
                Intent::RestrictedQuery,
                Surface::Inline,
                ContextOptions::default(),
                false,
            ),
        ),
        (
            "Commodity outlook with a custom widget",
            request(
                Intent::MarketContext,
                Surface::Inline,
                ContextOptions {
                    widget: Some(WidgetPayload::from_parts(
                        "sankey_flow",
                        json!({ "nodes": ["mine", "mill", "plant"] }),
                    )),
                    ..ContextOptions::default()
                },
                false,
            ),
        ),
        (
            "Explain the methodology",
            request(
                Intent::ExplainWhy,
                Surface::Inline,
                ContextOptions::default(),
                false,
            ),
        ),
    ]
}

fn render_selection(label: &str, surface: Surface, response: &SelectionResponse) {
    let outcome = match &response.resolution {
        Resolution::Component { config } => format!(
            "{} ({} props)",
            config.component.name(),
            config.props.len()
        ),
        Resolution::NoPresentation => "no visual".to_string(),
        placeholder @ Resolution::Placeholder { .. } => {
            placeholder.placeholder_label().unwrap_or_default()
        }
    };
    println!("- {label} [{}]: {outcome}", surface.label());

    if let Some(expansion) = &response.expansion {
        println!(
            "    expands to {} at {}",
            expansion.config.component.name(),
            expansion.surface.label()
        );
    }
}

fn render_confidence(label: &str, descriptor: &ConfidenceDescriptor) {
    println!(
        "- {label}: {} ({}; {} proprietary, {} web{})",
        descriptor.level.badge_label(),
        descriptor.reason,
        descriptor.beroe_source_count,
        descriptor.web_source_count,
        if descriptor.show_expand_to_web {
            "; offer web search"
        } else {
            ""
        }
    );
    if let Some(category) = &descriptor.matched_category {
        println!("    managed category: {category}");
    }
}

fn demo_confidence_requests() -> Vec<(&'static str, ConfidenceRequest)> {
    let managed = Some(vec![
        "Steel (Hot Rolled Coil)".to_string(),
        "Corrugated Packaging".to_string(),
    ]);

    vec![
        (
            "Steel price outlook",
            ConfidenceRequest {
                sources: ResponseSources {
                    internal: proprietary_sources(2),
                    web: Vec::new(),
                },
                detected_category: Some("Steel".to_string()),
                managed_categories: managed.clone(),
                ..ConfidenceRequest::default()
            },
        ),
        (
            "Aluminum supply risk",
            ConfidenceRequest {
                sources: ResponseSources {
                    internal: proprietary_sources(1),
                    web: web_sources(2),
                },
                detected_category: Some("Aluminum".to_string()),
                managed_categories: managed.clone(),
                ..ConfidenceRequest::default()
            },
        ),
        (
            "Port congestion news",
            ConfidenceRequest {
                sources: ResponseSources {
                    internal: Vec::new(),
                    web: web_sources(3),
                },
                managed_categories: managed,
                ..ConfidenceRequest::default()
            },
        ),
    ]
}

fn proprietary_sources(count: usize) -> Vec<InternalSource> {
    (0..count)
        .map(|index| InternalSource {
            name: format!("Category intelligence brief #{}", index + 1),
            provider: ProviderType::Beroe,
            url: None,
        })
        .collect()
}

fn web_sources(count: usize) -> Vec<WebSource> {
    (0..count)
        .map(|index| WebSource {
            name: format!("Industry news #{}", index + 1),
            url: None,
        })
        .collect()
}

fn sample_supplier(id: &str, name: &str, category: &str, spend: f64, score: u8) -> Supplier {
    Supplier {
        id: id.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        country: None,
        spend: Some(spend),
        risk_score: Some(score),
        risk_level: RiskLevel::from_score(Some(score)),
        trend: None,
    }
}

fn sample_suppliers() -> Vec<Supplier> {
    vec![
        sample_supplier("sup-101", "Rhein Stahl GmbH", "Steel (Hot Rolled Coil)", 3_400_000.0, 81),
        sample_supplier("sup-102", "Baltic Coil AB", "Steel (Hot Rolled Coil)", 1_150_000.0, 77),
        sample_supplier("sup-103", "Lusitania Packaging", "Corrugated Packaging", 480_000.0, 35),
        sample_supplier("sup-104", "Great Lakes Resin", "Plastics", 720_000.0, 58),
    ]
}

fn sample_portfolio() -> PortfolioSnapshot {
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
        last_updated: None,
    }
}

fn sample_risk_changes() -> Vec<RiskChange> {
    vec![
        RiskChange {
            supplier_id: "sup-102".to_string(),
            supplier_name: "Baltic Coil AB".to_string(),
            previous_score: 58,
            current_score: 77,
            previous_level: RiskLevel::Medium,
            current_level: RiskLevel::High,
            changed_on: None,
        },
        RiskChange {
            supplier_id: "sup-103".to_string(),
            supplier_name: "Lusitania Packaging".to_string(),
            previous_score: 44,
            current_score: 35,
            previous_level: RiskLevel::Medium,
            current_level: RiskLevel::Low,
            changed_on: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_ai::intelligence::{ComponentId, ConfidenceLevel};

    #[test]
    fn demo_turns_cover_every_fallback_outcome() {
        let service = IntelligenceService::default();
        let outcomes: Vec<Resolution> = demo_turns(&sample_suppliers())
            .into_iter()
            .map(|(_, request)| service.select(request).resolution)
            .collect();

        assert_eq!(
            outcomes[0].config().map(|config| config.component),
            Some(ComponentId::RiskDistributionWidget)
        );
        assert_eq!(
            outcomes[2].config().map(|config| config.component),
            Some(ComponentId::ScoreBreakdownWidget)
        );
        assert!(outcomes
            .iter()
            .any(|outcome| matches!(outcome, Resolution::Placeholder { .. })));
        assert_eq!(outcomes.last(), Some(&Resolution::NoPresentation));
    }

    #[test]
    fn demo_confidence_requests_span_levels() {
        let service = IntelligenceService::default();
        let levels: Vec<ConfidenceLevel> = demo_confidence_requests()
            .into_iter()
            .map(|(_, request)| service.confidence(request).level)
            .collect();

        assert_eq!(
            levels,
            vec![
                ConfidenceLevel::High,
                ConfidenceLevel::Medium,
                ConfidenceLevel::WebOnly
            ]
        );
    }
}
