use procure_ai::intelligence::confidence::{
    matches_managed_category, InternalSource, ProviderType, WebSource,
};
use procure_ai::intelligence::{
    calculate_source_confidence, ConfidenceLevel, InternalSourcePolicy, ResponseSources,
    SourceConfidenceClassifier,
};

fn beroe(count: usize) -> Vec<InternalSource> {
    (0..count)
        .map(|index| InternalSource {
            name: format!("Steel market outlook Q{}", index + 1),
            provider: ProviderType::Beroe,
            url: None,
        })
        .collect()
}

fn articles(count: usize) -> Vec<WebSource> {
    (0..count)
        .map(|index| WebSource {
            name: format!("Trade journal {index}"),
            url: None,
        })
        .collect()
}

const MANAGED: &[&str] = &["Steel (Hot Rolled Coil)", "Corrugated Packaging", "IT"];

#[test]
fn managed_category_with_proprietary_coverage_earns_trust_badge() {
    let sources = ResponseSources {
        internal: beroe(3),
        web: Vec::new(),
    };

    let descriptor = calculate_source_confidence(&sources, Some("Steel"), Some(MANAGED));

    assert_eq!(descriptor.level, ConfidenceLevel::High);
    assert!(descriptor.is_managed_category);
    assert_eq!(descriptor.beroe_source_count, 3);
    assert!(!descriptor.show_expand_to_web);
}

#[test]
fn confidence_walks_down_the_decision_list() {
    let cases = [
        (2, 0, Some("corrugated"), ConfidenceLevel::High),
        (2, 0, Some("aluminum"), ConfidenceLevel::Medium),
        (1, 5, None, ConfidenceLevel::Medium),
        (0, 5, Some("steel"), ConfidenceLevel::WebOnly),
        (0, 0, Some("steel"), ConfidenceLevel::Low),
    ];

    for (internal, web, category, expected) in cases {
        let sources = ResponseSources {
            internal: beroe(internal),
            web: articles(web),
        };
        let descriptor = calculate_source_confidence(&sources, category, Some(MANAGED));
        assert_eq!(
            descriptor.level, expected,
            "internal={internal} web={web} category={category:?}"
        );
    }
}

#[test]
fn short_managed_words_never_match_by_subset() {
    assert!(!matches_managed_category("it services", MANAGED));
    assert!(matches_managed_category("it", MANAGED));
    assert!(matches_managed_category("hot rolled steel", &["Steel (HRC)"]));
}

#[test]
fn descriptor_serializes_in_camel_case() {
    let descriptor = SourceConfidenceClassifier::new(InternalSourcePolicy::ProprietaryOnly)
        .classify(&ResponseSources::default(), None, None::<&[&str]>);

    let encoded = serde_json::to_value(&descriptor).expect("descriptor encodes");
    assert_eq!(encoded["level"], "low");
    assert_eq!(encoded["showExpandToWeb"], true);
    assert_eq!(encoded["isManagedCategory"], false);
}
