use serde::{Deserialize, Serialize};

/// Provider tag attached to an internal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    /// Proprietary, verified intelligence.
    Beroe,
    Dnb,
    Ecovadis,
    Moodys,
    #[serde(other)]
    Other,
}

impl ProviderType {
    pub const fn is_proprietary(self) -> bool {
        matches!(self, Self::Beroe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalSource {
    pub name: String,
    pub provider: ProviderType,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    Internal,
    Web,
}

/// Flat, tagged source reference as emitted by the response generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub name: String,
    pub origin: SourceOrigin,
    #[serde(default = "default_provider")]
    pub provider: ProviderType,
    #[serde(default)]
    pub url: Option<String>,
}

fn default_provider() -> ProviderType {
    ProviderType::Other
}

/// Evidence behind a single response, split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseSources {
    pub internal: Vec<InternalSource>,
    pub web: Vec<WebSource>,
}

impl ResponseSources {
    pub fn partition<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = SourceRef>,
    {
        let mut partitioned = Self::default();
        for source in sources {
            match source.origin {
                SourceOrigin::Internal => partitioned.internal.push(InternalSource {
                    name: source.name,
                    provider: source.provider,
                    url: source.url,
                }),
                SourceOrigin::Web => partitioned.web.push(WebSource {
                    name: source.name,
                    url: source.url,
                }),
            }
        }
        partitioned
    }

    pub fn proprietary_count(&self) -> usize {
        self.internal
            .iter()
            .filter(|source| source.provider.is_proprietary())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.web.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_splits_by_origin_and_keeps_provider() {
        let sources = ResponseSources::partition(vec![
            SourceRef {
                name: "Steel market outlook".to_string(),
                origin: SourceOrigin::Internal,
                provider: ProviderType::Beroe,
                url: None,
            },
            SourceRef {
                name: "Reuters".to_string(),
                origin: SourceOrigin::Web,
                provider: ProviderType::Other,
                url: Some("https://reuters.com".to_string()),
            },
            SourceRef {
                name: "Financial health".to_string(),
                origin: SourceOrigin::Internal,
                provider: ProviderType::Dnb,
                url: None,
            },
        ]);

        assert_eq!(sources.internal.len(), 2);
        assert_eq!(sources.web.len(), 1);
        assert_eq!(sources.proprietary_count(), 1);
    }

    #[test]
    fn unknown_provider_labels_decode_as_other() {
        let source: InternalSource =
            serde_json::from_str(r#"{ "name": "Rating", "provider": "sp_global" }"#)
                .expect("source decodes");
        assert_eq!(source.provider, ProviderType::Other);
    }
}
