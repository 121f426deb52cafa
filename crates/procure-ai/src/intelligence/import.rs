use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::domain::{RiskLevel, Supplier};

#[derive(Debug, thiserror::Error)]
pub enum SupplierImportError {
    #[error("failed to read supplier export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid supplier CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unrecognized risk level '{value}' for supplier {supplier_id}")]
    RiskLevel { supplier_id: String, value: String },
    #[error("risk score '{value}' for supplier {supplier_id} is not a whole number from 0 to 100")]
    RiskScore { supplier_id: String, value: String },
}

/// Loads supplier records from a portfolio CSV export.
pub struct SupplierCsvImporter;

impl SupplierCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Supplier>, SupplierImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Supplier>, SupplierImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut suppliers = Vec::new();

        for row in csv_reader.deserialize::<SupplierRow>() {
            suppliers.push(row?.into_supplier()?);
        }

        Ok(suppliers)
    }
}

#[derive(Debug, Deserialize)]
struct SupplierRow {
    #[serde(rename = "Supplier ID")]
    id: String,
    #[serde(rename = "Supplier Name")]
    name: String,
    #[serde(rename = "Category", default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    #[serde(rename = "Country", default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(rename = "Spend", default, deserialize_with = "empty_string_as_none")]
    spend: Option<String>,
    #[serde(rename = "Risk Score", default, deserialize_with = "empty_string_as_none")]
    risk_score: Option<String>,
    #[serde(rename = "Risk Level", default, deserialize_with = "empty_string_as_none")]
    risk_level: Option<String>,
}

impl SupplierRow {
    fn into_supplier(self) -> Result<Supplier, SupplierImportError> {
        let spend = self.spend.as_deref().and_then(parse_amount);
        let risk_score = match self.risk_score.as_deref() {
            Some(value) => Some(parse_risk_score(value).ok_or_else(|| {
                SupplierImportError::RiskScore {
                    supplier_id: self.id.clone(),
                    value: value.to_string(),
                }
            })?),
            None => None,
        };
        let risk_level = match self.risk_level.as_deref() {
            Some(value) => parse_risk_level(value).ok_or_else(|| SupplierImportError::RiskLevel {
                supplier_id: self.id.clone(),
                value: value.to_string(),
            })?,
            None => RiskLevel::from_score(risk_score),
        };

        Ok(Supplier {
            id: self.id,
            name: self.name,
            category: self.category,
            country: self.country,
            spend,
            risk_score,
            risk_level,
            trend: None,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Parses amounts such as `1,250,000.50` or `$4200`.
fn parse_amount(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|amount| amount.is_finite())
}

fn parse_risk_score(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|score| *score <= 100)
}

fn parse_risk_level(value: &str) -> Option<RiskLevel> {
    let normalized: String = value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();

    match normalized.as_str() {
        "high" => Some(RiskLevel::High),
        "mediumhigh" => Some(RiskLevel::MediumHigh),
        "medium" => Some(RiskLevel::Medium),
        "low" => Some(RiskLevel::Low),
        "unrated" | "notrated" | "na" => Some(RiskLevel::Unrated),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Supplier ID,Supplier Name,Category,Country,Spend,Risk Score,Risk Level\n";

    #[test]
    fn imports_rows_and_parses_amounts() {
        let csv = format!(
            "{HEADER}sup-1,Acme Metals,Steel,DE,\"1,250,000.50\",82,High\nsup-2,Blue Freight,,US,,,\n"
        );

        let suppliers = SupplierCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[0].spend, Some(1_250_000.5));
        assert_eq!(suppliers[0].risk_level, RiskLevel::High);
        assert_eq!(suppliers[1].category, None);
        assert_eq!(suppliers[1].risk_level, RiskLevel::Unrated);
    }

    #[test]
    fn derives_missing_level_from_score() {
        let csv = format!("{HEADER}sup-3,Nordic Pulp,Packaging,SE,$4200,63,\n");

        let suppliers = SupplierCsvImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(suppliers[0].risk_score, Some(63));
        assert_eq!(suppliers[0].risk_level, RiskLevel::MediumHigh);
        assert_eq!(suppliers[0].spend, Some(4200.0));
    }

    #[test]
    fn accepts_hyphenated_risk_levels() {
        assert_eq!(parse_risk_level("Medium-High"), Some(RiskLevel::MediumHigh));
        assert_eq!(parse_risk_level("medium_high"), Some(RiskLevel::MediumHigh));
        assert_eq!(parse_risk_level("critical"), None);
    }

    #[test]
    fn rejects_unknown_risk_levels() {
        let csv = format!("{HEADER}sup-4,Odd Corp,Chemicals,FR,100,50,Severe\n");

        let error = SupplierCsvImporter::from_reader(Cursor::new(csv)).expect_err("import fails");

        match error {
            SupplierImportError::RiskLevel { supplier_id, value } => {
                assert_eq!(supplier_id, "sup-4");
                assert_eq!(value, "Severe");
            }
            other => panic!("expected risk level error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unparseable_risk_scores() {
        for score in ["abc", "82.5", "150"] {
            let csv = format!("{HEADER}sup-5,Odd Corp,Chemicals,FR,100,{score},\n");

            let error = SupplierCsvImporter::from_reader(Cursor::new(csv)).expect_err("import fails");

            match error {
                SupplierImportError::RiskScore { supplier_id, value } => {
                    assert_eq!(supplier_id, "sup-5");
                    assert_eq!(value, score);
                }
                other => panic!("expected risk score error for {score}, got {other:?}"),
            }
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        let error = SupplierCsvImporter::from_path("./does-not-exist.csv").expect_err("io error");
        assert!(matches!(error, SupplierImportError::Io(_)));
    }
}
