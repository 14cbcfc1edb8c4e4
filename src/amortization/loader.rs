//! Load candidate mortgage configurations from CSV
//!
//! Expected columns: `Label,Principal,TermYears,StandardRate,FixedRate,FixedYears`.
//! The fixed columns may be left empty for a standard mortgage.

use csv::Reader;
use std::path::Path;

use super::MortgageTerms;
use crate::error::{PlannerError, Result};

/// Raw CSV row for a candidate mortgage
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Label")]
    label: String,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "TermYears")]
    term_years: u32,
    #[serde(rename = "StandardRate")]
    standard_rate: f64,
    #[serde(rename = "FixedRate", default)]
    fixed_rate: Option<f64>,
    #[serde(rename = "FixedYears", default)]
    fixed_years: Option<u32>,
}

/// A named candidate configuration
#[derive(Debug, Clone)]
pub struct MortgageCandidate {
    pub label: String,
    pub terms: MortgageTerms,
}

impl CsvRow {
    fn into_candidate(self) -> Result<MortgageCandidate> {
        let mut terms = MortgageTerms::standard(self.principal, self.term_years, self.standard_rate);

        match (self.fixed_rate, self.fixed_years) {
            (Some(rate), Some(years)) => terms = terms.with_fixed_period(rate, years),
            (None, None) => {}
            _ => {
                return Err(PlannerError::invalid(format!(
                    "candidate '{}' must give both FixedRate and FixedYears or neither",
                    self.label
                )))
            }
        }

        terms.validate()?;
        Ok(MortgageCandidate { label: self.label, terms })
    }
}

/// Load all candidates from a CSV file
pub fn load_candidates<P: AsRef<Path>>(path: P) -> Result<Vec<MortgageCandidate>> {
    let reader = Reader::from_path(path)?;
    read_candidates(reader)
}

/// Load candidates from any reader (e.g., string buffer, stdin)
pub fn load_candidates_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<MortgageCandidate>> {
    read_candidates(Reader::from_reader(reader))
}

fn read_candidates<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<MortgageCandidate>> {
    let mut candidates = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        candidates.push(row.into_candidate()?);
    }

    log::info!("Loaded {} mortgage candidates", candidates.len());
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANDIDATES: &str = "\
Label,Principal,TermYears,StandardRate,FixedRate,FixedYears
Tracker,200000,25,4.5,,
Two year fix,200000,25,5.5,3.9,2
";

    #[test]
    fn test_load_candidates() {
        let candidates = load_candidates_from_reader(CANDIDATES.as_bytes()).unwrap();
        assert_eq!(candidates.len(), 2);

        assert_eq!(candidates[0].label, "Tracker");
        assert!(candidates[0].terms.fixed.is_none());

        let fixed = candidates[1].terms.fixed.unwrap();
        assert_eq!(fixed.years, 2);
        assert_eq!(fixed.rate_percent, 3.9);
    }

    #[test]
    fn test_half_specified_fixed_period_rejected() {
        let data = "Label,Principal,TermYears,StandardRate,FixedRate,FixedYears\nBad,1000,5,4.0,3.0,\n";
        let err = load_candidates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn test_malformed_number_is_csv_error() {
        let data = "Label,Principal,TermYears,StandardRate,FixedRate,FixedYears\nBad,lots,5,4.0,,\n";
        let err = load_candidates_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, PlannerError::Csv(_)));
    }
}
