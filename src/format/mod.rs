//! Presentation records for pairwise regression results
//!
//! [`ResultFormatter`] turns each [`PairwiseRegressionResult`] into a lag
//! annotated label and a small ordered list of display strings. Rendering the
//! records (markdown, plain text) is pure string work; nothing here performs
//! I/O.

use serde::Serialize;
use std::fmt;

use crate::config::FormatConfig;
use crate::error::Result;
use crate::pairwise::{PairwiseRegressionResult, SkipReason};

/// Keys of a fitted result's statistics, in display order
pub const FITTED_KEYS: [&str; 5] = ["observations", "intercept", "slope", "p_value", "r_squared"];

/// Key of the single entry describing a skipped pair
pub const WARNING_KEY: &str = "warning";

/// Key of the single entry describing a failed pair
pub const ERROR_KEY: &str = "error";

/// Display-ready version of one result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedResult {
    /// `<y_name>(<y_lag>) ~ <x_name>(<x_lag>)`
    pub label: String,
    /// `fitted`, `skipped` or `failed`
    pub status: &'static str,
    /// Reason code when the pair was not fitted
    pub reason: Option<&'static str>,
    /// Ordered key/value pairs
    pub stats: Vec<(String, String)>,
}

impl FormattedResult {
    /// Look up a statistic by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.stats.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Heading followed by a bullet list
    pub fn to_markdown(&self) -> String {
        let mut out = format!("#### `{}`\n", self.label);
        for (key, value) in &self.stats {
            out.push_str(&format!("- **{}**: {}\n", key, value));
        }
        out
    }
}

impl fmt::Display for FormattedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        let width = self.stats.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in &self.stats {
            writeln!(f, "  {:<width$}  {}", key, value, width = width)?;
        }
        Ok(())
    }
}

/// Builds [`FormattedResult`]s with a fixed number of decimals
#[derive(Debug, Clone, Default)]
pub struct ResultFormatter {
    config: FormatConfig,
}

impl ResultFormatter {
    pub fn new(config: FormatConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn precision(&self) -> usize {
        self.config.precision
    }

    pub fn format(&self, result: &PairwiseRegressionResult) -> FormattedResult {
        let label = result.label();
        match result {
            PairwiseRegressionResult::Fitted {
                n_obs,
                intercept,
                slope,
                slope_p_value,
                r_squared,
                ..
            } => {
                let values = [
                    n_obs.to_string(),
                    self.decimal(*intercept),
                    self.decimal(*slope),
                    self.decimal(*slope_p_value),
                    self.decimal(*r_squared),
                ];
                FormattedResult {
                    label,
                    status: "fitted",
                    reason: None,
                    stats: FITTED_KEYS
                        .iter()
                        .zip(values)
                        .map(|(k, v)| (k.to_string(), v))
                        .collect(),
                }
            }
            PairwiseRegressionResult::Skipped { reason, n_obs, .. } => FormattedResult {
                label,
                status: "skipped",
                reason: Some(reason.code()),
                stats: vec![(WARNING_KEY.to_string(), skip_message(*reason, *n_obs))],
            },
            PairwiseRegressionResult::Failed { n_obs, message, .. } => FormattedResult {
                label,
                status: "failed",
                reason: result.reason_code(),
                stats: vec![(
                    ERROR_KEY.to_string(),
                    format!("regression failed on {} aligned rows: {}", n_obs, message),
                )],
            },
        }
    }

    pub fn format_all(&self, results: &[PairwiseRegressionResult]) -> Vec<FormattedResult> {
        results.iter().map(|r| self.format(r)).collect()
    }

    fn decimal(&self, value: f64) -> String {
        format!("{:.*}", self.config.precision, value)
    }
}

fn skip_message(reason: SkipReason, n_obs: usize) -> String {
    match reason {
        SkipReason::InsufficientData => format!(
            "too few aligned observations for a meaningful regression ({} rows)",
            n_obs
        ),
        SkipReason::DegeneratePredictor => format!(
            "predictor is constant over the {} aligned rows; slope is undefined",
            n_obs
        ),
        SkipReason::DegenerateResponse => format!(
            "response is constant over the {} aligned rows; R² is undefined",
            n_obs
        ),
    }
}

/// Render a sequence of records as one markdown document
pub fn render_markdown(records: &[FormattedResult]) -> String {
    records
        .iter()
        .map(FormattedResult::to_markdown)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lag::Lag;

    fn fitted() -> PairwiseRegressionResult {
        PairwiseRegressionResult::Fitted {
            y_name: "B".into(),
            x_name: "A".into(),
            y_shift: Lag(0),
            x_shift: Lag(2),
            n_obs: 10,
            intercept: 0.000_012_3,
            slope: 2.0,
            slope_p_value: 0.049_96,
            r_squared: 0.987_654,
        }
    }

    #[test]
    fn test_fitted_record() {
        let record = ResultFormatter::default().format(&fitted());
        assert_eq!(record.label, "B(t) ~ A(t-2)");
        assert_eq!(record.status, "fitted");
        assert_eq!(record.reason, None);
        assert_eq!(record.keys(), FITTED_KEYS.to_vec());
        assert_eq!(record.get("observations"), Some("10"));
        assert_eq!(record.get("intercept"), Some("0.0000"));
        assert_eq!(record.get("slope"), Some("2.0000"));
        assert_eq!(record.get("p_value"), Some("0.0500"));
        assert_eq!(record.get("r_squared"), Some("0.9877"));
    }

    #[test]
    fn test_precision() {
        let formatter = ResultFormatter::new(FormatConfig { precision: 2 }).unwrap();
        assert_eq!(formatter.format(&fitted()).get("r_squared"), Some("0.99"));
        assert!(ResultFormatter::new(FormatConfig { precision: 40 }).is_err());
    }

    #[test]
    fn test_skipped_record() {
        let result = PairwiseRegressionResult::Skipped {
            y_name: "A".into(),
            x_name: "C".into(),
            y_shift: Lag(-1),
            x_shift: Lag(0),
            reason: SkipReason::InsufficientData,
            n_obs: 4,
        };
        let record = ResultFormatter::default().format(&result);
        assert_eq!(record.label, "A(t+1) ~ C(t)");
        assert_eq!(record.reason, Some("insufficient_data"));
        assert_eq!(record.keys(), vec![WARNING_KEY]);
        assert!(record.get(WARNING_KEY).unwrap().contains("4 rows"));
    }

    #[test]
    fn test_markdown_and_text() {
        let record = ResultFormatter::default().format(&fitted());
        let md = record.to_markdown();
        assert!(md.starts_with("#### `B(t) ~ A(t-2)`\n"));
        assert!(md.contains("- **slope**: 2.0000\n"));

        let text = record.to_string();
        assert!(text.starts_with("B(t) ~ A(t-2)\n"));
        assert!(text.contains("observations  10"));

        let doc = render_markdown(&[record.clone(), record]);
        assert_eq!(doc.matches("####").count(), 2);
    }
}
