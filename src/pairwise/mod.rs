//! Pairwise lagged regression
//!
//! Given an ordered selection of series, a [`ShiftMap`] and a table, the
//! engine enumerates every unordered pair in combinatorial order, aligns the
//! two shifted series and fits `Y ~ X` by ordinary least squares, where `Y` is
//! the series that comes first in the selection.
//!
//! Problems with the selection or the shifts abort the whole batch before
//! anything is computed. Problems with a single pair (too few rows, constant
//! series, non-finite arithmetic) are reported in that pair's result and the
//! remaining pairs are still evaluated.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::config::{EngineConfig, MissingShiftPolicy};
use crate::error::{Error, Result};
use crate::lag::{align, Lag, ShiftMap};
use crate::series::Series;
use crate::stats::regression::fit_simple_ols;
use crate::table::TimeSeriesTable;

/// Why a pair was not fitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer aligned rows than the configured minimum
    InsufficientData,
    /// The predictor is constant on the aligned rows
    DegeneratePredictor,
    /// The response is constant on the aligned rows
    DegenerateResponse,
}

impl SkipReason {
    /// Machine-readable reason code
    pub fn code(self) -> &'static str {
        match self {
            SkipReason::InsufficientData => "insufficient_data",
            SkipReason::DegeneratePredictor => "degenerate_predictor",
            SkipReason::DegenerateResponse => "degenerate_response",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Reason code carried by [`PairwiseRegressionResult::Failed`]
pub const NUMERIC_INSTABILITY: &str = "numeric_instability";

/// Outcome of one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairwiseRegressionResult {
    Fitted {
        y_name: String,
        x_name: String,
        y_shift: Lag,
        x_shift: Lag,
        n_obs: usize,
        intercept: f64,
        slope: f64,
        slope_p_value: f64,
        r_squared: f64,
    },
    Skipped {
        y_name: String,
        x_name: String,
        y_shift: Lag,
        x_shift: Lag,
        reason: SkipReason,
        n_obs: usize,
    },
    /// The fit produced non-finite numbers that no known degenerate case explains
    Failed {
        y_name: String,
        x_name: String,
        y_shift: Lag,
        x_shift: Lag,
        n_obs: usize,
        message: String,
    },
}

impl PairwiseRegressionResult {
    pub fn y_name(&self) -> &str {
        match self {
            Self::Fitted { y_name, .. } | Self::Skipped { y_name, .. } | Self::Failed { y_name, .. } => {
                y_name
            }
        }
    }

    pub fn x_name(&self) -> &str {
        match self {
            Self::Fitted { x_name, .. } | Self::Skipped { x_name, .. } | Self::Failed { x_name, .. } => {
                x_name
            }
        }
    }

    pub fn y_shift(&self) -> Lag {
        match self {
            Self::Fitted { y_shift, .. }
            | Self::Skipped { y_shift, .. }
            | Self::Failed { y_shift, .. } => *y_shift,
        }
    }

    pub fn x_shift(&self) -> Lag {
        match self {
            Self::Fitted { x_shift, .. }
            | Self::Skipped { x_shift, .. }
            | Self::Failed { x_shift, .. } => *x_shift,
        }
    }

    /// Number of aligned rows the pair had
    pub fn n_obs(&self) -> usize {
        match self {
            Self::Fitted { n_obs, .. } | Self::Skipped { n_obs, .. } | Self::Failed { n_obs, .. } => {
                *n_obs
            }
        }
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted { .. })
    }

    /// Reason code for results that were not fitted
    pub fn reason_code(&self) -> Option<&'static str> {
        match self {
            Self::Fitted { .. } => None,
            Self::Skipped { reason, .. } => Some(reason.code()),
            Self::Failed { .. } => Some(NUMERIC_INSTABILITY),
        }
    }

    /// `<y_name>(<y_lag>) ~ <x_name>(<x_lag>)`
    pub fn label(&self) -> String {
        format!(
            "{}({}) ~ {}({})",
            self.y_name(),
            self.y_shift(),
            self.x_name(),
            self.x_shift()
        )
    }
}

/// Index pairs `(i, j)` with `i < j` in combinatorial order; `i` advances slowest
pub fn pair_indices(k: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(k.saturating_mul(k.saturating_sub(1)) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            pairs.push((i, j));
        }
    }
    pairs
}

/// A selected series with its resolved lag
struct PlannedSeries<'a> {
    series: &'a Series,
    lag: Lag,
}

/// Runs lagged OLS over every pair of a selection
#[derive(Debug, Clone, Default)]
pub struct PairwiseRegressionEngine {
    config: EngineConfig,
}

impl PairwiseRegressionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate the selection and return each selected series with its lag,
    /// without fitting anything
    pub fn plan<S: AsRef<str>>(
        &self,
        selected: &[S],
        table: &TimeSeriesTable,
        shifts: &ShiftMap,
    ) -> Result<Vec<(String, Lag)>> {
        Ok(self
            .resolve(selected, table, shifts)?
            .into_iter()
            .map(|planned| (planned.series.name().to_string(), planned.lag))
            .collect())
    }

    /// Fit every pair of `selected` sequentially
    pub fn run<S: AsRef<str>>(
        &self,
        selected: &[S],
        table: &TimeSeriesTable,
        shifts: &ShiftMap,
    ) -> Result<Vec<PairwiseRegressionResult>> {
        let planned = self.resolve(selected, table, shifts)?;
        let results: Vec<PairwiseRegressionResult> = pair_indices(planned.len())
            .into_iter()
            .map(|(i, j)| self.regress_planned(&planned[i], &planned[j]))
            .collect();

        log_summary(&results);
        Ok(results)
    }

    /// Same as [`run`](Self::run) with pairs evaluated on the rayon thread
    /// pool. The output order and values are identical.
    pub fn run_parallel<S: AsRef<str>>(
        &self,
        selected: &[S],
        table: &TimeSeriesTable,
        shifts: &ShiftMap,
    ) -> Result<Vec<PairwiseRegressionResult>> {
        let planned = self.resolve(selected, table, shifts)?;
        let results: Vec<PairwiseRegressionResult> = pair_indices(planned.len())
            .into_par_iter()
            .map(|(i, j)| self.regress_planned(&planned[i], &planned[j]))
            .collect();

        log_summary(&results);
        Ok(results)
    }

    /// Align and fit a single pair, regressing `y` on `x`
    pub fn regress_pair(
        &self,
        y: &Series,
        y_shift: Lag,
        x: &Series,
        x_shift: Lag,
    ) -> PairwiseRegressionResult {
        let pair = align(y.values(), y_shift, x.values(), x_shift);
        let n_obs = pair.len();
        let y_name = y.name().to_string();
        let x_name = x.name().to_string();

        let skipped = |reason: SkipReason| PairwiseRegressionResult::Skipped {
            y_name: y_name.clone(),
            x_name: x_name.clone(),
            y_shift,
            x_shift,
            reason,
            n_obs,
        };

        let result = if n_obs < self.config.min_observations {
            skipped(SkipReason::InsufficientData)
        } else {
            match fit_simple_ols(pair.y(), pair.x()) {
                Ok(fit) => PairwiseRegressionResult::Fitted {
                    y_name: y_name.clone(),
                    x_name: x_name.clone(),
                    y_shift,
                    x_shift,
                    n_obs: fit.n_obs,
                    intercept: fit.intercept,
                    slope: fit.slope,
                    slope_p_value: fit.slope_p_value,
                    r_squared: fit.r_squared,
                },
                Err(Error::DegeneratePredictor { .. }) => skipped(SkipReason::DegeneratePredictor),
                Err(Error::DegenerateResponse { .. }) => skipped(SkipReason::DegenerateResponse),
                Err(Error::InsufficientData(_)) => skipped(SkipReason::InsufficientData),
                Err(err) => PairwiseRegressionResult::Failed {
                    y_name: y_name.clone(),
                    x_name: x_name.clone(),
                    y_shift,
                    x_shift,
                    n_obs,
                    message: err.to_string(),
                },
            }
        };

        match &result {
            PairwiseRegressionResult::Failed { message, .. } => {
                log::warn!("{}: fit failed with {} rows: {}", result.label(), n_obs, message)
            }
            _ => log::debug!(
                "{}: n_obs={} status={}",
                result.label(),
                n_obs,
                result.reason_code().unwrap_or("fitted")
            ),
        }

        result
    }

    fn regress_planned(&self, y: &PlannedSeries<'_>, x: &PlannedSeries<'_>) -> PairwiseRegressionResult {
        self.regress_pair(y.series, y.lag, x.series, x.lag)
    }

    fn resolve<'a, S: AsRef<str>>(
        &self,
        selected: &[S],
        table: &'a TimeSeriesTable,
        shifts: &ShiftMap,
    ) -> Result<Vec<PlannedSeries<'a>>> {
        let mut seen = HashSet::with_capacity(selected.len());
        for name in selected {
            if !seen.insert(name.as_ref()) {
                return Err(Error::DuplicateSelection(name.as_ref().to_string()));
            }
        }

        if selected.len() < 2 {
            return Err(Error::InsufficientSelection(selected.len()));
        }

        let mut unknown: Vec<String> = selected
            .iter()
            .map(|name| name.as_ref())
            .chain(shifts.names())
            .filter(|name| !table.has_series(name))
            .map(str::to_string)
            .collect();
        unknown.sort();
        unknown.dedup();
        if !unknown.is_empty() {
            return Err(Error::UnknownSeries(unknown));
        }

        let missing: Vec<String> = selected
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !shifts.contains(name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            match self.config.missing_shift {
                MissingShiftPolicy::Strict => return Err(Error::MissingShift(missing)),
                MissingShiftPolicy::DefaultZero => {
                    log::debug!("Using shift 0 for series without a shift: {}", missing.join(", "))
                }
            }
        }

        selected
            .iter()
            .map(|name| {
                let name = name.as_ref();
                Ok(PlannedSeries {
                    series: table.series(name)?,
                    lag: shifts.get(name).unwrap_or(Lag::ZERO),
                })
            })
            .collect()
    }
}

/// Run the engine with the default configuration
pub fn run_pairwise<S: AsRef<str>>(
    selected: &[S],
    table: &TimeSeriesTable,
    shifts: &ShiftMap,
) -> Result<Vec<PairwiseRegressionResult>> {
    PairwiseRegressionEngine::default().run(selected, table, shifts)
}

fn log_summary(results: &[PairwiseRegressionResult]) {
    let fitted = results.iter().filter(|r| r.is_fitted()).count();
    let failed = results
        .iter()
        .filter(|r| matches!(r, PairwiseRegressionResult::Failed { .. }))
        .count();
    log::info!(
        "Evaluated {} pairs: {} fitted, {} skipped, {} failed",
        results.len(),
        fitted,
        results.len() - fitted - failed,
        failed
    );
}
