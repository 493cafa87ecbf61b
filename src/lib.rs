//! Lag-aware pairwise regression for time-indexed numeric series
//!
//! Pick an ordered selection of series from a [`TimeSeriesTable`], give each a
//! [`Lag`] through a [`ShiftMap`], and [`PairwiseRegressionEngine`] fits an OLS
//! line for every unordered pair of the shifted series.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use lagreg::{PairwiseRegressionEngine, ResultFormatter, ShiftMap, TimeIndex, TimeSeriesTable};
//!
//! let index = TimeIndex::monthly(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), 12).unwrap();
//! let mut table = TimeSeriesTable::new(index);
//! table.add_column("A", (1..=12).map(|v| v as f64).collect()).unwrap();
//! table.add_column("B", (1..=12).map(|v| 2.0 * v as f64).collect()).unwrap();
//!
//! let shifts = ShiftMap::new().with("B", 0).with("A", 2);
//! let results = PairwiseRegressionEngine::default()
//!     .run(&["B", "A"], &table, &shifts)
//!     .unwrap();
//!
//! let record = ResultFormatter::default().format(&results[0]);
//! assert_eq!(record.label, "B(t) ~ A(t-2)");
//! assert_eq!(record.get("observations"), Some("10"));
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod io;
pub mod lag;
pub mod pairwise;
pub mod series;
pub mod stats;
pub mod table;
pub mod temporal;

// Re-export commonly used types
pub use config::{Config, EngineConfig, FormatConfig, MissingShiftPolicy};
pub use error::{Error, Result};
pub use format::{FormattedResult, ResultFormatter};
pub use index::TimeIndex;
pub use lag::{align, AlignedPair, Lag, ShiftMap};
pub use pairwise::{run_pairwise, PairwiseRegressionEngine, PairwiseRegressionResult, SkipReason};
pub use series::Series;
pub use stats::SimpleRegressionFit;
pub use table::TimeSeriesTable;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
