//! Temporal shift ("lag") handling
//!
//! A [`Lag`] moves a series along the shared time index by a whole number of
//! positions. The sign convention lives here and nowhere else:
//!
//! - after shifting by `s`, position `i` holds the value originally at `i - s`
//! - a positive lag therefore draws values from the past and renders as `t-s`
//! - a negative lag draws values from the future and renders as `t+|s|`
//! - a zero lag renders as `t`
//!
//! [`ShiftMap`] is the caller-constructed mapping from series name to lag that
//! is passed into the pairwise engine on every call.

pub mod align;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub use self::align::{align, shift_by, AlignedPair};

/// Signed positional shift applied to a single series
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Lag(pub i64);

impl Lag {
    /// No shift
    pub const ZERO: Lag = Lag(0);

    /// Create a lag of `periods` positions
    pub fn new(periods: i64) -> Self {
        Lag(periods)
    }

    /// Number of positions
    pub fn periods(self) -> i64 {
        self.0
    }

    /// Whether this lag leaves the series untouched
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Reverse shift
    pub fn inverse(self) -> Lag {
        Lag(self.0.saturating_neg())
    }

    /// Label relative to the observation time `t`
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl From<i64> for Lag {
    fn from(periods: i64) -> Self {
        Lag(periods)
    }
}

impl From<i32> for Lag {
    fn from(periods: i32) -> Self {
        Lag(i64::from(periods))
    }
}

impl fmt::Display for Lag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "t"),
            s if s > 0 => write!(f, "t-{}", s),
            s => write!(f, "t+{}", s.unsigned_abs()),
        }
    }
}

/// Per-series lag settings supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftMap {
    shifts: HashMap<String, Lag>,
}

impl ShiftMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lag of a series, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, lag: impl Into<Lag>) -> Option<Lag> {
        self.shifts.insert(name.into(), lag.into())
    }

    /// Builder-style variant of [`ShiftMap::insert`]
    pub fn with(mut self, name: impl Into<String>, lag: impl Into<Lag>) -> Self {
        self.insert(name, lag);
        self
    }

    /// Lag of a series, if one was set
    pub fn get(&self, name: &str) -> Option<Lag> {
        self.shifts.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shifts.contains_key(name)
    }

    /// Series names with a lag, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.shifts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.shifts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Lag)> {
        self.shifts.iter().map(|(name, lag)| (name.as_str(), *lag))
    }
}

impl<S: Into<String>, L: Into<Lag>> FromIterator<(S, L)> for ShiftMap {
    fn from_iter<I: IntoIterator<Item = (S, L)>>(iter: I) -> Self {
        let mut map = ShiftMap::new();
        for (name, lag) in iter {
            map.insert(name, lag);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lag_labels() {
        assert_eq!(Lag(0).label(), "t");
        assert_eq!(Lag(2).label(), "t-2");
        assert_eq!(Lag(-3).label(), "t+3");
        assert_eq!(Lag(i64::MIN).label(), format!("t+{}", i64::MIN.unsigned_abs()));
    }

    #[test]
    fn test_inverse() {
        assert_eq!(Lag(5).inverse(), Lag(-5));
        assert_eq!(Lag(0).inverse(), Lag::ZERO);
    }

    #[test]
    fn test_shift_map() {
        let shifts = ShiftMap::new().with("CPI", 2).with("PPI", -1);
        assert_eq!(shifts.get("CPI"), Some(Lag(2)));
        assert_eq!(shifts.get("PPI"), Some(Lag(-1)));
        assert_eq!(shifts.get("M2"), None);
        assert_eq!(shifts.names(), vec!["CPI", "PPI"]);

        let collected: ShiftMap = vec![("CPI", 2), ("PPI", -1)].into_iter().collect();
        assert_eq!(collected, shifts);
    }

    #[test]
    fn test_shift_map_deserializes_from_plain_mapping() {
        let shifts: ShiftMap = serde_json::from_str(r#"{"CPI": 3, "M2": 0}"#).unwrap();
        assert_eq!(shifts.get("CPI"), Some(Lag(3)));
        assert_eq!(shifts.get("M2"), Some(Lag::ZERO));
    }
}
