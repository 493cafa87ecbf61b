//! Shift alignment of two series on a shared positional index

use super::Lag;

/// Two equal-length sequences restricted to the index positions where both
/// shifted series are defined
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedPair {
    y: Vec<f64>,
    x: Vec<f64>,
    positions: Vec<usize>,
}

impl AlignedPair {
    fn with_capacity(capacity: usize) -> Self {
        AlignedPair {
            y: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, position: usize, y: f64, x: f64) {
        self.positions.push(position);
        self.y.push(y);
        self.x.push(x);
    }

    /// Values of the first (response) series
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Values of the second (predictor) series
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Positions in the shared index that survived alignment, ascending
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consume the pair, returning `(y, x)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.y, self.x)
    }
}

/// Shift a sequence of optional values by `lag` positions.
///
/// Position `i` of the output holds `values[i - lag]`; positions whose source
/// falls outside the input become `None`. The output has the input's length.
pub fn shift_by<T: Copy>(values: &[Option<T>], lag: Lag) -> Vec<Option<T>> {
    (0..values.len())
        .map(|pos| source_position(pos, lag, values.len()).and_then(|src| values[src]))
        .collect()
}

/// Shift both series independently and keep the positions where both hold a
/// value. `NaN` counts as missing.
///
/// The index spans the longer of the two slices; a slice has no value at
/// positions past its own end.
pub fn align(y: &[f64], y_lag: Lag, x: &[f64], x_lag: Lag) -> AlignedPair {
    let len = y.len().max(x.len());
    let mut pair = AlignedPair::with_capacity(len.min(y.len()).min(x.len()));

    for pos in 0..len {
        if let (Some(yv), Some(xv)) = (shifted_value(y, y_lag, pos), shifted_value(x, x_lag, pos))
        {
            pair.push(pos, yv, xv);
        }
    }

    pair
}

fn shifted_value(values: &[f64], lag: Lag, pos: usize) -> Option<f64> {
    source_position(pos, lag, values.len())
        .map(|src| values[src])
        .filter(|v| !v.is_nan())
}

fn source_position(pos: usize, lag: Lag, len: usize) -> Option<usize> {
    if pos >= len {
        return None;
    }
    // i128 keeps `pos - lag` exact for every i64 lag
    let src = pos as i128 - i128::from(lag.periods());
    if src < 0 || src >= len as i128 {
        None
    } else {
        Some(src as usize)
    }
}
