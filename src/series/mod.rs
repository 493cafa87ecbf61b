use crate::error::{Error, Result};
use crate::lag::{shift_by, Lag};

/// Series構造体: 時刻インデックスに沿った名前付きの数値列
///
/// 欠損値は `NaN` で表現する。
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// 系列名
    name: String,

    /// 観測値
    values: Vec<f64>,
}

impl Series {
    /// 新しいSeriesをベクトルから作成
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::Format("系列名が空です".to_string()));
        }

        Ok(Series { name, values })
    }

    /// Seriesの長さを取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Seriesが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 位置から値を取得（欠損値の場合はNone）
    pub fn get(&self, pos: usize) -> Option<f64> {
        self.values.get(pos).copied().filter(|v| !v.is_nan())
    }

    /// 値の配列を取得
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 名前を取得
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 欠損していない値の数
    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }

    /// 位置をずらした値の列を取得
    ///
    /// 正のシフトは過去の値を、負のシフトは未来の値を現在の位置に対応付ける。
    /// 範囲外から取得される位置と欠損値はNoneになる。
    pub fn shift(&self, lag: Lag) -> Vec<Option<f64>> {
        let values: Vec<Option<f64>> = (0..self.len()).map(|pos| self.get(pos)).collect();
        shift_by(&values, lag)
    }

    /// 平均を計算（欠損値を除く）
    pub fn mean(&self) -> Result<f64> {
        let count = self.valid_count();
        if count == 0 {
            return Err(Error::EmptyData(format!(
                "系列 '{}' に有効な値がないため平均を計算できません",
                self.name
            )));
        }

        let sum: f64 = self.values.iter().filter(|v| !v.is_nan()).sum();
        Ok(sum / count as f64)
    }
}
