use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::temporal;

/// 時刻インデックス構造体
///
/// テーブル内の全系列が共有する、狭義単調増加の時刻列を表現する。
/// 時間の単位（月次・日次など）は仮定せず、シフトは位置に対して行われる。
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndex {
    /// インデックス値
    values: Vec<NaiveDateTime>,

    /// 値から位置へのマッピング
    map: HashMap<NaiveDateTime, usize>,
}

impl TimeIndex {
    /// 新しいインデックスを作成
    pub fn new(values: Vec<NaiveDateTime>) -> Result<Self> {
        let mut map = HashMap::with_capacity(values.len());

        // 単調性をチェックしながらマップ構築
        for (i, value) in values.iter().enumerate() {
            if i > 0 && values[i - 1] >= *value {
                return Err(Error::Index(format!(
                    "時刻インデックスが狭義単調増加ではありません: 位置 {} の '{}' は直前の '{}' 以前です",
                    i,
                    value,
                    values[i - 1]
                )));
            }
            map.insert(*value, i);
        }

        Ok(TimeIndex { values, map })
    }

    /// 月初日から始まる月次インデックスを作成
    pub fn monthly(start: NaiveDate, periods: usize) -> Result<Self> {
        TimeIndex::new(temporal::monthly_range(start, periods)?)
    }

    /// インデックス長を取得
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// インデックスが空かどうか
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 値から位置を取得
    pub fn get_loc(&self, key: &NaiveDateTime) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// 位置から値を取得
    pub fn get_value(&self, pos: usize) -> Option<&NaiveDateTime> {
        self.values.get(pos)
    }

    /// 全ての値を取得
    pub fn values(&self) -> &[NaiveDateTime] {
        &self.values
    }
}
