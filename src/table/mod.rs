use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::index::TimeIndex;
use crate::series::Series;

/// 時系列テーブル: 共通の時刻インデックスを持つ名前付き系列の集合
///
/// 読み込み後は変更せず、参照として回帰エンジンに渡す。
#[derive(Debug, Clone)]
pub struct TimeSeriesTable {
    /// 共有の時刻インデックス
    index: TimeIndex,

    /// 系列名の順序を保持
    columns: Vec<String>,

    /// 系列名から系列へのマッピング
    data: HashMap<String, Series>,
}

impl TimeSeriesTable {
    /// 空のテーブルを作成
    pub fn new(index: TimeIndex) -> Self {
        TimeSeriesTable {
            index,
            columns: Vec::new(),
            data: HashMap::new(),
        }
    }

    /// 系列を追加
    pub fn add_series(&mut self, series: Series) -> Result<()> {
        if self.data.contains_key(series.name()) {
            return Err(Error::DuplicateColumnName(series.name().to_string()));
        }

        if series.len() != self.index.len() {
            return Err(Error::InconsistentRowCount {
                expected: self.index.len(),
                found: series.len(),
            });
        }

        self.columns.push(series.name().to_string());
        self.data.insert(series.name().to_string(), series);
        Ok(())
    }

    /// 名前と値から系列を作成して追加
    pub fn add_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        self.add_series(Series::new(name, values)?)
    }

    /// 系列のベクトルからテーブルを作成
    pub fn from_series(index: TimeIndex, series: Vec<Series>) -> Result<Self> {
        let mut table = TimeSeriesTable::new(index);
        for s in series {
            table.add_series(s)?;
        }
        Ok(table)
    }

    /// 系列を取得
    pub fn series(&self, name: &str) -> Result<&Series> {
        self.data
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// 系列を取得（存在しない場合はNone）
    pub fn get_series(&self, name: &str) -> Option<&Series> {
        self.data.get(name)
    }

    /// 系列が存在するか確認する
    pub fn has_series(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// 系列名を追加順で返す
    pub fn series_names(&self) -> &[String] {
        &self.columns
    }

    /// 系列数
    pub fn series_count(&self) -> usize {
        self.columns.len()
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// 時刻インデックス
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }
}
