use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::index::TimeIndex;
use crate::table::TimeSeriesTable;
use crate::temporal;

/// 欠損値として扱うセルの値
const NA_VALUES: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "#N/A"];

/// CSVファイルから時系列テーブルを読み込む
///
/// 1列目を時刻列、2列目以降を数値系列として扱う。ヘッダー行は必須。
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeriesTable> {
    let file = File::open(path.as_ref())?;
    let table = read_csv_from_reader(file)?;
    log::info!(
        "Loaded {} series x {} rows from {}",
        table.series_count(),
        table.row_count(),
        path.as_ref().display()
    );
    Ok(table)
}

/// 任意のリーダーから時系列テーブルを読み込む
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<TimeSeriesTable> {
    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // ヘッダー行を取得
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.len() < 2 {
        return Err(Error::Format(
            "CSVには時刻列と少なくとも1つの数値列が必要です".to_string(),
        ));
    }

    // 各行を処理（行番号はヘッダーを1行目として数える）
    let mut rows: Vec<(NaiveDateTime, Vec<f64>)> = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let time = temporal::parse_timestamp(record.get(0).unwrap_or(""))
            .map_err(|e| Error::Format(format!("{}行目: {}", line, e)))?;

        // 行の長さが足りない場合は欠損値として扱う
        let values = headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, name)| parse_value(record.get(col).unwrap_or(""), name, line))
            .collect::<Result<Vec<f64>>>()?;

        rows.push((time, values));
    }

    if rows.is_empty() {
        return Err(Error::EmptyData("CSVにデータ行がありません".to_string()));
    }

    // 時刻順に並べ替え（重複はインデックス作成時にエラーになる）
    rows.sort_by(|a, b| a.0.cmp(&b.0));

    let index = TimeIndex::new(rows.iter().map(|(time, _)| *time).collect())?;
    let mut table = TimeSeriesTable::new(index);

    for (col, name) in headers.iter().enumerate().skip(1) {
        let values: Vec<f64> = rows.iter().map(|(_, values)| values[col - 1]).collect();
        table.add_column(name.clone(), values)?;
    }

    Ok(table)
}

fn parse_value(field: &str, column: &str, line: usize) -> Result<f64> {
    if NA_VALUES.contains(&field) {
        return Ok(f64::NAN);
    }

    field.parse::<f64>().map_err(|_| {
        Error::Cast(format!(
            "列 '{}' の{}行目の値 '{}' を数値に変換できません",
            column, line, field
        ))
    })
}
