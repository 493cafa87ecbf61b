use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::lag::{Lag, ShiftMap};
use crate::pairwise::PairwiseRegressionResult;

/// JSONファイルからシフト設定を読み込む
///
/// `{"系列名": シフト値, ...}` 形式のオブジェクトを受け付ける。
pub fn read_shift_map<P: AsRef<Path>>(path: P) -> Result<ShiftMap> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    // JSONを解析
    let json_value: Value = serde_json::from_reader(reader)?;
    shift_map_from_value(json_value)
}

/// JSON値からシフト設定を作成
pub fn shift_map_from_value(value: Value) -> Result<ShiftMap> {
    let map = match value {
        Value::Object(map) => map,
        _ => {
            return Err(Error::Format(
                "シフト設定はオブジェクトである必要があります".to_string(),
            ))
        }
    };

    let mut shifts = ShiftMap::new();
    for (name, value) in map {
        let periods = value.as_i64().ok_or_else(|| {
            Error::Cast(format!(
                "系列 '{}' のシフト値 {} は整数ではありません",
                name, value
            ))
        })?;
        shifts.insert(name, Lag(periods));
    }

    Ok(shifts)
}

/// 回帰結果をJSON文字列に変換
pub fn results_to_json(results: &[PairwiseRegressionResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// 回帰結果をJSONファイルに書き込む
pub fn write_results_json<P: AsRef<Path>>(
    results: &[PairwiseRegressionResult],
    path: P,
) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)?;
    writer.flush()?;
    Ok(())
}
