//! 時刻列の解析のためのモジュール

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

/// 日時として解釈を試みる書式（先頭から順に試す）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// 日付として解釈を試みる書式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// 年月のみの書式（区切り文字と、月初日を補った後の書式）
const MONTH_FORMATS: &[(&str, &str)] = &[("-", "%Y-%m-%d"), ("/", "%Y/%m/%d")];

/// 文字列を時刻に変換
///
/// RFC 3339、日時、日付、年月の各書式を受け付けます。
/// タイムゾーン付きの値はUTCに変換してから返します。
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Format("時刻が空です".into()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    // 年月のみの場合は日を補って解析する
    for (sep, fmt) in MONTH_FORMATS {
        let with_day = format!("{}{}01", s, sep);
        if let Ok(date) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(Error::Format(format!("日時の解析エラー: '{}'", s)))
}

/// 月初日から始まる月次の時刻列を生成
pub fn monthly_range(start: NaiveDate, periods: usize) -> Result<Vec<NaiveDateTime>> {
    (0..periods)
        .map(|i| {
            let months = u32::try_from(i)
                .map_err(|_| Error::Index(format!("期間数が大きすぎます: {}", periods)))?;
            start
                .checked_add_months(Months::new(months))
                .map(|d| d.and_time(NaiveTime::MIN))
                .ok_or_else(|| Error::Index(format!("日付が範囲外です: {} + {}ヶ月", start, i)))
        })
        .collect()
}
