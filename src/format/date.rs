//! 日付の解析と描画
//!
//! Excelの1900年システムのシリアル値と、テキスト日付の解析を扱います。

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};

/// 1899-12-30 00:00:00 のUnixエポックからのミリ秒
///
/// シリアル値0がこの日時になります。1900年のうるう年バグ（存在しない1900-02-29）
/// との互換のため、1899-12-31 ではなく 1899-12-30 を起点にしています。
const SERIAL_EPOCH_MILLIS: f64 = -2_209_161_600_000.0;

/// 1日のミリ秒数
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// 表現可能な日時の上限（±1億日、ミリ秒）
const MAX_TIME_MILLIS: f64 = 8.64e15;

/// 日時（年月日＋時刻）として試す書式
const DATETIME_FORMATS: &[&str] = &[
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %I:%M %p",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%dT%H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// 日付のみとして試す書式（先に一致したものを採用）
const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// 2桁年（`M/D/YY`）の日時書式
const SHORT_YEAR_DATETIME_FORMATS: &[&str] = &[
    "%m/%d/%y %H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%y %I:%M %p",
];

/// 2桁年（`M/D/YY`）の日付書式
const SHORT_YEAR_DATE_FORMATS: &[&str] = &["%m/%d/%y"];

/// 2桁年の境界: 00〜49は2000年代、50〜99は1900年代
const SHORT_YEAR_PIVOT: i32 = 50;

/// 4桁年の書式で受け付ける最小の年（これ未満は2桁年の誤読とみなす）
const MIN_FULL_YEAR: i32 = 100;

/// Excelのシリアル値（1900年システム）を日時に変換
///
/// 起点の日時にシリアル値×86,400,000ミリ秒を加算し、ミリ秒未満は0方向へ切り捨てます。
///
/// - シリアル値1 = 1899-12-31
/// - シリアル値2 = 1900-01-01
/// - シリアル値45306.5 = 2024-01-15 12:00:00
///
/// 非有限値や表現可能範囲外の場合は`None`を返します。
pub(crate) fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let millis = (SERIAL_EPOCH_MILLIS + serial * MILLIS_PER_DAY).trunc();
    if !millis.is_finite() || millis.abs() > MAX_TIME_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}

/// テキストを日付として解析する
///
/// ハイフンをスラッシュに置換した後、`M/D/YY`、`Y/M/D`、`M/D/Y`（24時間制・AM/PMの
/// 時刻付きも可）、および英語の月名を含む形式を順に試します。
///
/// 2桁年は00〜49を2000年代、50〜99を1900年代として扱います。
/// 4桁年の書式で3桁以下の年が読めた場合は解析失敗とします。
pub(crate) fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let normalized = text.replace('-', "/");
    let candidate = normalized.trim();
    if candidate.is_empty() {
        return None;
    }

    parse_with(candidate, SHORT_YEAR_DATETIME_FORMATS, SHORT_YEAR_DATE_FORMATS)
        .and_then(pivot_short_year)
        .or_else(|| {
            parse_with(candidate, DATETIME_FORMATS, DATE_FORMATS)
                .filter(|dt| dt.year() >= MIN_FULL_YEAR)
        })
}

fn parse_with(
    candidate: &str,
    datetime_formats: &[&str],
    date_formats: &[&str],
) -> Option<NaiveDateTime> {
    datetime_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(candidate, fmt).ok())
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

/// chronoの`%y`は00〜69を2000年代に割り当てるため、50〜69を1900年代へ戻す
fn pivot_short_year(datetime: NaiveDateTime) -> Option<NaiveDateTime> {
    let year = datetime.year();
    if (2000 + SHORT_YEAR_PIVOT..2100).contains(&year) {
        datetime.with_year(year - 100)
    } else {
        Some(datetime)
    }
}

/// 日時を `DD/MM/YYYY` 形式で描画
pub(crate) fn format_dmy(datetime: &NaiveDateTime) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        datetime.day(),
        datetime.month(),
        datetime.year()
    )
}
