//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::format::number_to_text;

/// セルの値を表す列挙型
///
/// スプレッドシート読み込み時に一度だけ型が決定され、
/// 各フォーマット関数はこのタグに対して網羅的にマッチします。
///
/// 整数型からの変換は提供しません。2^53を超える値は`f64`で表せないため、
/// 呼び出し側で明示的に`f64`または桁を保つ`String`を選んでください。
///
/// ```compile_fail
/// let _ = xlsxtxt::CellValue::from(9_007_199_254_740_993i64);
/// ```
///
/// ```rust
/// use xlsxtxt::{CellValue, ColumnRule};
///
/// let id = CellValue::from("9007199254740993");
/// assert_eq!(ColumnRule::for_column(6).apply(&id), "9007199254740993");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// 空セル（キーが存在しない場合を含む）
    Empty,

    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 日付（タイムゾーンなしのカレンダー日時）
    Date(NaiveDateTime),
}

impl CellValue {
    /// 空セル、または空文字列かどうかを判定
    ///
    /// 行のフィルタリングと、すべての列ルールの空判定で使用します。
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) | CellValue::Date(_) => false,
        }
    }

    /// 「偽」として扱われる値かどうかを判定
    ///
    /// 日付列と識別子列では、空セルに加えて `0`、`NaN`、`false` も空として出力します。
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Number(n) => *n == 0.0 || n.is_nan(),
            CellValue::Bool(b) => !b,
            CellValue::Empty | CellValue::Text(_) | CellValue::Date(_) => self.is_blank(),
        }
    }
}

/// 書式適用前の素のテキスト表現
///
/// 数値は自然な10進表記、論理値は `true` / `false`、
/// 日付は `YYYY-MM-DD HH:MM:SS` 形式になります。
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => f.write_str(&number_to_text(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(dt) => write!(f, "{}", dt),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

/// 行（0始まりの列位置でアクセスするセル値の並び）
pub type Row = Vec<CellValue>;

/// グリッド（行の並び、先頭行はヘッダー）
pub type Grid = Vec<Row>;
