//! Formatter Module
//!
//! グリッドを固定形式のセミコロン区切りテキストに変換する行フォーマッター。
//!
//! 変換は純粋な同期処理で、エラーを返しません。
//! 解析できないセル値は、その値の素のテキスト表現にフォールバックします。

use tracing::{debug, trace};

use crate::format::{
    format_dmy, number_to_text, parse_date_text, parse_float_prefix, parse_int_prefix,
    serial_to_datetime, to_fixed,
};
use crate::types::{CellValue, Row};

/// セル区切り文字
pub const CELL_DELIMITER: &str = ";";

/// 列ごとの書式ルール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRule {
    /// 整数（四捨五入、小数部なし）
    Integer,

    /// 小数点以下 `digits` 桁の固定小数点
    Decimal {
        /// 小数点以下の桁数
        digits: usize,
    },

    /// `DD/MM/YYYY` 形式の日付
    Date,

    /// 0埋めの数値識別子（請求書番号など）
    PaddedId {
        /// 最小桁数
        width: usize,
    },

    /// そのまま文字列化
    PassThrough,
}

/// 固定の列ルール表（0始まりの列インデックス）
///
/// 表にない列はすべて `ColumnRule::PassThrough` です。
pub const COLUMN_RULES: &[(usize, ColumnRule)] = &[
    (0, ColumnRule::Integer),
    (1, ColumnRule::Decimal { digits: 2 }),
    (5, ColumnRule::Date),
    (6, ColumnRule::PaddedId { width: 13 }),
    (8, ColumnRule::Decimal { digits: 2 }),
    (9, ColumnRule::Date),
    (10, ColumnRule::PaddedId { width: 12 }),
];

impl ColumnRule {
    /// 列インデックスに対応するルールを取得
    pub fn for_column(column: usize) -> Self {
        lookup(COLUMN_RULES, column)
    }

    /// セル値にルールを適用する
    ///
    /// どのルールもエラーを返さず、解析できない値は素のテキストになります。
    pub fn apply(&self, value: &CellValue) -> String {
        match *self {
            ColumnRule::Integer => format_integer(value),
            ColumnRule::Decimal { digits } => format_decimal(value, digits),
            ColumnRule::Date => format_date(value),
            ColumnRule::PaddedId { width } => format_padded_id(value, width),
            ColumnRule::PassThrough => value.to_string(),
        }
    }
}

fn lookup(rules: &[(usize, ColumnRule)], column: usize) -> ColumnRule {
    rules
        .iter()
        .find(|(index, _)| *index == column)
        .map(|(_, rule)| *rule)
        .unwrap_or(ColumnRule::PassThrough)
}

/// 行フォーマッター
///
/// グリッド（先頭行はヘッダー）を受け取り、1データ行につき1行のテキストを生成します。
///
/// # 処理順序
///
/// 1. 先頭行（ヘッダー）を内容にかかわらず破棄
/// 2. すべてのセルが空（空セルまたは空文字列）の行を破棄
/// 3. 各セルを列位置のルールでフォーマット
/// 4. セルを `;` で連結
/// 5. 行を `\n` で連結し、末尾に `\n` を1つ付加
///
/// # 使用例
///
/// ```rust
/// use xlsxtxt::{CellValue, RowFormatter};
///
/// let grid = vec![
///     vec![CellValue::from("Nro"), CellValue::from("Importe")],
///     vec![CellValue::from("5"), CellValue::from("3,1")],
/// ];
/// assert_eq!(RowFormatter::new().convert(&grid), "5;3.10\n");
/// ```
#[derive(Debug, Clone)]
pub struct RowFormatter {
    rules: &'static [(usize, ColumnRule)],
}

impl RowFormatter {
    /// 固定の列ルール表を使うフォーマッターを生成
    pub fn new() -> Self {
        Self {
            rules: COLUMN_RULES,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_rules(rules: &'static [(usize, ColumnRule)]) -> Self {
        Self { rules }
    }

    /// グリッドをテキストに変換
    ///
    /// 残る行がない場合、出力は `"\n"` になります。
    pub fn convert(&self, grid: &[Row]) -> String {
        join_lines(&self.format_rows(grid))
    }

    /// ヘッダーと空行を除いた各データ行をフォーマット
    ///
    /// 戻り値の要素数が出力されるデータ行数です（セル内の改行は数えません）。
    pub fn format_rows(&self, grid: &[Row]) -> Vec<String> {
        let lines: Vec<String> = grid
            .iter()
            .skip(1)
            .filter(|row| !is_blank_row(row))
            .map(|row| self.format_row(row))
            .collect();

        debug!(
            total_rows = grid.len(),
            output_rows = lines.len(),
            "formatted grid"
        );

        lines
    }

    /// 1行をフォーマット（ヘッダー判定や空行判定は行わない）
    pub fn format_row(&self, row: &[CellValue]) -> String {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(column, value)| lookup(self.rules, column).apply(value))
            .collect();
        cells.join(CELL_DELIMITER)
    }
}

impl Default for RowFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// 固定の列ルール表でグリッドを変換する
///
/// `RowFormatter::new().convert(grid)` と同じです。
pub fn convert(grid: &[Row]) -> String {
    RowFormatter::new().convert(grid)
}

/// 行を `\n` で連結し、末尾に `\n` を1つ付加
pub(crate) fn join_lines(lines: &[String]) -> String {
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn is_blank_row(row: &[CellValue]) -> bool {
    row.iter().all(CellValue::is_blank)
}

/// 数値セルはそのまま、テキストセルは最初の `,` を `.` に置換して解析
fn parse_numeric(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if !n.is_nan() => Some(*n),
        CellValue::Number(_) => None,
        CellValue::Text(s) => parse_float_prefix(&s.replacen(',', ".", 1)),
        CellValue::Empty | CellValue::Bool(_) | CellValue::Date(_) => None,
    }
}

fn format_integer(value: &CellValue) -> String {
    if value.is_blank() {
        return String::new();
    }
    match parse_numeric(value) {
        Some(n) => number_to_text(n.round()),
        None => fallback("integer", value),
    }
}

fn format_decimal(value: &CellValue, digits: usize) -> String {
    if value.is_blank() {
        return String::new();
    }
    match parse_numeric(value) {
        Some(n) => to_fixed(n, digits),
        None => fallback("decimal", value),
    }
}

fn format_date(value: &CellValue) -> String {
    if value.is_falsy() {
        return String::new();
    }
    let datetime = match value {
        CellValue::Date(dt) => Some(*dt),
        CellValue::Number(serial) => serial_to_datetime(*serial),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Bool(b) => parse_date_text(&b.to_string()),
        CellValue::Empty => None,
    };
    match datetime {
        Some(dt) => format_dmy(&dt),
        None => fallback("date", value),
    }
}

fn format_padded_id(value: &CellValue, width: usize) -> String {
    if value.is_falsy() {
        return String::new();
    }
    let digits = match value {
        CellValue::Number(n) => Some(number_to_text(*n)),
        CellValue::Text(s) => parse_int_prefix(s),
        CellValue::Bool(_) | CellValue::Date(_) | CellValue::Empty => None,
    };
    match digits {
        Some(digits) => format!("{:0>width$}", digits, width = width),
        None => fallback("padded id", value),
    }
}

fn fallback(rule: &str, value: &CellValue) -> String {
    trace!(rule, ?value, "unparseable cell, using raw text");
    value.to_string()
}
