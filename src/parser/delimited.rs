//! CSV Reader
//!
//! 区切り文字形式のテキストをグリッドとして読み込みます。
//! 各フィールドはテキストセル（空フィールドは空セル）になります。

use tracing::debug;

use crate::error::XlsxToTxtError;
use crate::types::{CellValue, Grid};

/// CSV入力のシート名
pub(crate) const CSV_SHEET_NAME: &str = "Sheet1";

/// CSVのバイト列からグリッドを構築
///
/// ヘッダー行の扱いは行フォーマッターに任せるため、ここでは全行を返します。
/// 行ごとにフィールド数が異なっていても受け付けます。
pub(crate) fn read_grid(data: &[u8], delimiter: u8) -> Result<Grid, XlsxToTxtError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let mut grid = Grid::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(field_value).collect());
    }

    debug!(rows = grid.len(), delimiter = %char::from(delimiter), "read CSV input");
    Ok(grid)
}

fn field_value(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
