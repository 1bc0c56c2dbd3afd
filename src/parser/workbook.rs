//! Workbook Parser
//!
//! calamineを使用したワークブックの読み込みと、シートからグリッドへの変換。

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::error::XlsxToTxtError;
use crate::types::{CellValue, Grid};

/// ワークブックパーサー
///
/// calamineのラッパーとして、シート一覧の取得、シート選択、グリッド抽出を提供します。
/// xlsx / xlsm / xlsb / xls / ods を扱えます。
pub(crate) struct WorkbookParser {
    workbook: Sheets<Cursor<Vec<u8>>>,
}

impl WorkbookParser {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - 読み込みに成功した場合
    /// * `Err(XlsxToTxtError::Parse)` - ワークブックとして解析できない場合
    pub fn open(data: Vec<u8>) -> Result<Self, XlsxToTxtError> {
        let workbook = open_workbook_auto_from_rs(Cursor::new(data))?;
        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシート名を決定
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(XlsxToTxtError::Config)` - シートが存在しない、またはインデックスが範囲外の場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, XlsxToTxtError> {
        let all_sheet_names = self.sheet_names();

        match selector {
            SheetSelector::First => all_sheet_names
                .into_iter()
                .next()
                .ok_or_else(|| XlsxToTxtError::Config("Workbook has no sheets".to_string())),

            SheetSelector::Index(index) => {
                let total = all_sheet_names.len();
                all_sheet_names.into_iter().nth(*index).ok_or_else(|| {
                    XlsxToTxtError::Config(format!(
                        "Sheet index {} is out of range (total: {})",
                        index, total
                    ))
                })
            }

            SheetSelector::Name(name) => {
                if !all_sheet_names.contains(name) {
                    return Err(XlsxToTxtError::Config(format!("Sheet '{}' not found", name)));
                }
                Ok(name.clone())
            }
        }
    }

    /// シートを読み込み、グリッドを構築
    ///
    /// 列位置が書式ルールを決めるため、列はA列を起点に揃えます
    /// （先頭の空列は空セルで補います）。行は最初の使用行から始まります。
    pub fn read_grid(&mut self, sheet_name: &str) -> Result<Grid, XlsxToTxtError> {
        let range = self.workbook.worksheet_range(sheet_name)?;

        let column_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        let grid: Grid = range
            .rows()
            .map(|row| {
                let mut cells = vec![CellValue::Empty; column_offset];
                cells.extend(row.iter().map(cell_value));
                cells
            })
            .collect();

        if grid.is_empty() {
            warn!(sheet = sheet_name, "sheet has no cells");
        }
        debug!(
            sheet = sheet_name,
            rows = grid.len(),
            column_offset,
            "read sheet"
        );

        Ok(grid)
    }
}

/// calamineのセルデータを`CellValue`に変換
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => {
            if dt.is_duration() {
                CellValue::Number(dt.as_f64())
            } else {
                dt.as_datetime()
                    .map(CellValue::Date)
                    .unwrap_or_else(|| CellValue::Number(dt.as_f64()))
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}


// シートの読み込みは実際のXLSXファイルが必要なため、統合テスト（tests/）で実装します。
