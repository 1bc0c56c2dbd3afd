//! xlsxtxt - Excel/CSV to fixed-format delimited text converter
//!
//! This crate converts one sheet of a spreadsheet into a semicolon-delimited text
//! file with one line per data row. Each column is formatted by its position:
//!
//! | Column | Rule |
//! |---|---|
//! | 0 | integer (rounded, no fraction) |
//! | 1, 8 | decimal with 2 fractional digits |
//! | 5, 9 | date as `DD/MM/YYYY` |
//! | 6 | zero-padded identifier, width 13 |
//! | 10 | zero-padded identifier, width 12 |
//! | others | value as-is |
//!
//! The first row is treated as a header and dropped, and rows whose cells are all
//! empty are skipped. Cells that cannot be parsed fall back to their plain text;
//! the formatting step never fails.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxtxt::{ConverterBuilder, DEFAULT_OUTPUT_FILE};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = File::open("facturas.xlsx")?;
//!     let output = File::create(DEFAULT_OUTPUT_FILE)?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Selecting a Sheet
//!
//! ```rust,no_run
//! use std::fs::File;
//! use xlsxtxt::{ConverterBuilder, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new().build()?;
//!     for name in converter.sheet_names(File::open("facturas.xlsx")?)? {
//!         println!("{}", name);
//!     }
//!
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("Marzo".to_string()))
//!         .build()?;
//!     let text = converter.convert_to_string(File::open("facturas.xlsx")?)?;
//!     print!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Formatting an In-Memory Grid
//!
//! ```rust
//! use xlsxtxt::CellValue;
//!
//! let grid = vec![
//!     vec![CellValue::from("Nro"), CellValue::from("Importe")],
//!     vec![CellValue::from(15.0), CellValue::from("7")],
//!     vec![CellValue::Empty, CellValue::from("")],
//! ];
//! assert_eq!(xlsxtxt::convert(&grid), "15;7.00\n");
//! ```

mod api;
mod builder;
mod error;
mod format;
mod formatter;
mod parser;
mod security;
mod types;

// 公開API
pub use api::{InputFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder, DEFAULT_OUTPUT_FILE};
pub use error::XlsxToTxtError;
pub use formatter::{convert, ColumnRule, RowFormatter, CELL_DELIMITER, COLUMN_RULES};
pub use types::{CellValue, Grid, Row};
