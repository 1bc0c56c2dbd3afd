//! Parser Module
//!
//! 入力バイト列（ワークブックまたはCSV）からグリッドを構築するモジュール。

pub(crate) mod delimited;
mod workbook;

pub(crate) use workbook::WorkbookParser;
