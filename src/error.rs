//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! 行フォーマッター（`RowFormatter`）自体はエラーを返しません。
//! ここで定義するエラーは、入力の取得（ファイル読み込み、ワークブック解析、
//! シート選択）と出力の書き込みでのみ発生します。

use thiserror::Error;

/// xlsxtxtクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（ファイル読み込み失敗など）
/// - `Parse`: ワークブックの解析中に発生したエラー（calamine由来）
/// - `Csv`: CSV入力の解析中に発生したエラー（csv由来）
/// - `Config`: 設定の検証やシート選択に失敗したエラー
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtxt::XlsxToTxtError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<File, XlsxToTxtError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxToTxtError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ワークブックの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// CSV入力の解析中に発生したエラー
    #[error("Failed to parse CSV input: {0}")]
    Csv(#[from] csv::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ConverterBuilder::build()`時の検証失敗や、存在しないシートを
    /// 指定した場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxtxt::{ConverterBuilder, XlsxToTxtError};
    ///
    /// let result = ConverterBuilder::new()
    ///     .with_csv_delimiter(b'\n')  // 無効な区切り文字
    ///     .build();
    ///
    /// match result {
    ///     Err(XlsxToTxtError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力ファイルが設定された最大サイズを超えた場合に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
