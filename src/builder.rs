//! Builder Module
//!
//! Fluent Builder APIを提供し、`Converter`インスタンスを段階的に構築する。

use std::io::{BufWriter, Read, Write};

use tracing::{debug, info};

use crate::api::{InputFormat, SheetSelector};
use crate::error::XlsxToTxtError;
use crate::formatter::{join_lines, RowFormatter};
use crate::parser::{delimited, WorkbookParser};
use crate::security::SecurityConfig;
use crate::types::Grid;

/// 変換結果の推奨ファイル名
pub const DEFAULT_OUTPUT_FILE: &str = "salida.txt";

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ConversionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 入力フォーマット
    pub input_format: InputFormat,

    /// CSV入力の区切り文字
    pub csv_delimiter: u8,

    /// 入力サイズ制限
    pub security: SecurityConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            input_format: InputFormat::Auto,
            csv_delimiter: b',',
            security: SecurityConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtxt::{ConverterBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxtxt::XlsxToTxtError> {
/// let converter = ConverterBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Facturas".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConverterBuilder {
    /// 内部設定（構築中）
    config: ConversionConfig,
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 最初のシート
    /// - 入力フォーマット: 自動判定
    /// - CSV区切り文字: `,`
    /// - 最大入力サイズ: 2GB
    pub fn new() -> Self {
        Self {
            config: ConversionConfig::default(),
        }
    }

    /// 変換対象のシートを選択する
    ///
    /// ```rust,no_run
    /// use xlsxtxt::{ConverterBuilder, SheetSelector};
    ///
    /// let builder = ConverterBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Index(1));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 入力フォーマットを指定する（デフォルトは自動判定）
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.config.input_format = format;
        self
    }

    /// CSV入力の区切り文字を指定する
    ///
    /// ASCII文字で、`"`・`\r`・`\n` 以外である必要があります（`build()`時に検証）。
    pub fn with_csv_delimiter(mut self, delimiter: u8) -> Self {
        self.config.csv_delimiter = delimiter;
        self
    }

    /// 入力の最大サイズ（バイト）を指定する
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.config.security.max_input_file_size = bytes;
        self
    }

    /// 設定を検証し、`Converter`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxToTxtError::Config(String)`: 設定の検証に失敗した場合
    ///   * CSV区切り文字が非ASCII、または `"`・`\r`・`\n`
    ///   * 最大入力サイズが0
    pub fn build(self) -> Result<Converter, XlsxToTxtError> {
        let delimiter = self.config.csv_delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, b'"' | b'\r' | b'\n') {
            return Err(XlsxToTxtError::Config(format!(
                "Invalid CSV delimiter: {:?}",
                char::from(delimiter)
            )));
        }

        if self.config.security.max_input_file_size == 0 {
            return Err(XlsxToTxtError::Config(
                "Maximum input size must be greater than zero".to_string(),
            ));
        }

        Ok(Converter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシート（またはCSV）を読み込み、選択したシートを
/// セミコロン区切りの固定形式テキストに変換します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxtxt::{ConverterBuilder, DEFAULT_OUTPUT_FILE};
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxtxt::XlsxToTxtError> {
/// let converter = ConverterBuilder::new().build()?;
/// let input = File::open("facturas.xlsx")?;
/// let output = File::create(DEFAULT_OUTPUT_FILE)?;
/// converter.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Converter {
    /// 変換設定
    config: ConversionConfig,

    /// 行フォーマッター
    formatter: RowFormatter,
}

impl Converter {
    pub(crate) fn new(config: ConversionConfig) -> Self {
        Self {
            formatter: RowFormatter::new(),
            config,
        }
    }

    /// 入力を変換し、結果をライターに書き込む
    ///
    /// 書き込んだデータ行数を返します。セル内の改行は行数に含みません。
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込む（サイズ制限を適用）
    /// 2. 入力フォーマットを判定
    /// 3. シートを選択してグリッドを構築
    /// 4. 行フォーマッターでテキストに変換
    /// 5. 出力に書き込み、フラッシュ
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<usize, XlsxToTxtError> {
        let (text, rows) = self.render(input)?;

        let mut writer = BufWriter::new(output);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        Ok(rows)
    }

    /// 入力を変換し、結果を`String`として返す
    ///
    /// ```rust,no_run
    /// use xlsxtxt::ConverterBuilder;
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), xlsxtxt::XlsxToTxtError> {
    /// let converter = ConverterBuilder::new().build()?;
    /// let text = converter.convert_to_string(File::open("facturas.xlsx")?)?;
    /// print!("{}", text);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, XlsxToTxtError> {
        let (text, _) = self.render(input)?;
        Ok(text)
    }

    /// 入力に含まれるシート名の一覧を取得
    ///
    /// CSV入力の場合は `["Sheet1"]` を返します。
    pub fn sheet_names<R: Read>(&self, input: R) -> Result<Vec<String>, XlsxToTxtError> {
        let data = self.config.security.read_limited(input)?;
        match self.config.input_format.resolve(&data) {
            InputFormat::Csv => Ok(vec![delimited::CSV_SHEET_NAME.to_string()]),
            _ => Ok(WorkbookParser::open(data)?.sheet_names()),
        }
    }

    /// テキストとデータ行数を生成
    fn render<R: Read>(&self, input: R) -> Result<(String, usize), XlsxToTxtError> {
        let grid = self.read_grid(input)?;
        let lines = self.formatter.format_rows(&grid);
        let text = join_lines(&lines);
        info!(rows = lines.len(), bytes = text.len(), "conversion completed");
        Ok((text, lines.len()))
    }

    /// 入力を読み込み、選択されたシートのグリッドを構築
    fn read_grid<R: Read>(&self, input: R) -> Result<Grid, XlsxToTxtError> {
        let data = self.config.security.read_limited(input)?;
        let format = self.config.input_format.resolve(&data);
        debug!(bytes = data.len(), ?format, "read input");

        match format {
            InputFormat::Csv => {
                self.check_csv_selector()?;
                delimited::read_grid(&data, self.config.csv_delimiter)
            }
            _ => {
                let mut parser = WorkbookParser::open(data)?;
                let sheet_name = parser.select_sheet(&self.config.sheet_selector)?;
                info!(sheet = %sheet_name, "converting sheet");
                parser.read_grid(&sheet_name)
            }
        }
    }

    /// CSV入力は1シートのみのため、それ以外の選択はエラーにする
    fn check_csv_selector(&self) -> Result<(), XlsxToTxtError> {
        match &self.config.sheet_selector {
            SheetSelector::First | SheetSelector::Index(0) => Ok(()),
            SheetSelector::Name(name) if name == delimited::CSV_SHEET_NAME => Ok(()),
            SheetSelector::Index(index) => Err(XlsxToTxtError::Config(format!(
                "Sheet index {} is out of range (total: 1)",
                index
            ))),
            SheetSelector::Name(name) => {
                Err(XlsxToTxtError::Config(format!("Sheet '{}' not found", name)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_converter_builder_new() {
        let builder = ConverterBuilder::new();
        assert_eq!(builder.config.sheet_selector, SheetSelector::First);
        assert_eq!(builder.config.input_format, InputFormat::Auto);
        assert_eq!(builder.config.csv_delimiter, b',');
        assert_eq!(
            builder.config.security.max_input_file_size,
            2_147_483_648
        );
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::Name("Ventas".to_string()))
            .with_input_format(InputFormat::Csv)
            .with_csv_delimiter(b';')
            .with_max_input_size(1024);

        assert!(matches!(
            builder.config.sheet_selector,
            SheetSelector::Name(ref name) if name == "Ventas"
        ));
        assert_eq!(builder.config.input_format, InputFormat::Csv);
        assert_eq!(builder.config.csv_delimiter, b';');
        assert_eq!(builder.config.security.max_input_file_size, 1024);
    }

    #[test]
    fn test_build_success() {
        assert!(ConverterBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_invalid_delimiter() {
        for delimiter in [b'"', b'\n', b'\r', 0xE9] {
            let result = ConverterBuilder::new().with_csv_delimiter(delimiter).build();
            match result {
                Err(XlsxToTxtError::Config(msg)) => assert!(msg.contains("delimiter")),
                _ => panic!("Expected Config error for {:?}", delimiter),
            }
        }
    }

    #[test]
    fn test_build_with_zero_max_size() {
        let result = ConverterBuilder::new().with_max_input_size(0).build();
        assert!(matches!(result, Err(XlsxToTxtError::Config(_))));
    }

    #[test]
    fn test_convert_csv_to_string() {
        let converter = ConverterBuilder::new().build().unwrap();
        let input = "Nro,Importe\n12.6,\"1234,5\"\n,\n";
        let text = converter.convert_to_string(Cursor::new(input)).unwrap();
        assert_eq!(text, "13;1234.50\n");
    }

    #[test]
    fn test_convert_writes_output() {
        let converter = ConverterBuilder::new()
            .with_csv_delimiter(b';')
            .build()
            .unwrap();
        let mut output = Vec::new();
        let rows = converter
            .convert(Cursor::new("h\n1;2\n"), &mut output)
            .unwrap();
        assert_eq!(output, b"1;2.00\n");
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_convert_row_count_ignores_line_breaks_in_cells() {
        let converter = ConverterBuilder::new().build().unwrap();
        let mut output = Vec::new();
        let rows = converter
            .convert(Cursor::new("h1,h2,h3\n1,2,\"linea 1\nlinea 2\"\n,,\n3,4,x\n"), &mut output)
            .unwrap();
        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "1;2.00;linea 1\nlinea 2\n3;4.00;x\n"
        );
    }

    #[test]
    fn test_csv_sheet_names() {
        let converter = ConverterBuilder::new().build().unwrap();
        let names = converter.sheet_names(Cursor::new("a,b\n")).unwrap();
        assert_eq!(names, vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_csv_rejects_other_sheets() {
        let converter = ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::Index(1))
            .build()
            .unwrap();
        let result = converter.convert_to_string(Cursor::new("a\n1\n"));
        assert!(matches!(result, Err(XlsxToTxtError::Config(_))));

        let converter = ConverterBuilder::new()
            .with_sheet_selector(SheetSelector::Name("Sheet1".to_string()))
            .build()
            .unwrap();
        assert_eq!(
            converter.convert_to_string(Cursor::new("a\n1\n")).unwrap(),
            "1\n"
        );
    }

    #[test]
    fn test_converter_rejects_oversized_input() {
        let converter = ConverterBuilder::new()
            .with_max_input_size(8)
            .build()
            .unwrap();
        let result = converter.convert_to_string(Cursor::new("0123456789"));
        assert!(matches!(result, Err(XlsxToTxtError::SecurityViolation(_))));
    }

    #[test]
    fn test_converter_convert_to_string_with_invalid_workbook() {
        let converter = ConverterBuilder::new().build().unwrap();
        let result = converter.convert_to_string(Cursor::new(b"PK\x03\x04broken".to_vec()));
        assert!(matches!(result, Err(XlsxToTxtError::Parse(_))));
    }
}
