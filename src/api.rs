//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

/// シート選択方式
///
/// 変換対象のシートを1つ選択します。CSV入力は常に1シート（`Sheet1`）として扱われます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum SheetSelector {
    /// 最初のシート（デフォルト）
    #[default]
    First,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(1)` は2番目のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Ventas".to_string())`
    Name(String),
}

/// 入力フォーマット
///
/// 入力バイト列の解釈方法を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum InputFormat {
    /// 先頭バイトから自動判定（デフォルト）
    ///
    /// ZIPシグネチャ（`PK\x03\x04`、xlsx/xlsm/xlsb/ods）または
    /// CFBシグネチャ（`D0 CF 11 E0`、xls）で始まる場合はワークブック、
    /// それ以外はCSVとして扱います。
    #[default]
    Auto,

    /// ワークブック（calamineが扱える形式）
    Workbook,

    /// 区切り文字形式のテキスト
    Csv,
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

impl InputFormat {
    /// `Auto`を具体的な形式に解決する
    pub(crate) fn resolve(self, data: &[u8]) -> InputFormat {
        match self {
            InputFormat::Auto => {
                if data.starts_with(ZIP_MAGIC) || data.starts_with(CFB_MAGIC) {
                    InputFormat::Workbook
                } else {
                    InputFormat::Csv
                }
            }
            other => other,
        }
    }
}
