//! Security Module
//!
//! 入力の読み込み時に適用するサイズ制限を提供するモジュール。
//! 入力全体をメモリに読み込むため、上限を超える入力は解析前に拒否します。

use std::io::Read;

use crate::error::XlsxToTxtError;

/// 入力ファイルの最大サイズのデフォルト値（2GB）
pub(crate) const DEFAULT_MAX_INPUT_SIZE: u64 = 2_147_483_648;

/// セキュリティ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_file_size: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_file_size: DEFAULT_MAX_INPUT_SIZE,
        }
    }
}

impl SecurityConfig {
    /// 入力全体を読み込み、サイズ制限を検証する
    ///
    /// 上限+1バイトまでしか読み込まないため、巨大な入力でもメモリを使い切りません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<u8>)` - 読み込んだバイト列
    /// * `Err(XlsxToTxtError::SecurityViolation)` - 上限を超えた場合
    pub fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, XlsxToTxtError> {
        let mut buffer = Vec::new();
        let bytes_read = reader
            .take(self.max_input_file_size.saturating_add(1))
            .read_to_end(&mut buffer)?;

        if bytes_read as u64 > self.max_input_file_size {
            return Err(XlsxToTxtError::SecurityViolation(format!(
                "Input file size exceeds maximum: more than {} bytes",
                self.max_input_file_size
            )));
        }

        Ok(buffer)
    }
}
