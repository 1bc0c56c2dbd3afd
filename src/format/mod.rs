//! Format Module
//!
//! セル値の数値・日付テキストの解析と描画を行う補助モジュール。
//! 行フォーマッター（`crate::formatter`）の各列ルールから使用されます。

mod date;
mod number;

pub(crate) use date::{format_dmy, parse_date_text, serial_to_datetime};
pub(crate) use number::{number_to_text, parse_float_prefix, parse_int_prefix, to_fixed};
