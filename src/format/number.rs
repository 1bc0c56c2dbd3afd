//! 数値テキストの解析と描画
//!
//! 先頭からの数値プレフィックス解析（末尾のゴミは無視）と、
//! 固定小数点描画（丸めは「0から遠い方へ」）を提供します。

/// 先頭の浮動小数点数プレフィックスを解析する
///
/// 先頭の空白を読み飛ばし、符号、`Infinity`、または
/// 「整数部・小数部・指数部」からなる最長のプレフィックスを数値として解釈します。
/// 数字が1つもない場合は`None`を返します。
///
/// # 例
///
/// - `"3.1"` → `Some(3.1)`
/// - `"  12.5kg"` → `Some(12.5)`
/// - `".5"` → `Some(0.5)`
/// - `"abc"` → `None`
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    if t[i..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = i;
    i = scan_digits(bytes, i);
    let mut digit_count = i - int_start;

    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let frac_end = scan_digits(bytes, frac_start);
        digit_count += frac_end - frac_start;
        i = frac_end;
    }

    if digit_count == 0 {
        return None;
    }

    // 指数部は数字が続く場合のみ採用する（"1e" は 1 として扱う）
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_end = scan_digits(bytes, j);
        if exp_end > j {
            i = exp_end;
        }
    }

    t[..i].parse::<f64>().ok()
}

/// 先頭の整数プレフィックスを解析し、10進表記の文字列として返す
///
/// 小数部や末尾の非数値文字は切り捨てられます（丸めは行いません）。
/// `0x` / `0X` で始まる場合は16進数として解釈します。
/// 先頭の0は除去され、`-0` は `0` になります。
///
/// # 例
///
/// - `"42.9"` → `Some("42")`
/// - `"007"` → `Some("7")`
/// - `"-15abc"` → `Some("-15")`
/// - `"0x1A"` → `Some("26")`
/// - `"x1"` → `None`
pub(crate) fn parse_int_prefix(s: &str) -> Option<String> {
    let t = s.trim_start();
    let (negative, rest) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };

    let magnitude = if let Some(hex) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        let end = hex
            .bytes()
            .position(|b| !b.is_ascii_hexdigit())
            .unwrap_or(hex.len());
        if end == 0 {
            return None;
        }
        u128::from_str_radix(&hex[..end], 16).ok()?.to_string()
    } else {
        let end = scan_digits(rest.as_bytes(), 0);
        if end == 0 {
            return None;
        }
        let trimmed = rest[..end].trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    };

    if negative && magnitude != "0" {
        Some(format!("-{}", magnitude))
    } else {
        Some(magnitude)
    }
}

/// 数値を自然な10進表記に変換する
///
/// 整数値は小数部なし（`7`）、それ以外は最短の往復可能表記（`10.5`）になります。
/// 絶対値が `1e21` 以上または `1e-6` 未満の場合は指数表記（`1e+21`、`1.5e-7`）です。
/// `-0` は `0`、非有限値は `Infinity` / `-Infinity` / `NaN` になります。
pub(crate) fn number_to_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= EXPONENT_UPPER || value.abs() < EXPONENT_LOWER {
        exponent_text(value)
    } else {
        value.to_string()
    }
}

/// これ以上の絶対値は指数表記
const EXPONENT_UPPER: f64 = 1e21;

/// これ未満の絶対値は指数表記
const EXPONENT_LOWER: f64 = 1e-6;

/// 最短の仮数で指数表記し、非負の指数には `+` を付ける
fn exponent_text(value: f64) -> String {
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// 固定小数点表記（小数点以下 `digits` 桁）に変換する
///
/// 丸めは正確な2進値に対して行い、ちょうど中間の値は0から遠い方へ丸めます
/// （`0.125` → `0.13`）。絶対値が `1e21` 以上、または非有限値の場合は
/// `number_to_text` と同じ表記になります。
pub(crate) fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_UPPER {
        return number_to_text(value);
    }

    // -0 は符号なしで描画する
    let value = if value == 0.0 { 0.0 } else { value };

    let nudged = if is_exact_tie(value, digits) {
        // 絶対値方向の次の表現可能値にずらし、偶数丸めを回避する
        f64::from_bits(value.to_bits() + 1)
    } else {
        value
    };

    format!("{:.*}", digits, nudged)
}

/// `value` が小数点以下 `digits` 桁の丸めでちょうど中間にあるかどうか
///
/// 中間値は `odd / 2^(digits+1)` の形の2進数に限られるため、
/// 2のべき乗を掛けた結果（誤差なし）が奇数の整数かどうかで判定できます。
fn is_exact_tie(value: f64, digits: usize) -> bool {
    let exponent = match i32::try_from(digits) {
        Ok(d) if d < 1000 => d + 1,
        _ => return false,
    };
    let scaled = value * 2f64.powi(exponent);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 != 0.0
}

fn scan_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
