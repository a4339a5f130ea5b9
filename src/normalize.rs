//! Cell Normalizer Module
//!
//! セル値を正規化するモジュール。
//! Excel特有の改行トークン（`_x000D_`）、タブ、CR/LFはすべて半角スペース1つに置き換え、
//! 半角・全角スペースの連続を1つにまとめてから前後をトリムする。
//! 改行をスペースに統一するのは、TSVの1行1セル形式を壊さないため。

use calamine::Data;
use chrono::{Duration, NaiveDate};

/// Excelが改行を保存する際に埋め込むエスケープトークン
const EXCEL_CR_TOKEN: &str = "_x000D_";

/// 1900年システムで扱える最大のシリアル値（9999-12-31）
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// テキストを正規化する
///
/// 失敗することはなく、空白だけの入力は空文字列になる。
///
/// ```rust
/// use sheetkv::normalize_text;
///
/// assert_eq!(normalize_text("  氏名_x000D_\n（漢字）  "), "氏名 （漢字）");
/// assert_eq!(normalize_text("A\u{3000}\u{3000}B"), "A B");
/// ```
pub fn normalize_text(raw: &str) -> String {
    let replaced = raw
        .replace(EXCEL_CR_TOKEN, " ")
        .replace("\r\n", " ")
        .replace(['\r', '\n', '\t'], " ");

    let mut result = String::with_capacity(replaced.len());
    let mut in_space = false;
    for ch in replaced.chars() {
        if ch == ' ' || ch == '\u{3000}' {
            if !in_space {
                result.push(' ');
            }
            in_space = true;
        } else {
            result.push(ch);
            in_space = false;
        }
    }

    result.trim().to_string()
}

/// 値が存在しない、または正規化後に空になる場合は`None`を返す
pub fn normalize_cell_text(raw: Option<&str>) -> Option<String> {
    let text = normalize_text(raw?);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// calamineのセル値を正規化前の文字列に変換
///
/// - 整数値の浮動小数点は`.0`を付けない（`42.0` -> `"42"`）
/// - 論理値は`TRUE`/`FALSE`
/// - エラー値はExcelのエラーコード（`#DIV/0!`など）
/// - 日付書式のセルは時刻が0時でも`YYYY-MM-DD HH:MM:SS`（`2024-04-01 00:00:00`）
pub(crate) fn cell_text(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::Error(e) => Some(e.to_string()),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            Some(format_date_serial(serial).unwrap_or_else(|| format_number(serial)))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

/// 数値を文字列に変換
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Excelのシリアル日付値（1900年システム）を`YYYY-MM-DD HH:MM:SS`形式に変換
///
/// 1899-12-30起算。シリアル値60以前はExcelの1900年うるう年バグにより1日ずれるが、
/// 実務上の帳票では現れないため補正しない。範囲外の値は`None`。
fn format_date_serial(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.floor();
    let mut seconds = ((serial - days) * 86_400.0).round() as i64;
    let mut days = days as i64;
    if seconds >= 86_400 {
        days += 1;
        seconds -= 86_400;
    }

    let date = epoch.checked_add_signed(Duration::days(days))?;
    let datetime = date.and_hms_opt(0, 0, 0)? + Duration::seconds(seconds);
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
