//! Header-Likeness Classifier
//!
//! セルのテキストが「ラベル（見出し）」らしいかを判定する。
//! 判定は経験則であり、誤判定は信頼度に反映されるだけでエラーにはならない。

use super::PairingConfig;

/// 見出しと判定されたセルの情報
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeaderMatch {
    /// キーのテキスト（末尾のコロンは除去済み）
    pub key: String,

    /// 見出しらしさの基本スコア
    pub base_score: f64,
}

/// 半角・全角コロン
const COLONS: [char; 2] = [':', '：'];

/// 正規化済みテキストが見出しらしいかを判定する
///
/// - 末尾がコロン（`:` / `：`）: コロンを除去したテキストをキーとし、高い基本スコアを与える。
///   ただし除去後の文字数が`max_colon_header_chars`を超える長文は見出しとしない
/// - 短いテキスト（`max_short_header_chars`以下）で英数字・文字を1つ以上含む: 低い基本スコア
/// - それ以外（長い自由記述など）: 見出しではない
pub(crate) fn classify_header(text: &str, config: &PairingConfig) -> Option<HeaderMatch> {
    let text = text.trim();

    if text.ends_with(COLONS) {
        let key = text.trim_end_matches(COLONS).trim_end();
        let len = key.chars().count();
        if len == 0 || len > config.max_colon_header_chars {
            return None;
        }
        return Some(HeaderMatch {
            key: key.to_string(),
            base_score: config.colon_base_score,
        });
    }

    let len = text.chars().count();
    if len == 0 || len > config.max_short_header_chars {
        return None;
    }
    if !text.chars().any(char::is_alphanumeric) {
        return None;
    }

    Some(HeaderMatch {
        key: text.to_string(),
        base_score: config.short_base_score,
    })
}
