//! HTML-to-Text Module
//!
//! HTML形式の本文（HTMLメール本文など）をプレーンテキストに変換する。
//! タグの解釈は最小限で、`<br>`と`</p>`を改行として扱い、それ以外のタグは除去する。
//! 文字参照はWHATWGの規則で展開し（`&amp`のようなセミコロンなしの旧形式も含む）、
//! 最後にセル値と同じ正規化を適用するため、改行はスペースになる。

use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::normalize_text;

/// `<script>`/`<style>`ブロック
fn script_style_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>")
            .expect("script/style pattern is valid")
    })
}

/// 改行として扱うタグ（`<br>`, `<br/>`, `</p>`）
fn line_break_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</p\s*>").expect("line break pattern is valid")
    })
}

/// 残りのすべてのタグ
fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"))
}

/// HTMLをプレーンテキストに変換する
///
/// ```rust
/// use sheetkv::html_to_text;
///
/// let html = "<html><style>p { color: red; }</style><p>お世話になります。</p><p>山田&amp;佐藤</p></html>";
/// assert_eq!(html_to_text(html), "お世話になります。 山田&佐藤");
/// ```
pub fn html_to_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let s = script_style_pattern().replace_all(html, "");
    let s = line_break_pattern().replace_all(&s, "\n");
    let s = tag_pattern().replace_all(&s, "");
    let s = htmlize::unescape(&*s);

    normalize_text(&s)
}
