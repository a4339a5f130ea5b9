//! Synonym Scorer
//!
//! 見出しテキストを静的な同義語辞書と照合し、加点を計算する。
//! 辞書はプロセス全体で共有される読み取り専用の定数で、実行時に変更されない。

use super::PairingConfig;

/// 同義語辞書の1エントリ（正規名 → 別名の集合）
#[derive(Debug)]
pub(crate) struct SynonymEntry {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// 帳票・スキルシートでよく使われるラベルの同義語辞書
pub(crate) static SYNONYMS: &[SynonymEntry] = &[
    SynonymEntry {
        canonical: "name",
        aliases: &["氏名", "名前", "お名前", "name", "full name"],
    },
    SynonymEntry {
        canonical: "furigana",
        aliases: &["フリガナ", "ふりがな", "氏名カナ", "カナ", "furigana"],
    },
    SynonymEntry {
        canonical: "gender",
        aliases: &["性別", "性", "gender", "sex"],
    },
    SynonymEntry {
        canonical: "age",
        aliases: &["年齢", "年令", "歳", "age"],
    },
    SynonymEntry {
        canonical: "birth_date",
        aliases: &["生年月日", "誕生日", "生年", "date of birth", "birthday"],
    },
    SynonymEntry {
        canonical: "address",
        aliases: &["住所", "現住所", "所在地", "address"],
    },
    SynonymEntry {
        canonical: "phone",
        aliases: &["電話番号", "電話", "携帯番号", "携帯", "tel", "phone"],
    },
    SynonymEntry {
        canonical: "email",
        aliases: &["メールアドレス", "メール", "e-mail", "email"],
    },
    SynonymEntry {
        canonical: "qualifications",
        aliases: &["資格", "保有資格", "免許", "免許・資格", "qualifications", "license"],
    },
    SynonymEntry {
        canonical: "education",
        aliases: &["学歴", "最終学歴", "学校名", "education"],
    },
    SynonymEntry {
        canonical: "experience",
        aliases: &["職歴", "経歴", "経験年数", "実務経験", "experience"],
    },
    SynonymEntry {
        canonical: "skills",
        aliases: &["スキル", "得意分野", "得意技術", "skill", "skills"],
    },
    SynonymEntry {
        canonical: "nearest_station",
        aliases: &["最寄駅", "最寄り駅", "最寄", "station"],
    },
    SynonymEntry {
        canonical: "affiliation",
        aliases: &["所属", "所属会社", "会社名", "company"],
    },
    SynonymEntry {
        canonical: "period",
        aliases: &["期間", "稼働開始", "開始日", "稼働可能日", "period"],
    },
    SynonymEntry {
        canonical: "remarks",
        aliases: &["備考", "特記事項", "コメント", "remarks", "notes"],
    },
];

/// 同義語照合の結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SynonymMatch {
    /// 一致したエントリの正規名
    pub canonical: &'static str,

    /// 加点
    pub bonus: f64,
}

/// 照合用に折りたたむ（ASCIIは小文字化、空白は除去）
fn fold(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 見出しテキストの同義語加点を計算する
///
/// 別名と完全一致すれば`exact_synonym_bonus`、別名（`min_partial_alias_chars`文字以上）を
/// 部分文字列として含めば`partial_synonym_bonus`。辞書全体での最大値を返し、
/// 同点の場合は辞書の先頭に近いエントリを優先する。一致しなければ`None`。
pub(crate) fn synonym_bonus(header: &str, config: &PairingConfig) -> Option<SynonymMatch> {
    let folded = fold(header);
    if folded.is_empty() {
        return None;
    }

    let mut best: Option<SynonymMatch> = None;
    for entry in SYNONYMS {
        for alias in entry.aliases {
            let alias = fold(alias);
            let bonus = if folded == alias {
                config.exact_synonym_bonus
            } else if alias.chars().count() >= config.min_partial_alias_chars
                && folded.contains(alias.as_str())
            {
                config.partial_synonym_bonus
            } else {
                continue;
            };

            if best.map_or(true, |b| bonus > b.bonus) {
                best = Some(SynonymMatch {
                    canonical: entry.canonical,
                    bonus,
                });
            }
        }
    }

    best
}
