//! Key-Value Inference Module
//!
//! スプレッドシートの非空セルの配置から、「ラベル」と「値」の組を推定するモジュール。
//!
//! 処理は次の4段階で、いずれも純粋関数です。
//!
//! 1. セル値の正規化（空セルは除外）
//! 2. 見出しらしさの判定（末尾コロン・短文・同義語辞書）
//! 3. 見出しごとの値セル探索（右方向 → 下方向、行優先で先着順に値を確保）
//! 4. キーテキストごとの重複排除（信頼度が最大のものを残す）
//!
//! 入力が空や不正でもエラーにはならず、空のリストを返します。

mod dedup;
mod finder;
mod header;
mod synonyms;

use serde::{Deserialize, Serialize};

use crate::normalize::normalize_cell_text;
use crate::types::{Cell, KeyValuePair};

/// 探索距離の上限（XLSXの最大列数）
pub(crate) const MAX_SEARCH_DISTANCE: u32 = 16_384;

/// キー・バリュー推定の調整パラメータ
///
/// 既定値は経験的に決めた値で、理論的な根拠はありません。
/// JSONなどから部分的に上書きでき、指定のない項目は既定値になります。
///
/// ```rust
/// use sheetkv::PairingConfig;
///
/// let config: PairingConfig = serde_json::from_str(r#"{"max_right_distance": 3}"#).unwrap();
/// assert_eq!(config.max_right_distance, 3);
/// assert_eq!(config.max_down_distance, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairingConfig {
    /// 右方向に探索する最大列数
    pub max_right_distance: u32,

    /// 下方向に探索する最大行数
    pub max_down_distance: u32,

    /// コロンなしで見出しとみなす最大文字数
    pub max_short_header_chars: usize,

    /// コロン付きで見出しとみなす最大文字数（コロン除去後）
    pub max_colon_header_chars: usize,

    /// 末尾コロンの見出しの基本スコア
    pub colon_base_score: f64,

    /// 短文の見出しの基本スコア
    pub short_base_score: f64,

    /// 同義語と完全一致した場合の加点
    pub exact_synonym_bonus: f64,

    /// 同義語を部分文字列として含む場合の加点
    pub partial_synonym_bonus: f64,

    /// 部分一致の対象にする別名の最小文字数
    pub min_partial_alias_chars: usize,

    /// 距離1のときの距離減衰項
    pub decay_start: f64,

    /// 距離が1増えるごとに減る量
    pub decay_step: f64,

    /// 信頼度の上限（1.0未満）
    pub max_confidence: f64,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            max_right_distance: 6,
            max_down_distance: 4,
            max_short_header_chars: 20,
            max_colon_header_chars: 40,
            colon_base_score: 0.3,
            short_base_score: 0.15,
            exact_synonym_bonus: 0.25,
            partial_synonym_bonus: 0.1,
            min_partial_alias_chars: 2,
            decay_start: 0.4,
            decay_step: 0.06,
            max_confidence: 0.95,
        }
    }
}

impl PairingConfig {
    /// 設定値を検証する
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 有効な場合
    /// * `Err(String)` - 無効な項目の説明
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.max_right_distance == 0 && self.max_down_distance == 0 {
            return Err("At least one search distance must be greater than 0".to_string());
        }
        let distances = [
            ("max_right_distance", self.max_right_distance),
            ("max_down_distance", self.max_down_distance),
        ];
        for (name, value) in distances {
            if value > MAX_SEARCH_DISTANCE {
                return Err(format!(
                    "{} must be at most {}: {}",
                    name, MAX_SEARCH_DISTANCE, value
                ));
            }
        }
        if self.max_short_header_chars == 0 {
            return Err("max_short_header_chars must be greater than 0".to_string());
        }
        if !(self.max_confidence > 0.0 && self.max_confidence < 1.0) {
            return Err(format!(
                "max_confidence must be in (0, 1): {}",
                self.max_confidence
            ));
        }

        let scores = [
            ("colon_base_score", self.colon_base_score),
            ("short_base_score", self.short_base_score),
            ("exact_synonym_bonus", self.exact_synonym_bonus),
            ("partial_synonym_bonus", self.partial_synonym_bonus),
            ("decay_start", self.decay_start),
            ("decay_step", self.decay_step),
        ];
        for (name, value) in scores {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number: {}", name, value));
            }
        }

        Ok(())
    }
}

/// 既定のパラメータでキー・バリューのペアを推定する
///
/// ```rust
/// use sheetkv::{extract_pairs, Cell};
///
/// let cells = vec![Cell::new(1, 1, "氏名："), Cell::new(1, 2, "山田太郎")];
/// let pairs = extract_pairs(&cells);
///
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].key, "氏名");
/// assert_eq!(pairs[0].value, "山田太郎");
/// ```
pub fn extract_pairs(cells: &[Cell]) -> Vec<KeyValuePair> {
    extract_pairs_with(cells, &PairingConfig::default())
}

/// 指定したパラメータでキー・バリューのペアを推定する
///
/// セル値はここで正規化され、空になったセルは除外されます。
/// 見出しセルは行優先（行番号、列番号の昇順）で処理されます。
pub fn extract_pairs_with(cells: &[Cell], config: &PairingConfig) -> Vec<KeyValuePair> {
    let normalized: Vec<Cell> = cells
        .iter()
        .filter_map(|cell| {
            normalize_cell_text(Some(&cell.value)).map(|value| Cell {
                coord: cell.coord,
                value,
            })
        })
        .collect();

    let candidates = finder::find_pairs(&normalized, config);
    dedup::dedup_by_key(candidates)
}
