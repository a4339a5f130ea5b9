//! Deduplicator
//!
//! 同じキーテキストを持つ候補のうち、信頼度が最も高いものだけを残す。

use std::collections::HashMap;

use crate::types::KeyValuePair;

/// キーテキストごとに最高信頼度のペアを残す
///
/// 同点の場合は先に現れたペアを残す。出力順は各キーが最初に現れた順。
pub(crate) fn dedup_by_key(pairs: Vec<KeyValuePair>) -> Vec<KeyValuePair> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut result: Vec<KeyValuePair> = Vec::with_capacity(pairs.len());

    for pair in pairs {
        match positions.get(&pair.key) {
            Some(&pos) => {
                if pair.confidence > result[pos].confidence {
                    result[pos] = pair;
                }
            }
            None => {
                positions.insert(pair.key.clone(), result.len());
                result.push(pair);
            }
        }
    }

    result
}
