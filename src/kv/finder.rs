//! Spatial Pair Finder
//!
//! 見出しセルごとに、同じ行の右方向 → 同じ列の下方向の順で最も近い値セルを探す。
//!
//! 見出しセルは行優先（行番号、列番号の昇順）で処理する。一度値として採用された
//! セルは以降の見出しからは使えないため、先に処理された見出しほど近くの値を優先的に
//! 取得する。処理順を変えると曖昧なレイアウトで結果が変わる。

use std::collections::{HashMap, HashSet};

use super::header::classify_header;
use super::synonyms::synonym_bonus;
use super::PairingConfig;
use crate::types::{Cell, CellCoord, Direction, KeyValuePair, SearchStrategy};

/// 距離減衰項: `max(0, decay_start - decay_step * (distance - 1))`
pub(crate) fn distance_decay(distance: u32, config: &PairingConfig) -> f64 {
    let steps = f64::from(distance.saturating_sub(1));
    (config.decay_start - config.decay_step * steps).max(0.0)
}

/// 信頼度を`[0, max_confidence]`に収める
fn clamp_confidence(raw: f64, config: &PairingConfig) -> f64 {
    raw.min(config.max_confidence).max(0.0)
}

/// 座標から非空セルを引くための索引
struct CellIndex<'a> {
    cells: &'a [Cell],
    by_coord: HashMap<CellCoord, usize>,
    /// 非空セルの最大行・最大列
    extent: CellCoord,
}

impl<'a> CellIndex<'a> {
    /// 同じ座標が複数ある場合は最初のセルを採用する
    fn build(cells: &'a [Cell]) -> Self {
        let mut by_coord = HashMap::with_capacity(cells.len());
        let mut extent = CellCoord::new(0, 0);
        for (idx, cell) in cells.iter().enumerate() {
            by_coord.entry(cell.coord).or_insert(idx);
            extent.row = extent.row.max(cell.coord.row);
            extent.col = extent.col.max(cell.coord.col);
        }
        Self {
            cells,
            by_coord,
            extent,
        }
    }

    fn get(&self, coord: CellCoord) -> Option<&'a Cell> {
        self.by_coord.get(&coord).map(|&idx| &self.cells[idx])
    }

    /// 行優先に並べたセル（重複座標は除く）
    fn row_major(&self) -> Vec<&'a Cell> {
        let mut ordered: Vec<&Cell> = self.by_coord.values().map(|&idx| &self.cells[idx]).collect();
        ordered.sort_by_key(|cell| cell.coord);
        ordered
    }
}

/// 指定方向に`max_distance`まで走査し、未使用の最初の非空セルを返す
///
/// 非空セルの最大行・最大列より先は走査しない。
fn scan<'a>(
    index: &CellIndex<'a>,
    claimed: &HashSet<CellCoord>,
    origin: CellCoord,
    direction: Direction,
    max_distance: u32,
) -> Option<(&'a Cell, u32)> {
    let reach = match direction {
        Direction::Right => index.extent.col.saturating_sub(origin.col),
        Direction::Down => index.extent.row.saturating_sub(origin.row),
    };
    (1..=max_distance.min(reach)).find_map(|distance| {
        let coord = match direction {
            Direction::Right => origin.right(distance)?,
            Direction::Down => origin.down(distance)?,
        };
        if claimed.contains(&coord) {
            return None;
        }
        index.get(coord).map(|cell| (cell, distance))
    })
}

/// 正規化済みの非空セルからキー・バリューの候補を列挙する（重複排除前）
///
/// 右方向・下方向のどちらにも値が見つからない見出しは何も生成しない。
pub(crate) fn find_pairs(cells: &[Cell], config: &PairingConfig) -> Vec<KeyValuePair> {
    let index = CellIndex::build(cells);
    let mut claimed: HashSet<CellCoord> = HashSet::new();
    let mut pairs = Vec::new();

    for key_cell in index.row_major() {
        if claimed.contains(&key_cell.coord) {
            continue;
        }
        let Some(header) = classify_header(&key_cell.value, config) else {
            continue;
        };

        let found = scan(
            &index,
            &claimed,
            key_cell.coord,
            Direction::Right,
            config.max_right_distance,
        )
        .map(|(cell, distance)| (cell, distance, Direction::Right))
        .or_else(|| {
            scan(
                &index,
                &claimed,
                key_cell.coord,
                Direction::Down,
                config.max_down_distance,
            )
            .map(|(cell, distance)| (cell, distance, Direction::Down))
        });

        let Some((value_cell, distance, direction)) = found else {
            continue;
        };
        claimed.insert(value_cell.coord);

        let synonym = synonym_bonus(&header.key, config);
        let raw = header.base_score
            + synonym.map_or(0.0, |s| s.bonus)
            + distance_decay(distance, config);

        pairs.push(KeyValuePair {
            key: header.key,
            key_cell: key_cell.coord,
            value: value_cell.value.clone(),
            value_cell: value_cell.coord,
            confidence: clamp_confidence(raw, config),
            strategy: SearchStrategy::RightThenDown,
            direction,
            canonical: synonym.map(|s| s.canonical.to_string()),
        });
    }

    pairs
}
