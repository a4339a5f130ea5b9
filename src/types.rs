//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。
//! 座標はすべてExcelの表示と同じ1始まりで扱う。

use serde::{Deserialize, Serialize};

/// セル座標（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    /// 行番号（1始まり）
    pub row: u32,
    /// 列番号（1始まり、A列 = 1）
    pub col: u32,
}

impl CellCoord {
    /// 新しい座標を生成
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// A1形式の文字列に変換（例: (1, 1) -> "A1"）
    pub fn to_a1_notation(&self) -> String {
        format!("{}{}", col_index_to_letter(self.col), self.row)
    }

    /// 右方向に`offset`列離れた座標
    pub(crate) fn right(&self, offset: u32) -> Option<Self> {
        self.col.checked_add(offset).map(|col| Self::new(self.row, col))
    }

    /// 下方向に`offset`行離れた座標
    pub(crate) fn down(&self, offset: u32) -> Option<Self> {
        self.row.checked_add(offset).map(|row| Self::new(row, self.col))
    }
}

/// 列番号を文字列に変換（1 -> "A", 26 -> "Z", 27 -> "AA"）
///
/// 0は不正な列番号だが、パニックせず空文字列を返す。
pub(crate) fn col_index_to_letter(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = col;
    while n > 0 {
        let remainder = (n - 1) % 26;
        result.push((b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }
    result.iter().rev().collect()
}

/// セル範囲（両端を含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRange {
    pub start: CellCoord,
    pub end: CellCoord,
}

impl CellRange {
    /// 新しい範囲を生成
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        Self { start, end }
    }

    /// 指定された座標が範囲内にあるかを判定
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.row >= self.start.row
            && coord.row <= self.end.row
            && coord.col >= self.start.col
            && coord.col <= self.end.col
    }
}

/// セル結合範囲の情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MergedRegion {
    /// 結合範囲
    pub range: CellRange,

    /// 親セル（左上セル）の座標
    pub parent: CellCoord,
}

impl MergedRegion {
    /// 新しい結合範囲を生成
    pub fn new(range: CellRange) -> Self {
        Self {
            parent: range.start,
            range,
        }
    }

    /// 結合範囲内の座標を行優先で列挙（親セルを含む）
    pub fn members(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let range = self.range;
        (range.start.row..=range.end.row).flat_map(move |row| {
            (range.start.col..=range.end.col).map(move |col| CellCoord::new(row, col))
        })
    }
}

/// 位置付きの非空セル
///
/// ワークシートから抽出された1セル分のテキスト。キー・バリュー推定の入力になる。
/// JSONでは `{"row": 1, "col": 2, "value": "..."}` の形で表現される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// セル座標
    #[serde(flatten)]
    pub coord: CellCoord,

    /// セルの値（正規化済みテキスト）
    pub value: String,
}

impl Cell {
    /// 行・列（1始まり）と値からセルを生成
    pub fn new(row: u32, col: u32, value: impl Into<String>) -> Self {
        Self {
            coord: CellCoord::new(row, col),
            value: value.into(),
        }
    }
}

/// 1つのワークシートから抽出した非空セルの一覧
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetCells {
    /// シート名
    pub sheet_name: String,

    /// 行優先に並んだ非空セル（正規化済み）
    pub cells: Vec<Cell>,

    /// 非空セル数の上限で打ち切られたか
    pub truncated: bool,
}

/// 値セルの探索戦略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// 同じ行を右方向に探し、見つからなければ同じ列を下方向に探す
    #[serde(rename = "right-then-down")]
    RightThenDown,
}

impl SearchStrategy {
    /// 戦略のラベル文字列
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStrategy::RightThenDown => "right-then-down",
        }
    }
}

/// 値セルが見つかった方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// 同じ行の右側
    Right,
    /// 同じ列の下側
    Down,
}

/// 推定されたキー・バリューのペア
///
/// 一度生成されたら変更されない。信頼度は常に`[0, max_confidence]`に収まり、
/// 1.0（確実）になることはない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyValuePair {
    /// キーのテキスト（末尾のコロンは除去済み）
    pub key: String,

    /// キーセルの座標
    pub key_cell: CellCoord,

    /// 値のテキスト
    pub value: String,

    /// 値セルの座標
    pub value_cell: CellCoord,

    /// 信頼度（0.0〜0.95）
    pub confidence: f64,

    /// 探索戦略
    pub strategy: SearchStrategy,

    /// 値セルが見つかった方向
    pub direction: Direction,

    /// キーが一致した同義語辞書の正規名（例: "name"）
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub canonical: Option<String>,
}
