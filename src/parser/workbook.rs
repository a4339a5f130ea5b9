//! Workbook Reader
//!
//! calamineを使用してワークブックを開き、1つのワークシートから非空セルを抽出する。
//! 読み込み範囲は`max_rows` × `max_cols`に制限し、結合セルは左上セルの値で埋める。

use std::collections::BTreeMap;
use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Dimensions, Range, Reader, Sheets, Xls, Xlsx};
use tracing::{debug, warn};

use crate::api::SheetSelector;
use crate::builder::ExtractionConfig;
use crate::error::SheetKvError;
use crate::normalize::{cell_text, normalize_cell_text};
use crate::types::{Cell, CellCoord, CellRange, MergedRegion, SheetCells};

/// サポートするワークブック形式
enum Workbook {
    Xlsx(Xlsx<Cursor<Vec<u8>>>),
    Xls(Xls<Cursor<Vec<u8>>>),
}

/// ワークブックリーダー
///
/// calamineのラッパーとして、シート選択と非空セルの抽出を提供します。
pub(crate) struct WorkbookReader {
    workbook: Workbook,
}

impl WorkbookReader {
    /// メモリ上のバイト列からワークブックを開く
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookReader)` - XLSXまたはXLSとして開けた場合
    /// * `Err(SheetKvError::Parse)` - 破損している、またはスプレッドシートではない場合
    /// * `Err(SheetKvError::UnsupportedFormat)` - ODS/XLSBの場合
    pub fn open(buffer: Vec<u8>) -> Result<Self, SheetKvError> {
        let workbook = match open_workbook_auto_from_rs(Cursor::new(buffer))? {
            Sheets::Xlsx(workbook) => Workbook::Xlsx(workbook),
            Sheets::Xls(workbook) => Workbook::Xls(workbook),
            Sheets::Xlsb(_) => return Err(SheetKvError::UnsupportedFormat("xlsb".to_string())),
            Sheets::Ods(_) => return Err(SheetKvError::UnsupportedFormat("ods".to_string())),
        };

        Ok(Self { workbook })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        match &self.workbook {
            Workbook::Xlsx(workbook) => workbook.sheet_names(),
            Workbook::Xls(workbook) => workbook.sheet_names(),
        }
    }

    /// シート選択方式からシート名を決定する
    ///
    /// 選択できなかった場合は先頭シートにフォールバックする。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 選択されたシート名
    /// * `Err(SheetKvError::Config)` - ワークブックにシートが1つもない場合
    pub fn select_sheet(&self, selector: &SheetSelector) -> Result<String, SheetKvError> {
        let names = self.sheet_names();
        if names.is_empty() {
            return Err(SheetKvError::Config("Workbook has no sheets".to_string()));
        }

        let index = resolve_sheet_index(&names, selector).unwrap_or_else(|| {
            warn!(selector = ?selector, fallback = %names[0], "sheet not found; falling back to first sheet");
            0
        });

        Ok(names[index].clone())
    }

    /// シートから非空セルを抽出する
    ///
    /// # 処理内容
    ///
    /// 1. `max_rows` × `max_cols`の範囲のセルを読み込み、正規化して空セルを除外
    /// 2. 結合セルの展開（有効な場合）
    /// 3. 行優先に並べ、`max_nonempty`個で打ち切り
    pub fn read_sheet(
        &mut self,
        sheet_name: &str,
        config: &ExtractionConfig,
    ) -> Result<SheetCells, SheetKvError> {
        let (range, merged_regions) = self.load_sheet(sheet_name, config.expand_merged)?;
        let bounds = CellRange::new(
            CellCoord::new(1, 1),
            CellCoord::new(config.max_rows, config.max_cols),
        );

        let mut values: BTreeMap<CellCoord, String> = BTreeMap::new();
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        for (row, col, data) in range.used_cells() {
            let coord = CellCoord::new(start_row + row as u32 + 1, start_col + col as u32 + 1);
            if !bounds.contains(coord) {
                continue;
            }
            if let Some(text) = normalize_cell_text(cell_text(data).as_deref()) {
                values.insert(coord, text);
            }
        }

        for region in &merged_regions {
            expand_merged_region(&range, region, &bounds, &mut values);
        }

        let total = values.len();
        let truncated = total >= config.max_nonempty;
        let cells: Vec<Cell> = values
            .into_iter()
            .take(config.max_nonempty)
            .map(|(coord, value)| Cell { coord, value })
            .collect();

        debug!(
            sheet = sheet_name,
            cells = cells.len(),
            merged_regions = merged_regions.len(),
            truncated,
            "read sheet cells"
        );

        Ok(SheetCells {
            sheet_name: sheet_name.to_string(),
            cells,
            truncated,
        })
    }

    /// シートの値と結合セル範囲を読み込む
    fn load_sheet(
        &mut self,
        sheet_name: &str,
        with_merged: bool,
    ) -> Result<(Range<Data>, Vec<MergedRegion>), SheetKvError> {
        match &mut self.workbook {
            Workbook::Xlsx(workbook) => {
                let range = workbook
                    .worksheet_range(sheet_name)
                    .map_err(|e| SheetKvError::Parse(e.into()))?;
                if !with_merged {
                    return Ok((range, Vec::new()));
                }

                workbook
                    .load_merged_regions()
                    .map_err(|e| SheetKvError::Parse(e.into()))?;
                let dims = match workbook.worksheet_merge_cells(sheet_name) {
                    Some(Ok(dims)) => dims,
                    Some(Err(e)) => {
                        warn!(sheet = sheet_name, error = %e, "failed to read merged regions");
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                Ok((range, to_merged_regions(&dims)))
            }
            Workbook::Xls(workbook) => {
                let range = workbook
                    .worksheet_range(sheet_name)
                    .map_err(|e| SheetKvError::Parse(e.into()))?;
                if !with_merged {
                    return Ok((range, Vec::new()));
                }

                let dims = workbook.worksheet_merge_cells(sheet_name).unwrap_or_default();
                Ok((range, to_merged_regions(&dims)))
            }
        }
    }
}

/// calamineの結合範囲（0始まり）を1始まりの`MergedRegion`に変換
fn to_merged_regions(dims: &[Dimensions]) -> Vec<MergedRegion> {
    dims.iter()
        .map(|d| {
            let start = CellCoord::new(d.start.0 + 1, d.start.1 + 1);
            let end = CellCoord::new(d.end.0 + 1, d.end.1 + 1);
            MergedRegion::new(CellRange::new(start, end))
        })
        .collect()
}

/// 結合範囲の左上セルの値を、読み込み範囲内のすべてのメンバーセルに複製する
///
/// 範囲の右下側は読み込み範囲で切り詰める。左上セルが空なら何もしない。
fn expand_merged_region(
    range: &Range<Data>,
    region: &MergedRegion,
    bounds: &CellRange,
    values: &mut BTreeMap<CellCoord, String>,
) {
    let parent = region.parent;
    let Some(text) = range
        .get_value((parent.row - 1, parent.col - 1))
        .and_then(|data| normalize_cell_text(cell_text(data).as_deref()))
    else {
        return;
    };

    let clipped_end = CellCoord::new(
        region.range.end.row.min(bounds.end.row),
        region.range.end.col.min(bounds.end.col),
    );
    if clipped_end.row < region.range.start.row || clipped_end.col < region.range.start.col {
        return;
    }
    let clipped = MergedRegion {
        range: CellRange::new(region.range.start, clipped_end),
        parent,
    };

    for coord in clipped.members() {
        values.insert(coord, text.clone());
    }
}

/// シート選択方式をシートのインデックスに解決する（解決できなければ`None`）
fn resolve_sheet_index(names: &[String], selector: &SheetSelector) -> Option<usize> {
    match selector {
        SheetSelector::First => Some(0),
        SheetSelector::Index(index) => (*index < names.len()).then_some(*index),
        SheetSelector::Name(name) => names.iter().position(|n| n == name),
        SheetSelector::Request(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Some(0);
            }
            match raw.parse::<i64>() {
                Ok(i) => {
                    let len = names.len() as i64;
                    if (0..len).contains(&i) {
                        Some(i as usize)
                    } else if (1..=len).contains(&i) {
                        Some(i as usize - 1)
                    } else {
                        None
                    }
                }
                Err(_) => names.iter().position(|n| n == raw),
            }
        }
    }
}
