//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use std::io::Write;

use serde::Serialize;

use crate::error::SheetKvError;
use crate::kv::{extract_pairs_with, PairingConfig};
use crate::types::{Cell, KeyValuePair, SheetCells};

/// UTF-8のBOM
const UTF8_BOM: &str = "\u{feff}";

/// 打ち切りを示す末尾行
pub(crate) const TRUNCATED_MARKER: &str = "# ...truncated...";

/// TSV形式のフォーマッター
///
/// 1行1セルで`A1<TAB>値`を出力する。行の区切りは`\n`で、末尾に改行は付けない。
pub(crate) struct TsvFormatter {
    pub include_bom: bool,
}

impl TsvFormatter {
    pub fn render<W: Write>(&self, sheet: &SheetCells, writer: &mut W) -> Result<(), SheetKvError> {
        if self.include_bom {
            write!(writer, "{}", UTF8_BOM)?;
        }

        let mut first = true;
        for cell in &sheet.cells {
            if !first {
                writeln!(writer)?;
            }
            first = false;
            write!(writer, "{}\t{}", cell.coord.to_a1_notation(), cell.value)?;
        }

        if sheet.truncated {
            if !first {
                writeln!(writer)?;
            }
            write!(writer, "{}", TRUNCATED_MARKER)?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// JSON出力の形
#[derive(Serialize)]
struct JsonDocument<'a> {
    sheet: &'a str,
    truncated: bool,
    cells: &'a [Cell],
    pairs: Vec<KeyValuePair>,
}

/// JSON形式のフォーマッター
///
/// セル一覧に加えて、推定したキー・バリューのペアも出力する。
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        sheet: &SheetCells,
        writer: &mut W,
        pairing: &PairingConfig,
    ) -> Result<(), SheetKvError> {
        let document = JsonDocument {
            sheet: &sheet.sheet_name,
            truncated: sheet.truncated,
            cells: &sheet.cells,
            pairs: extract_pairs_with(&sheet.cells, pairing),
        };

        serde_json::to_writer_pretty(&mut *writer, &document)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}
