//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;

use std::io::Write;

use crate::error::SheetKvError;
use crate::kv::PairingConfig;
use crate::types::SheetCells;

pub(crate) use formatters::{JsonFormatter, TsvFormatter};

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（TSV, JSON）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Tsv { include_bom: bool },
    Json,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: crate::api::OutputFormat, include_bom: bool) -> Self {
        match format {
            crate::api::OutputFormat::Tsv => OutputFormatter::Tsv { include_bom },
            crate::api::OutputFormat::Json => OutputFormatter::Json,
        }
    }

    /// 抽出したセルを指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `sheet` - 出力するシートのセル一覧
    /// * `writer` - 出力先のライター
    /// * `pairing` - キー・バリュー推定の設定（JSON形式で使用）
    pub fn render<W: Write>(
        &self,
        sheet: &SheetCells,
        writer: &mut W,
        pairing: &PairingConfig,
    ) -> Result<(), SheetKvError> {
        match self {
            OutputFormatter::Tsv { include_bom } => TsvFormatter {
                include_bom: *include_bom,
            }
            .render(sheet, writer),
            OutputFormatter::Json => JsonFormatter.render(sheet, writer, pairing),
        }
    }
}
