//! Parser Module
//!
//! calamineを使用したワークブック読み込み。
//! 1つのシートから、読み込み範囲内の非空セルを行優先で抽出します。

mod workbook;

pub(crate) use workbook::WorkbookReader;
