//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。
//!
//! キー・バリュー推定のコア（`kv`モジュール）はエラーを返さない。
//! このエラー型はワークブックの読み込みや出力など、入出力側のアダプターでのみ使用される。

use thiserror::Error;

/// sheetkvクレート全体で使用するエラー型
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Parse`: スプレッドシートの解析中に発生したエラー（calamine由来）
/// - `Json`: JSON出力のシリアライズに失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `UnsupportedFormat`: XLSX/XLS以外の形式が渡されたエラー
/// - `SecurityViolation`: 入力サイズ制限に違反したエラー
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetkv::SheetKvError;
/// use std::fs::File;
///
/// fn open_sheet(path: &str) -> Result<File, SheetKvError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum SheetKvError {
    /// I/O操作中に発生したエラー
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// 破損したファイル、読み込めないアーカイブなどが原因となります。
    /// `#[from]`属性により、`calamine::Error`から自動的に変換されます。
    #[error("Failed to read workbook: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONシリアライズのエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// ```rust,no_run
    /// use sheetkv::{ExtractorBuilder, SheetKvError};
    ///
    /// let result = ExtractorBuilder::new().with_max_rows(0).build();
    ///
    /// if let Err(SheetKvError::Config(msg)) = result {
    ///     println!("設定エラー: {}", msg);
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// サポートされていないファイル形式
    ///
    /// calamineが認識できても、XLSX/XLS以外（ODS、XLSBなど）の場合に発生します。
    #[error("Unsupported workbook format: {0}")]
    UnsupportedFormat(String),

    /// セキュリティ制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}
