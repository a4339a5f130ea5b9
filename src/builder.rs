//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use std::io::{BufWriter, Read, Write};

use tracing::{debug, info};

use crate::api::{OutputFormat, SheetSelector};
use crate::error::SheetKvError;
use crate::kv::{extract_pairs_with, PairingConfig};
use crate::output::OutputFormatter;
use crate::parser::WorkbookReader;
use crate::security::{read_input, SecurityConfig};
use crate::types::{Cell, KeyValuePair, SheetCells};

/// 読み込む最大行数の既定値
pub(crate) const DEFAULT_MAX_ROWS: u32 = 200;

/// 読み込む最大列数の既定値
pub(crate) const DEFAULT_MAX_COLS: u32 = 50;

/// 出力する非空セル数の上限の既定値
pub(crate) const DEFAULT_MAX_NONEMPTY: usize = 2000;

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// 出力フォーマット
    pub output_format: OutputFormat,

    /// TSV出力の先頭にBOMを付けるか
    pub include_bom: bool,

    /// 結合セルを左上セルの値で埋めるか
    pub expand_merged: bool,

    /// 読み込む最大行数（1行目から数える）
    pub max_rows: u32,

    /// 読み込む最大列数（A列から数える）
    pub max_cols: u32,

    /// 非空セル数の上限
    pub max_nonempty: usize,

    /// 入力サイズの制限
    pub security: SecurityConfig,

    /// キー・バリュー推定の設定
    pub pairing: PairingConfig,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::First,
            output_format: OutputFormat::Tsv,
            include_bom: true,
            expand_merged: true,
            max_rows: DEFAULT_MAX_ROWS,
            max_cols: DEFAULT_MAX_COLS,
            max_nonempty: DEFAULT_MAX_NONEMPTY,
            security: SecurityConfig::default(),
            pairing: PairingConfig::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Extractor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use sheetkv::{ExtractorBuilder, OutputFormat, SheetSelector};
///
/// # fn main() -> Result<(), sheetkv::SheetKvError> {
/// let extractor = ExtractorBuilder::new()
///     .with_sheet_selector(SheetSelector::Request("2".to_string()))
///     .with_output_format(OutputFormat::Json)
///     .with_max_rows(100)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: 先頭シート
    /// - 出力フォーマット: TSV（BOM付き）
    /// - 結合セル: 左上セルの値で埋める
    /// - 読み込み範囲: 200行 × 50列、非空セルは2000個まで
    /// - 入力サイズ: 100MBまで
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 抽出対象のシートを選択する
    ///
    /// ```rust
    /// use sheetkv::{ExtractorBuilder, SheetSelector};
    ///
    /// // シート名で指定
    /// let builder = ExtractorBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("スキルシート".to_string()));
    ///
    /// // フォームから受け取った文字列をそのまま渡す
    /// let builder = ExtractorBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Request("1".to_string()));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// 出力フォーマットを指定する
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// TSV出力の先頭にUTF-8のBOMを付けるかを指定する（デフォルト: `true`）
    ///
    /// JSON出力にはBOMを付けません。
    pub fn with_bom(mut self, include: bool) -> Self {
        self.config.include_bom = include;
        self
    }

    /// 結合セルの展開を指定する（デフォルト: `true`）
    ///
    /// * `true`: 結合範囲のすべてのセルに左上セルの値を入れる
    /// * `false`: 左上セルのみ値を持つ
    pub fn with_merge_expansion(mut self, expand: bool) -> Self {
        self.config.expand_merged = expand;
        self
    }

    /// 読み込む最大行数を指定する
    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.config.max_rows = max_rows;
        self
    }

    /// 読み込む最大列数を指定する
    pub fn with_max_cols(mut self, max_cols: u32) -> Self {
        self.config.max_cols = max_cols;
        self
    }

    /// 非空セル数の上限を指定する
    ///
    /// 上限を超えた分は捨てられます。非空セル数が上限に達した時点で、出力に打ち切りの印が付きます。
    pub fn with_max_nonempty(mut self, max_nonempty: usize) -> Self {
        self.config.max_nonempty = max_nonempty;
        self
    }

    /// 入力ファイルの最大サイズ（バイト）を指定する
    pub fn with_max_input_bytes(mut self, max_input_bytes: u64) -> Self {
        self.config.security.max_input_bytes = max_input_bytes;
        self
    }

    /// キー・バリュー推定の設定を指定する
    ///
    /// ```rust
    /// use sheetkv::{ExtractorBuilder, PairingConfig};
    ///
    /// let pairing = PairingConfig {
    ///     max_right_distance: 3,
    ///     ..PairingConfig::default()
    /// };
    /// let builder = ExtractorBuilder::new().with_pairing_config(pairing);
    /// ```
    pub fn with_pairing_config(mut self, pairing: PairingConfig) -> Self {
        self.config.pairing = pairing;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Extractor)`: 設定が有効な場合
    /// * `Err(SheetKvError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * 行数・列数・非空セル数・入力サイズの上限が0
    /// * `PairingConfig`の値が範囲外
    pub fn build(self) -> Result<Extractor, SheetKvError> {
        let config = &self.config;

        if config.max_rows == 0 {
            return Err(SheetKvError::Config(
                "max_rows must be greater than 0".to_string(),
            ));
        }
        if config.max_cols == 0 {
            return Err(SheetKvError::Config(
                "max_cols must be greater than 0".to_string(),
            ));
        }
        if config.max_nonempty == 0 {
            return Err(SheetKvError::Config(
                "max_nonempty must be greater than 0".to_string(),
            ));
        }
        if config.security.max_input_bytes == 0 {
            return Err(SheetKvError::Config(
                "max_input_bytes must be greater than 0".to_string(),
            ));
        }

        config.pairing.validate().map_err(SheetKvError::Config)?;

        Ok(Extractor::new(self.config))
    }
}

/// 抽出処理のファサード
///
/// ワークブックから1シートを読み込み、非空セルの一覧やキー・バリューのペアを取り出す
/// メインエントリーポイントです。構築後は変更されないため、スレッド間で共有できます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetkv::ExtractorBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), sheetkv::SheetKvError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let pairs = extractor.extract_pairs(File::open("skill_sheet.xlsx")?)?;
/// for pair in pairs {
///     println!("{} = {} ({:.2})", pair.key, pair.value, pair.confidence);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,
}

impl Extractor {
    pub(crate) fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// ワークブックを読み込み、選択したシートの非空セルを抽出する
    ///
    /// # 引数
    ///
    /// * `input` - XLSX/XLSファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(SheetCells)` - 行優先に並んだ非空セル
    /// * `Err(SheetKvError)` - 入力サイズ超過、解析失敗、未対応形式など
    ///
    /// # 処理フロー
    ///
    /// 1. 入力サイズを確認しながらメモリに読み込む
    /// 2. ワークブックを開く
    /// 3. シート選択（見つからなければ先頭シート）
    /// 4. 読み込み範囲内の非空セルを抽出
    pub fn read_cells<R: Read>(&self, input: R) -> Result<SheetCells, SheetKvError> {
        let buffer = read_input(input, &self.config.security)?;
        debug!(bytes = buffer.len(), "read workbook input");

        let mut reader = WorkbookReader::open(buffer)?;
        let sheet_name = reader.select_sheet(&self.config.sheet_selector)?;
        let sheet = reader.read_sheet(&sheet_name, &self.config)?;

        info!(
            sheet = %sheet.sheet_name,
            cells = sheet.cells.len(),
            truncated = sheet.truncated,
            "extracted non-empty cells"
        );

        Ok(sheet)
    }

    /// ワークブックを読み込み、キー・バリューのペアを推定する
    pub fn extract_pairs<R: Read>(&self, input: R) -> Result<Vec<KeyValuePair>, SheetKvError> {
        let sheet = self.read_cells(input)?;
        Ok(self.pairs_from_cells(&sheet.cells))
    }

    /// 抽出済みのセルから、この`Extractor`の推定設定でペアを推定する
    pub fn pairs_from_cells(&self, cells: &[Cell]) -> Vec<KeyValuePair> {
        let pairs = extract_pairs_with(cells, &self.config.pairing);
        debug!(cells = cells.len(), pairs = pairs.len(), "paired cells");
        pairs
    }

    /// ワークブックを読み込み、設定された出力フォーマットで書き出す
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetkv::{ExtractorBuilder, OutputFormat};
    /// use std::fs::File;
    ///
    /// # fn main() -> Result<(), sheetkv::SheetKvError> {
    /// let extractor = ExtractorBuilder::new()
    ///     .with_output_format(OutputFormat::Json)
    ///     .build()?;
    /// let input = File::open("skill_sheet.xlsx")?;
    /// extractor.convert(input, std::io::stdout())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read, W: Write>(&self, input: R, mut output: W) -> Result<(), SheetKvError> {
        let sheet = self.read_cells(input)?;

        let formatter =
            OutputFormatter::from_format(self.config.output_format, self.config.include_bom);
        let mut writer = BufWriter::new(&mut output);
        formatter.render(&sheet, &mut writer, &self.config.pairing)?;
        writer.flush()?;

        Ok(())
    }

    /// ワークブックを読み込み、出力を文字列として返す
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, SheetKvError> {
        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            SheetKvError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }
}
