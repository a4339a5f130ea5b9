//! Security Module
//!
//! 入力サイズの制限を実装するモジュール。
//! アップロードされたファイルは全体をメモリに読み込むため、読み込み前に上限を設ける。

use std::io::Read;

use crate::error::SheetKvError;

/// 入力ファイルの最大サイズの既定値（100MB）
pub(crate) const DEFAULT_MAX_INPUT_BYTES: u64 = 104_857_600;

/// セキュリティ設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SecurityConfig {
    /// 入力ファイルの最大サイズ（バイト）
    pub max_input_bytes: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// 入力全体をメモリに読み込む
///
/// 上限を1バイトでも超えた時点で読み込みを打ち切り、`SecurityViolation`を返す。
/// 上限より大きい入力を最後まで読むことはない。
pub(crate) fn read_input<R: Read>(
    reader: R,
    config: &SecurityConfig,
) -> Result<Vec<u8>, SheetKvError> {
    let mut buffer = Vec::new();
    let bytes_read = reader
        .take(config.max_input_bytes.saturating_add(1))
        .read_to_end(&mut buffer)?;

    if bytes_read as u64 > config.max_input_bytes {
        return Err(SheetKvError::SecurityViolation(format!(
            "Input file size exceeds maximum: more than {} bytes",
            config.max_input_bytes
        )));
    }

    Ok(buffer)
}
