//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error: {0}")]
    Parse(String),

    /// 4桁連番に収まらない件数
    #[error("SKU連番の上限を超えています: {count}件（最大{max}件）")]
    SkuOverflow { count: usize, max: usize },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
