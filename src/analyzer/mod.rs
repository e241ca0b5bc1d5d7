//! 年齢・性別判定
//!
//! 判定器はトレイトで差し替え可能:
//! - GeminiClassifier: Gemini Vision API
//! - OfflineClassifier: APIを呼ばず常に既定値（大人・性別不明）

pub mod cache;
mod gemini;

pub use cache::CacheFile;
pub use gemini::GeminiClassifier;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;
use zecode_catalogue_common::AgeAnalysis;

#[async_trait]
pub trait AgeClassifier: Send + Sync {
    /// 画像1枚を判定
    async fn classify(&self, image: &[u8], mime_type: &str) -> Result<AgeAnalysis>;

    /// 判定結果をキャッシュしてよいか
    fn is_cacheable(&self) -> bool {
        true
    }
}

pub struct OfflineClassifier;

#[async_trait]
impl AgeClassifier for OfflineClassifier {
    async fn classify(&self, _image: &[u8], _mime_type: &str) -> Result<AgeAnalysis> {
        Ok(AgeAnalysis::default())
    }

    fn is_cacheable(&self) -> bool {
        false
    }
}

/// 拡張子からMIMEタイプを決定
pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}
