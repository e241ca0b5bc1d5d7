//! 商品画像ファイル名パーサー
//!
//! `[modelN_]gender_color_..._garment..._sourceRef.png` 形式のファイル名から
//! 商品属性を復元する。
//!
//! 語彙リストの走査順（語彙順 → トークン順）がそのまま分類結果を決めるため、
//! リストの並びを変えてはならない。

use crate::types::{AgeCategory, PoseSlots, ProductRecord};
use regex::Regex;
use std::path::Path;

/// バックアップ（加工前オリジナル）を示す接頭辞
pub const BACKUP_PREFIX: &str = "ORIGINAL_";

/// 衣類の種類（この順で照合）
pub const GARMENT_TYPES: &[&str] = &[
    "t-shirt", "t_shirt", "tshirt", "shirt", "hoodie", "jacket", "jeans",
    "pants", "dress", "skirt", "blouse", "top", "sweater", "shorts",
    "jumpsuit", "coat", "blazer", "tank", "tracksuit", "sweatpants",
    "cardigan", "vest", "tunic", "mules", "flats", "backpack", "visor",
    "romper", "onesie", "overalls", "frock", "gown",
];

/// 柄
pub const PATTERNS: &[&str] = &[
    "graphic", "print", "striped", "speckled", "floral", "tie-dye",
    "color-block", "textured", "embroidered", "minimalist", "cartoon",
    "character", "animal", "rainbow",
];

/// スタイル
pub const STYLES: &[&str] = &[
    "streetwear", "casual", "formal", "bohemian", "athleisure",
    "vintage", "minimalist", "playful", "cute",
];

const DEFAULT_GARMENT: &str = "apparel";
const DEFAULT_STYLE: &str = "casual";
const UNKNOWN: &str = "unknown";

lazy_static::lazy_static! {
    // カメラ・書き出し元の識別子（DSC番号 / SONY / file）
    static ref SOURCE_TAG_RE: Regex = Regex::new(r"_+(DSC\d+|SONY|file)[^.]*").unwrap();
}

/// ファイル名から商品属性を復元
///
/// バックアップ接頭辞付き、または `modelN` の番号が読めないファイル名は `None`。
///
/// # Examples
/// ```
/// use zecode_catalogue_common::parse_garment_filename;
///
/// let record = parse_garment_filename("female_black_mules_SONY_ILCE-7RM5_000156_2.png").unwrap();
/// assert_eq!(record.gender, "female");
/// assert_eq!(record.garment_type, "mules");
/// assert!(parse_garment_filename("ORIGINAL_female_black_mules.png").is_none());
/// ```
pub fn parse_garment_filename(filename: &str) -> Option<ProductRecord> {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    if stem.starts_with(BACKUP_PREFIX) {
        return None;
    }

    let parts: Vec<&str> = stem.split('_').collect();

    // 先頭の modelN トークン
    let model_token = parts.first().copied().filter(|p| p.starts_with("model"));
    let model_number = match model_token {
        Some(token) => token["model".len()..]
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)?,
        None => 1,
    };
    let gender_idx = usize::from(model_token.is_some());

    let gender = parts
        .get(gender_idx)
        .filter(|g| !g.is_empty())
        .map(|g| g.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let source = SOURCE_TAG_RE.find(&stem);
    let source_ref = source
        .map(|m| m.as_str().trim_start_matches('_').to_string())
        .unwrap_or_default();
    let middle = match source {
        Some(m) => &stem[..m.start()],
        None => stem.as_str(),
    };

    let lead = match model_token {
        Some(token) => format!("{}_{}_", token, gender),
        None => format!("{}_", gender),
    };
    let middle = middle.replace(&lead, "");
    let remaining: Vec<&str> = middle.split('_').collect();

    let color = remaining
        .first()
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    Some(ProductRecord {
        filename: filename.to_string(),
        product_name: stem.clone(),
        gender,
        color,
        garment_type: find_garment_type(&remaining),
        pattern: find_in_vocabulary(&remaining, PATTERNS).unwrap_or_default(),
        style: find_in_vocabulary(&remaining, STYLES).unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        model_number,
        source_ref,
        is_kid: false,
        age_category: AgeCategory::Adult,
        poses: PoseSlots::default(),
    })
}

/// 色トークン以降から衣類の種類を探す（部分一致、双方向）
fn find_garment_type(tokens: &[&str]) -> String {
    tokens
        .iter()
        .skip(1)
        .filter(|t| !t.is_empty())
        .find(|token| {
            let lower = token.to_lowercase();
            GARMENT_TYPES.iter().any(|gt| {
                let key = gt.replace(['-', ' '], "_");
                lower.contains(&key) || gt.contains(lower.as_str())
            })
        })
        .map(|token| token.replace('_', " "))
        .unwrap_or_else(|| DEFAULT_GARMENT.to_string())
}

/// 語彙に完全一致（大小無視）する最初のトークン
fn find_in_vocabulary(tokens: &[&str], vocabulary: &[&str]) -> Option<String> {
    tokens
        .iter()
        .find(|token| vocabulary.contains(&token.to_lowercase().as_str()))
        .map(|token| token.replace('_', " "))
}
