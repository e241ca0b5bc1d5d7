//! カタログの型定義
//!
//! CLIと共通ロジックで共有される型:
//! - ProductRecord: ファイル名から復元した商品属性（実行ごとに再構築）
//! - AgeAnalysis: 年齢・性別判定AIの出力
//! - CatalogueEntry: 最終出力（CSV行 / JSONオブジェクト）

use serde::{Deserialize, Serialize};

/// 年齢区分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeCategory {
    #[default]
    Adult,
    Kid,
}

impl AgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::Adult => "adult",
            AgeCategory::Kid => "kid",
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// モデルポーズ画像の3スロット
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseSlots {
    pub front_standing: Option<String>,
    pub three_quarter: Option<String>,
    pub casual_lifestyle: Option<String>,
}

impl PoseSlots {
    /// いずれかのスロットが埋まっているか
    pub fn has_any(&self) -> bool {
        self.front_standing.is_some()
            || self.three_quarter.is_some()
            || self.casual_lifestyle.is_some()
    }
}

/// ファイル名から復元した商品属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub filename: String,
    pub product_name: String,
    pub gender: String,
    pub color: String,
    pub garment_type: String,
    pub pattern: String,
    pub style: String,
    pub model_number: u32,
    pub source_ref: String,
    pub is_kid: bool,
    pub age_category: AgeCategory,
    pub poses: PoseSlots,
}

/// 年齢・性別判定の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeAnalysis {
    pub is_kid: bool,
    pub estimated_age_range: String,
    pub gender: String,
}

impl Default for AgeAnalysis {
    /// 判定失敗時に使う安全側の値（大人・性別不明）
    fn default() -> Self {
        Self {
            is_kid: false,
            estimated_age_range: String::new(),
            gender: "unknown".to_string(),
        }
    }
}

/// 画像パス（JSON出力の `images`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLinks {
    pub product: String,
    pub model_1: Option<String>,
    pub model_2: Option<String>,
    pub model_3: Option<String>,
}

/// カタログ1件分の出力
///
/// フィールド順はJSON出力のキー順になる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub gender: String,
    pub gender_category: String,
    pub age_group: String,
    pub color: String,
    pub pattern: String,
    pub style: String,
    pub is_kid: bool,
    pub images: ImageLinks,
    pub status: String,
    pub featured: bool,
    pub created_at: String,
}
