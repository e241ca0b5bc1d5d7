//! Catalogue Common Library
//!
//! ファイル名解析・カテゴリ分類・SKU採番などI/Oを伴わないロジック

pub mod types;
pub mod error;
pub mod text;
pub mod filename;
pub mod age;
pub mod pose;
pub mod category;
pub mod catalogue;

pub use types::{AgeAnalysis, AgeCategory, CatalogueEntry, ImageLinks, PoseSlots, ProductRecord};
pub use error::{Error, Result};
pub use filename::{parse_garment_filename, BACKUP_PREFIX};
pub use age::{apply_age_analysis, parse_age_response, AGE_PROMPT};
pub use pose::find_model_poses;
pub use category::{category_for, map_category, subcategory_for};
pub use catalogue::{
    build_entries, build_entry, sku_for, CatalogueSummary, EntryContext, MAX_SKU_INDEX,
};
