//! カタログ出力の組み立て
//!
//! SKUは絞り込み後の並び順（1始まり）だけで決まる。内容のハッシュではないため、
//! 同じ商品でも並びが変われば別のSKUになる。

use crate::category::map_category;
use crate::error::{Error, Result};
use crate::text::{display_token, title_case};
use crate::types::{CatalogueEntry, ImageLinks, ProductRecord};
use std::collections::BTreeMap;

pub const DEFAULT_PRODUCT_FOLDER: &str = "extracted-products";
pub const DEFAULT_POSE_FOLDER: &str = "model-poses";

const SKU_PREFIX: &str = "ZC-";
/// SKU連番は4桁固定
pub const MAX_SKU_INDEX: usize = 9999;
const STATUS_PUBLISHED: &str = "published";

/// 出力時の共通パラメータ
#[derive(Debug, Clone)]
pub struct EntryContext {
    /// 商品画像パスの接頭フォルダ
    pub product_folder: String,
    /// ポーズ画像パスの接頭フォルダ
    pub pose_folder: String,
    /// 作成日時（1回の実行で共通）
    pub created_at: String,
}

impl EntryContext {
    pub fn new(created_at: impl Into<String>) -> Self {
        Self {
            product_folder: DEFAULT_PRODUCT_FOLDER.to_string(),
            pose_folder: DEFAULT_POSE_FOLDER.to_string(),
            created_at: created_at.into(),
        }
    }
}

/// SKUを採番
///
/// - 大人: `ZC-` + 性別の頭文字 + 4桁連番（例: `ZC-F0001`）
/// - キッズ: `ZC-K` + `B`/`G` + 4桁連番（例: `ZC-KG0002`）
pub fn sku_for(record: &ProductRecord, index: usize) -> String {
    if record.is_kid {
        let code = if record.gender == "boy" { 'B' } else { 'G' };
        format!("{}K{}{:04}", SKU_PREFIX, code, index)
    } else {
        let code = record
            .gender
            .chars()
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U');
        format!("{}{}{:04}", SKU_PREFIX, code, index)
    }
}

/// 性別区分（Men / Women / Kids / Unisex）
pub fn gender_category(record: &ProductRecord) -> &'static str {
    if record.is_kid {
        return "Kids";
    }
    match record.gender.to_lowercase().as_str() {
        "male" | "boy" => "Men",
        "female" | "girl" => "Women",
        _ => "Unisex",
    }
}

fn kid_label(record: &ProductRecord) -> &'static str {
    if record.gender == "boy" {
        "Boy's"
    } else {
        "Girl's"
    }
}

/// 商品名
pub fn product_title(record: &ProductRecord) -> String {
    let color = display_token(&record.color);
    let garment = display_token(&record.garment_type);

    let mut name = if record.is_kid {
        format!("{} {} {}", kid_label(record), color, garment)
    } else {
        format!("{} {}", color, garment)
    };

    if !record.pattern.is_empty() {
        name.push_str(&format!(" - {}", title_case(&record.pattern)));
    }
    name
}

/// 商品説明
pub fn product_description(record: &ProductRecord) -> String {
    let color = display_token(&record.color).to_lowercase();
    let garment = display_token(&record.garment_type).to_lowercase();

    let mut description = if record.is_kid {
        format!("Adorable {} {} {}", kid_label(record).to_lowercase(), color, garment)
    } else {
        format!("{}'s {} {}", title_case(&record.gender), color, garment)
    };

    if !record.pattern.is_empty() {
        description.push_str(&format!(" with {} design", record.pattern.to_lowercase()));
    }
    description.push_str(&format!(". {} style.", title_case(&record.style)));
    description
}

/// 1件分の出力を組み立て
pub fn build_entry(record: &ProductRecord, index: usize, ctx: &EntryContext) -> CatalogueEntry {
    let (category, subcategory) = map_category(&record.garment_type, record.is_kid);
    let pose_path = |slot: &Option<String>| {
        slot.as_ref().map(|file| format!("{}/{}", ctx.pose_folder, file))
    };

    CatalogueEntry {
        sku: sku_for(record, index),
        name: product_title(record),
        description: product_description(record),
        category,
        subcategory,
        gender: title_case(&record.gender),
        gender_category: gender_category(record).to_string(),
        age_group: if record.is_kid { "Kids" } else { "Adults" }.to_string(),
        color: display_token(&record.color),
        pattern: record.pattern.clone(),
        style: record.style.clone(),
        is_kid: record.is_kid,
        images: ImageLinks {
            product: format!("{}/{}", ctx.product_folder, record.filename),
            model_1: pose_path(&record.poses.front_standing),
            model_2: pose_path(&record.poses.three_quarter),
            model_3: pose_path(&record.poses.casual_lifestyle),
        },
        status: STATUS_PUBLISHED.to_string(),
        featured: false,
        created_at: ctx.created_at.clone(),
    }
}

/// 並び順どおりに採番して全件を組み立て
///
/// 件数が [`MAX_SKU_INDEX`] を超えるとSKUが4桁に収まらないためエラー。
pub fn build_entries(records: &[ProductRecord], ctx: &EntryContext) -> Result<Vec<CatalogueEntry>> {
    if records.len() > MAX_SKU_INDEX {
        return Err(Error::SkuOverflow {
            count: records.len(),
            max: MAX_SKU_INDEX,
        });
    }

    Ok(records
        .iter()
        .enumerate()
        .map(|(i, record)| build_entry(record, i + 1, ctx))
        .collect())
}

/// 実行結果の集計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueSummary {
    pub total: usize,
    pub with_poses: usize,
    pub kids: usize,
    pub adults: usize,
    pub by_gender: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

impl CatalogueSummary {
    pub fn from_records(records: &[ProductRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            if record.is_kid {
                summary.kids += 1;
            } else {
                summary.adults += 1;
            }
            if record.poses.has_any() {
                summary.with_poses += 1;
            }

            let (category, _) = map_category(&record.garment_type, record.is_kid);
            *summary.by_category.entry(category).or_insert(0) += 1;
            *summary.by_gender.entry(title_case(&record.gender)).or_insert(0) += 1;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::apply_age_analysis;
    use crate::filename::parse_garment_filename;
    use crate::types::AgeAnalysis;

    fn ctx() -> EntryContext {
        EntryContext::new("2026-01-01T00:00:00.000000")
    }

    fn kid(name: &str) -> ProductRecord {
        let mut record = parse_garment_filename(name).unwrap();
        apply_age_analysis(&mut record, &AgeAnalysis { is_kid: true, ..Default::default() });
        record
    }

    fn is_adult_sku(sku: &str) -> bool {
        let b = sku.as_bytes();
        sku.len() == 8
            && sku.starts_with("ZC-")
            && b[3].is_ascii_uppercase()
            && b[4..].iter().all(u8::is_ascii_digit)
    }

    fn is_kid_sku(sku: &str) -> bool {
        let b = sku.as_bytes();
        sku.len() == 9
            && sku.starts_with("ZC-K")
            && (b[4] == b'B' || b[4] == b'G')
            && b[5..].iter().all(u8::is_ascii_digit)
    }

    #[test]
    fn test_adult_mules_entry() {
        let record =
            parse_garment_filename("female_black_mules_SONY_ILCE-7RM5_9600x6376_000156_2.png")
                .unwrap();
        let entry = build_entry(&record, 1, &ctx());

        assert_eq!(entry.sku, "ZC-F0001");
        assert_eq!(entry.name, "Black Mules");
        assert_eq!(entry.description, "Female's black mules. Casual style.");
        assert_eq!(entry.category, "Footwear");
        assert_eq!(entry.subcategory, "Mules");
        assert_eq!(entry.gender, "Female");
        assert_eq!(entry.gender_category, "Women");
        assert_eq!(entry.age_group, "Adults");
        assert_eq!(
            entry.images.product,
            "extracted-products/female_black_mules_SONY_ILCE-7RM5_9600x6376_000156_2.png"
        );
        assert!(entry.images.model_1.is_none());
        assert_eq!(entry.status, "published");
        assert!(!entry.featured);
    }

    #[test]
    fn test_kid_flats_entry() {
        let record = kid("model2_female_beige_flats__DSC4148_1_6.png");
        let entry = build_entry(&record, 7, &ctx());

        assert_eq!(entry.sku, "ZC-KG0007");
        assert!(is_kid_sku(&entry.sku));
        assert_eq!(entry.name, "Girl's Beige Flats");
        assert_eq!(entry.description, "Adorable girl's beige flats. Casual style.");
        assert_eq!(entry.category, "Kids");
        assert_eq!(entry.subcategory, "Flats");
        assert_eq!(entry.gender, "Girl");
        assert_eq!(entry.gender_category, "Kids");
        assert_eq!(entry.age_group, "Kids");
    }

    #[test]
    fn test_pattern_in_name_and_description() {
        let record = parse_garment_filename("male_off-white_graphic_hoodie_streetwear_DSC0010.png").unwrap();
        let entry = build_entry(&record, 3, &ctx());
        assert_eq!(entry.name, "Off White Hoodie - Graphic");
        assert_eq!(
            entry.description,
            "Male's off white hoodie with graphic design. Streetwear style."
        );
        assert_eq!(entry.color, "Off White");
        assert_eq!(entry.sku, "ZC-M0003");
    }

    #[test]
    fn test_pose_paths_use_pose_folder() {
        let mut record = parse_garment_filename("female_red_dress_DSC0001.png").unwrap();
        record.poses.three_quarter = Some("female_DSC0001_three_quarter.png".to_string());
        let entry = build_entry(&record, 1, &ctx());
        assert!(entry.images.model_1.is_none());
        assert_eq!(
            entry.images.model_2.as_deref(),
            Some("model-poses/female_DSC0001_three_quarter.png")
        );
    }

    #[test]
    fn test_sku_formats_and_uniqueness() {
        let records = vec![
            parse_garment_filename("female_black_mules_SONY_ILCE-7RM5_000156_2.png").unwrap(),
            kid("male_blue_shorts_DSC0001.png"),
            parse_garment_filename("9unisex_grey_top_DSC0002.png").unwrap(),
            kid("female_pink_dress_DSC0003.png"),
            parse_garment_filename("unknown_white_tee.png").unwrap(),
        ];
        let entries = build_entries(&records, &ctx()).unwrap();
        let skus: Vec<&str> = entries.iter().map(|e| e.sku.as_str()).collect();

        assert_eq!(skus, vec!["ZC-F0001", "ZC-KB0002", "ZC-U0003", "ZC-KG0004", "ZC-U0005"]);
        for entry in &entries {
            if entry.is_kid {
                assert!(is_kid_sku(&entry.sku), "{}", entry.sku);
            } else {
                assert!(is_adult_sku(&entry.sku), "{}", entry.sku);
            }
        }
        let unique: std::collections::HashSet<_> = skus.iter().collect();
        assert_eq!(unique.len(), skus.len());
    }

    #[test]
    fn test_sku_index_limit() {
        let record = parse_garment_filename("female_black_mules.png").unwrap();

        let full = vec![record.clone(); MAX_SKU_INDEX];
        let entries = build_entries(&full, &ctx()).unwrap();
        assert_eq!(entries.last().unwrap().sku, "ZC-F9999");

        let over = vec![record; MAX_SKU_INDEX + 1];
        let result = build_entries(&over, &ctx());
        assert!(matches!(
            result,
            Err(Error::SkuOverflow { count: 10000, max: 9999 })
        ));
    }

    #[test]
    fn test_gender_category_buckets() {
        let mut record = parse_garment_filename("male_black_jeans.png").unwrap();
        assert_eq!(gender_category(&record), "Men");
        record.gender = "Female".to_string();
        assert_eq!(gender_category(&record), "Women");
        record.gender = "unknown".to_string();
        assert_eq!(gender_category(&record), "Unisex");
    }

    #[test]
    fn test_summary_counts() {
        let mut with_pose = parse_garment_filename("female_red_dress_DSC0001.png").unwrap();
        with_pose.poses.front_standing = Some("pose.png".to_string());
        let records = vec![
            with_pose,
            parse_garment_filename("female_black_mules_SONY_000156_2.png").unwrap(),
            kid("male_blue_shorts_DSC0001.png"),
        ];
        let summary = CatalogueSummary::from_records(&records);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.kids, 1);
        assert_eq!(summary.adults, 2);
        assert_eq!(summary.with_poses, 1);
        assert_eq!(summary.by_gender.get("Female"), Some(&2));
        assert_eq!(summary.by_gender.get("Boy"), Some(&1));
        assert_eq!(summary.by_category.get("Kids"), Some(&1));
        assert_eq!(summary.by_category.get("Dresses"), Some(&1));
        assert_eq!(summary.by_category.get("Footwear"), Some(&1));
    }
}
