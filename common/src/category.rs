//! カテゴリ分類
//!
//! 衣類の種類（自由記述）を固定のカテゴリ体系に割り当てる。

use crate::text::title_case;

/// カテゴリ名とキーワード（この順で照合、先勝ち）
pub const CATEGORY_BUCKETS: &[(&str, &[&str])] = &[
    ("tops", &[
        "t-shirt", "tshirt", "shirt", "blouse", "top", "tank", "hoodie",
        "sweater", "sweatshirt", "cardigan", "vest", "tunic",
    ]),
    ("bottoms", &["jeans", "pants", "trousers", "shorts", "skirt", "sweatpants"]),
    ("outerwear", &["jacket", "coat", "blazer", "varsity"]),
    ("dresses", &["dress", "frock", "gown"]),
    ("jumpsuits", &["jumpsuit", "romper", "overalls", "onesie"]),
    ("accessories", &["backpack", "visor", "bag", "hat"]),
    ("footwear", &["mules", "flats", "shoes", "sneakers", "boots", "sandals"]),
];

/// キッズのサブカテゴリに使うバケット数（accessories / footwear は対象外）
const KIDS_SUBCATEGORY_BUCKETS: usize = 5;

pub const KIDS_CATEGORY: &str = "Kids";
pub const FALLBACK_CATEGORY: &str = "Apparel";

fn find_bucket(garment_type: &str, buckets: &[(&'static str, &[&str])]) -> Option<&'static str> {
    let garment_lower = garment_type.to_lowercase();
    buckets
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| garment_lower.contains(k)))
        .map(|(name, _)| *name)
}

/// カテゴリを決定
///
/// キッズはキーワードに関係なく常に "Kids"。
pub fn category_for(garment_type: &str, is_kid: bool) -> String {
    if is_kid {
        return KIDS_CATEGORY.to_string();
    }

    find_bucket(garment_type, CATEGORY_BUCKETS)
        .map(title_case)
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string())
}

/// サブカテゴリを決定
///
/// 大人は衣類の種類そのもの、キッズはバケット名（見つからなければ衣類の種類）。
pub fn subcategory_for(garment_type: &str, is_kid: bool) -> String {
    if is_kid {
        if let Some(bucket) = find_bucket(garment_type, &CATEGORY_BUCKETS[..KIDS_SUBCATEGORY_BUCKETS]) {
            return title_case(bucket);
        }
    }

    title_case(garment_type)
}

/// (カテゴリ, サブカテゴリ) をまとめて返す
pub fn map_category(garment_type: &str, is_kid: bool) -> (String, String) {
    (category_for(garment_type, is_kid), subcategory_for(garment_type, is_kid))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adult_buckets() {
        assert_eq!(map_category("mules", false), ("Footwear".to_string(), "Mules".to_string()));
        assert_eq!(map_category("jeans", false), ("Bottoms".to_string(), "Jeans".to_string()));
        assert_eq!(map_category("Blazer", false), ("Outerwear".to_string(), "Blazer".to_string()));
        assert_eq!(map_category("gown", false).0, "Dresses");
        assert_eq!(map_category("romper", false).0, "Jumpsuits");
        assert_eq!(map_category("backpack", false).0, "Accessories");
    }

    #[test]
    fn test_first_bucket_wins() {
        // "sweatshirt" は tops の "shirt" に先に当たる
        assert_eq!(category_for("sweatshirt", false), "Tops");
        // "sweatpants" は tops に当たらず bottoms
        assert_eq!(category_for("sweatpants", false), "Bottoms");
        // "shirtdress" は tops が先
        assert_eq!(category_for("shirtdress", false), "Tops");
    }

    #[test]
    fn test_no_match_is_apparel() {
        assert_eq!(category_for("apparel", false), "Apparel");
        assert_eq!(subcategory_for("apparel", false), "Apparel");
    }

    #[test]
    fn test_kids_forces_category() {
        assert_eq!(map_category("flats", true), ("Kids".to_string(), "Flats".to_string()));
        assert_eq!(map_category("dress", true), ("Kids".to_string(), "Dresses".to_string()));
        assert_eq!(map_category("hoodie", true), ("Kids".to_string(), "Tops".to_string()));
    }

    #[test]
    fn test_kids_subcategory_skips_accessories() {
        assert_eq!(subcategory_for("backpack", true), "Backpack");
    }

    #[test]
    fn test_mapping_is_pure() {
        for garment in ["mules", "t-shirt", "tunic", "overalls", "unknown thing"] {
            for is_kid in [false, true] {
                assert_eq!(map_category(garment, is_kid), map_category(garment, is_kid));
            }
        }
    }
}
