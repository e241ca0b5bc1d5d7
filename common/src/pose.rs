//! モデルポーズ画像の照合
//!
//! 商品画像と同じ撮影元（DSC番号）・同じ性別のポーズ画像を3スロットに割り当てる。

use crate::types::PoseSlots;
use regex::Regex;
use std::path::Path;

lazy_static::lazy_static! {
    static ref DSC_RE: Regex = Regex::new(r"DSC(\d+)").unwrap();
}

/// ポーズ画像から除外する目印
const BACKUP_MARKER: &str = "ORIGINAL";

/// 撮影元参照からDSC番号を取り出す
pub fn source_number(source_ref: &str) -> Option<&str> {
    DSC_RE
        .captures(source_ref)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// ポーズ画像を探してスロットに割り当てる
///
/// 同じスロットに複数の候補がある場合は後勝ち（一覧順で最後のもの）。
///
/// # Arguments
/// * `source_ref` - 商品画像の撮影元参照
/// * `gender` - 性別トークン（大小無視の部分一致）
/// * `pose_files` - ポーズ画像のファイル名一覧
pub fn find_model_poses<S: AsRef<str>>(source_ref: &str, gender: &str, pose_files: &[S]) -> PoseSlots {
    let mut poses = PoseSlots::default();

    let Some(number) = source_number(source_ref) else {
        return poses;
    };
    let dsc_tag = format!("DSC{}", number);
    let gender = gender.to_lowercase();

    for file in pose_files {
        let file_name = file.as_ref();
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        if stem.contains(BACKUP_MARKER) {
            continue;
        }
        if !stem.contains(&dsc_tag) || !stem.to_lowercase().contains(&gender) {
            continue;
        }

        if stem.contains("front_standing") {
            poses.front_standing = Some(file_name.to_string());
        } else if stem.contains("three_quarter") {
            poses.three_quarter = Some(file_name.to_string());
        } else if stem.contains("casual_lifestyle") || stem.contains("lifestyle") {
            poses.casual_lifestyle = Some(file_name.to_string());
        }
    }

    poses
}
