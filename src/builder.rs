//! カタログ生成パイプライン
//!
//! ## 処理フロー
//! 1. 商品画像・ポーズ画像フォルダのスキャン
//! 2. ファイル名の解析（バックアップ・不正な名前は除外）
//! 3. 年齢・性別判定（失敗時は大人として続行、リトライなし）
//! 4. ポーズ画像の照合・カテゴリ分類・SKU採番
//! 5. CSV / JSON 出力

use crate::analyzer::cache::content_hash;
use crate::analyzer::{mime_type_for, AgeClassifier, CacheFile};
use crate::error::Result;
use crate::export::{self, CatalogueFiles};
use crate::scanner::{self, ImageInfo};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use zecode_catalogue_common::{
    apply_age_analysis, build_entries, find_model_poses, parse_garment_filename, AgeAnalysis,
    CatalogueEntry, CatalogueSummary, EntryContext, ProductRecord,
};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub garments_dir: PathBuf,
    pub poses_dir: PathBuf,
    pub output_dir: PathBuf,
    pub use_cache: bool,
    /// 同時に実行する判定数（1で逐次）
    pub concurrency: usize,
    /// 判定失敗後の待ち時間
    pub error_pause: Duration,
    /// 作成日時（全件共通）
    pub created_at: String,
}

#[derive(Debug)]
pub struct BuildReport {
    pub records: Vec<ProductRecord>,
    pub entries: Vec<CatalogueEntry>,
    pub summary: CatalogueSummary,
    pub files: CatalogueFiles,
    /// 判定に失敗して既定値を使った件数
    pub failed_classifications: usize,
}

/// 1枚分の判定結果
struct Classified {
    analysis: AgeAnalysis,
    /// キャッシュに追加する (ハッシュ, ファイルサイズ)
    fresh: Option<(String, u64)>,
    cached: bool,
    failed: bool,
}

impl Classified {
    fn fallback() -> Self {
        Self {
            analysis: AgeAnalysis::default(),
            fresh: None,
            cached: false,
            failed: true,
        }
    }
}

async fn classify_image(
    classifier: &dyn AgeClassifier,
    image: &ImageInfo,
    cache: Option<&CacheFile>,
    error_pause: Duration,
) -> Classified {
    let bytes = match tokio::fs::read(&image.path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(file = %image.file_name, error = %e, "画像を読み込めません、大人として扱います");
            tokio::time::sleep(error_pause).await;
            return Classified::fallback();
        }
    };

    let hash = cache.map(|_| content_hash(&bytes));
    if let (Some(cache), Some(hash)) = (cache, hash.as_deref()) {
        if let Some(hit) = cache.get(hash) {
            return Classified {
                analysis: hit.clone(),
                fresh: None,
                cached: true,
                failed: false,
            };
        }
    }

    match classifier.classify(&bytes, mime_type_for(&image.path)).await {
        Ok(analysis) => Classified {
            analysis,
            fresh: hash.map(|h| (h, bytes.len() as u64)),
            cached: false,
            failed: false,
        },
        Err(e) => {
            tracing::warn!(file = %image.file_name, error = %e, "年齢判定に失敗、大人として扱います");
            tokio::time::sleep(error_pause).await;
            Classified::fallback()
        }
    }
}

/// 出力パスに使うフォルダ表記
fn folder_label(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .trim_end_matches('/')
        .to_string()
}

fn short_name(name: &str) -> String {
    name.chars().take(40).collect()
}

/// 1件分の判定結果行（例: `  [1/3] female_black_mules.png... 👤 Adult`）
fn progress_line(position: usize, total: usize, file_name: &str, classified: &Classified) -> String {
    let label = match (classified.analysis.is_kid, classified.failed) {
        (true, _) => "👶 Kid",
        (false, false) => "👤 Adult",
        (false, true) => "👤 Adult (判定失敗)",
    };
    let source = if classified.cached { " [cache]" } else { "" };
    format!("  [{}/{}] {}... {}{}", position, total, short_name(file_name), label, source)
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

pub async fn build_catalogue(
    options: &BuildOptions,
    classifier: &dyn AgeClassifier,
) -> Result<BuildReport> {
    // 1. スキャン
    println!("[1/4] 画像をスキャン中...");
    let garments = scanner::scan_folder(&options.garments_dir)?;
    let poses = scanner::scan_folder(&options.poses_dir)?;
    println!("✔ 商品画像 {}枚 / ポーズ画像 {}枚を検出\n", garments.len(), poses.len());

    let pose_names: Vec<String> = poses.into_iter().map(|p| p.file_name).collect();

    let parsed: Vec<(ImageInfo, ProductRecord)> = garments
        .into_iter()
        .filter_map(|img| parse_garment_filename(&img.file_name).map(|record| (img, record)))
        .collect();

    // 2. 年齢判定
    println!("[2/4] 年齢判定中...");
    let mut cache = (options.use_cache && classifier.is_cacheable())
        .then(|| CacheFile::load(&options.garments_dir));

    let total = parsed.len();
    let results: Vec<Classified> = {
        let cache_ref = cache.as_ref();
        let pb = progress_bar(total);
        let mut stream = stream::iter(
            parsed
                .iter()
                .map(|(img, _)| classify_image(classifier, img, cache_ref, options.error_pause)),
        )
        .buffered(options.concurrency.max(1));

        let mut out = Vec::with_capacity(total);
        while let Some(classified) = stream.next().await {
            let (img, _) = &parsed[out.len()];
            let line = progress_line(out.len() + 1, total, &img.file_name, &classified);
            // バーが非表示（非TTY）でも必ず標準出力へ出す
            pb.suspend(|| println!("{}", line));
            pb.inc(1);
            out.push(classified);
        }
        pb.finish_and_clear();
        out
    };

    let failed_classifications = results.iter().filter(|c| c.failed).count();

    // 3. 判定結果の反映・ポーズ照合
    println!("\n[3/4] カタログを組み立て中...");
    let mut records = Vec::with_capacity(total);
    for ((img, mut record), classified) in parsed.into_iter().zip(results) {
        if let (Some(cache), Some((hash, size))) = (cache.as_mut(), classified.fresh) {
            cache.insert(hash, img.file_name.clone(), size, classified.analysis.clone());
        }

        apply_age_analysis(&mut record, &classified.analysis);
        record.poses = find_model_poses(&record.source_ref, &record.gender, &pose_names);
        records.push(record);
    }

    if let Some(cache) = &cache {
        if let Err(e) = cache.save(&options.garments_dir) {
            tracing::warn!(error = %e, "キャッシュを保存できません");
        }
    }

    let ctx = EntryContext {
        product_folder: folder_label(&options.garments_dir),
        pose_folder: folder_label(&options.poses_dir),
        created_at: options.created_at.clone(),
    };
    let entries = build_entries(&records, &ctx)?;
    println!("✔ {}件\n", entries.len());

    // 4. 出力
    println!("[4/4] 出力中...");
    let files = export::write_catalogue(&entries, &options.output_dir)?;

    let summary = CatalogueSummary::from_records(&records);

    Ok(BuildReport {
        records,
        entries,
        summary,
        files,
        failed_classifications,
    })
}

/// 集計を表示
pub fn print_summary(summary: &CatalogueSummary) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("カタログ集計");
    println!("{}", rule);

    println!("\n商品数: {}", summary.total);
    println!("ポーズ画像あり: {}", summary.with_poses);

    println!("\n年齢区分:");
    println!("  Kids: {}", summary.kids);
    println!("  Adults: {}", summary.adults);

    println!("\n性別:");
    for (gender, count) in &summary.by_gender {
        println!("  {}: {}", gender, count);
    }

    println!("\nカテゴリ:");
    for (category, count) in &summary.by_category {
        println!("  {}: {}", category, count);
    }

    println!("\n{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_label() {
        assert_eq!(folder_label(Path::new("extracted-products")), "extracted-products");
        assert_eq!(folder_label(Path::new("data/model-poses/")), "data/model-poses");
    }

    #[test]
    fn test_progress_line_labels() {
        let adult = Classified {
            analysis: AgeAnalysis::default(),
            fresh: None,
            cached: false,
            failed: false,
        };
        assert_eq!(
            progress_line(1, 1, "female_black_mules_DSC0001.png", &adult),
            "  [1/1] female_black_mules_DSC0001.png... 👤 Adult"
        );

        let kid = Classified {
            analysis: AgeAnalysis { is_kid: true, ..Default::default() },
            fresh: None,
            cached: true,
            failed: false,
        };
        assert_eq!(progress_line(2, 3, "a.png", &kid), "  [2/3] a.png... 👶 Kid [cache]");

        assert_eq!(
            progress_line(3, 3, "b.png", &Classified::fallback()),
            "  [3/3] b.png... 👤 Adult (判定失敗)"
        );
    }

    #[test]
    fn test_progress_line_survives_hidden_bar() {
        // 非TTYのバーと同じ状態。suspend はバーが非表示でもクロージャを実行する
        let pb = ProgressBar::hidden();
        let mut printed = Vec::new();
        pb.suspend(|| printed.push(progress_line(1, 1, "c.png", &Classified::fallback())));
        assert_eq!(printed, vec!["  [1/1] c.png... 👤 Adult (判定失敗)".to_string()]);
    }

    #[test]
    fn test_short_name_is_char_based() {
        let name = "あ".repeat(50);
        assert_eq!(short_name(&name).chars().count(), 40);
        assert_eq!(short_name("short.png"), "short.png");
    }
}
