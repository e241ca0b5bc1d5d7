//! カタログ検査
//!
//! 書き出し済みの `product_catalogue.json` について、
//! SKU形式・SKU重複・画像ファイルの有無を確認する。

use crate::error::Result;
use crate::export::json::read_json;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use zecode_catalogue_common::CatalogueEntry;

lazy_static::lazy_static! {
    static ref ADULT_SKU_RE: Regex = Regex::new(r"^ZC-[A-Z]\d{4}$").unwrap();
    static ref KID_SKU_RE: Regex = Regex::new(r"^ZC-K[BG]\d{4}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditIssue {
    InvalidSku { sku: String, is_kid: bool },
    DuplicateSku { sku: String },
    MissingImage { sku: String, field: &'static str, path: String },
}

impl std::fmt::Display for AuditIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditIssue::InvalidSku { sku, is_kid } => {
                let kind = if *is_kid { "キッズ" } else { "大人" };
                write!(f, "SKU形式が不正（{}）: {}", kind, sku)
            }
            AuditIssue::DuplicateSku { sku } => write!(f, "SKUが重複: {}", sku),
            AuditIssue::MissingImage { sku, field, path } => {
                write!(f, "画像が見つかりません {} ({}): {}", sku, field, path)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    pub checked: usize,
    pub images_checked: usize,
    pub issues: Vec<AuditIssue>,
}

impl AuditReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn is_valid_sku(sku: &str, is_kid: bool) -> bool {
    if is_kid {
        KID_SKU_RE.is_match(sku)
    } else {
        ADULT_SKU_RE.is_match(sku)
    }
}

/// エントリ一覧を検査
///
/// 画像パスは `root` からの相対パスとして解決する。
pub fn audit_entries(entries: &[CatalogueEntry], root: &Path) -> AuditReport {
    let mut report = AuditReport {
        checked: entries.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for entry in entries {
        if !is_valid_sku(&entry.sku, entry.is_kid) {
            report.issues.push(AuditIssue::InvalidSku {
                sku: entry.sku.clone(),
                is_kid: entry.is_kid,
            });
        }
        if !seen.insert(entry.sku.as_str()) {
            report.issues.push(AuditIssue::DuplicateSku { sku: entry.sku.clone() });
        }

        let images = [
            ("product", Some(&entry.images.product)),
            ("model_1", entry.images.model_1.as_ref()),
            ("model_2", entry.images.model_2.as_ref()),
            ("model_3", entry.images.model_3.as_ref()),
        ];
        for (field, path) in images {
            let Some(path) = path else { continue };
            report.images_checked += 1;
            if !root.join(path).is_file() {
                report.issues.push(AuditIssue::MissingImage {
                    sku: entry.sku.clone(),
                    field,
                    path: path.clone(),
                });
            }
        }
    }

    report
}

/// カタログJSONを読み込んで検査
///
/// `root` 省略時はJSONファイルのあるディレクトリを基準にする。
pub fn audit_catalogue(input: &Path, root: Option<&Path>) -> Result<AuditReport> {
    let entries = read_json(input)?;
    let base = root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());

    tracing::debug!(entries = entries.len(), root = %base.display(), "カタログ検査");

    Ok(audit_entries(&entries, &base))
}
