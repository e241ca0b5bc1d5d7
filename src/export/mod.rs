pub mod csv;
pub mod json;

use crate::error::Result;
use std::path::{Path, PathBuf};
use zecode_catalogue_common::CatalogueEntry;

pub const CSV_FILE_NAME: &str = "product_catalogue.csv";
pub const JSON_FILE_NAME: &str = "product_catalogue.json";

/// 出力ファイルのパス
#[derive(Debug, Clone)]
pub struct CatalogueFiles {
    pub csv: PathBuf,
    pub json: PathBuf,
}

impl CatalogueFiles {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            csv: output_dir.join(CSV_FILE_NAME),
            json: output_dir.join(JSON_FILE_NAME),
        }
    }
}

/// CSVとJSONを両方書き出す（既存ファイルは全体を上書き）
pub fn write_catalogue(entries: &[CatalogueEntry], output_dir: &Path) -> Result<CatalogueFiles> {
    std::fs::create_dir_all(output_dir)?;
    let files = CatalogueFiles::in_dir(output_dir);

    csv::write_csv(entries, &files.csv)?;
    println!("✔ CSV出力: {}", files.csv.display());

    json::write_json(entries, &files.json)?;
    println!("✔ JSON出力: {}", files.json.display());

    Ok(files)
}
