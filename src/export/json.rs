//! JSON出力

use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use zecode_catalogue_common::CatalogueEntry;

pub fn write_json(entries: &[CatalogueEntry], output_path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, entries)?;
    writer.flush()?;
    Ok(())
}

/// 書き出したカタログを読み戻す
pub fn read_json(input_path: &Path) -> Result<Vec<CatalogueEntry>> {
    let content = std::fs::read_to_string(input_path)?;
    Ok(serde_json::from_str(&content)?)
}
