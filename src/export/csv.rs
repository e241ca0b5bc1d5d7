//! CSV出力

use crate::error::Result;
use std::path::Path;
use zecode_catalogue_common::CatalogueEntry;

/// 固定18列のヘッダ
pub const CSV_HEADER: [&str; 18] = [
    "sku", "name", "description", "category", "subcategory",
    "gender", "gender_category", "age_group", "color", "pattern", "style",
    "product_image", "model_image_1", "model_image_2", "model_image_3",
    "status", "featured", "created_at",
];

fn model_path(path: &Option<String>) -> &str {
    path.as_deref().unwrap_or("")
}

fn csv_row(entry: &CatalogueEntry) -> [&str; 18] {
    [
        &entry.sku,
        &entry.name,
        &entry.description,
        &entry.category,
        &entry.subcategory,
        &entry.gender,
        &entry.gender_category,
        &entry.age_group,
        &entry.color,
        &entry.pattern,
        &entry.style,
        &entry.images.product,
        model_path(&entry.images.model_1),
        model_path(&entry.images.model_2),
        model_path(&entry.images.model_3),
        &entry.status,
        if entry.featured { "true" } else { "false" },
        &entry.created_at,
    ]
}

pub fn write_csv(entries: &[CatalogueEntry], output_path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(output_path)?;

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        writer.write_record(csv_row(entry))?;
    }
    writer.flush()?;

    Ok(())
}
