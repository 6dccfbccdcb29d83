use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::models::GradeEntry;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    label: String,
    grade: String,
    #[serde(default)]
    weight: Option<String>,
}

/// Read `label,grade[,weight]` rows. Cells are kept as raw text so that the
/// engine, not the loader, decides what is a valid number.
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<GradeEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut entries = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("malformed CSV row {}", line + 1))?;
        let label = row.label.trim();
        entries.push(GradeEntry {
            label: (!label.is_empty()).then(|| label.to_string()),
            raw_grade: row.grade,
            raw_weight: row.weight.filter(|weight| !weight.is_empty()),
        });
    }

    Ok(entries)
}

pub fn import_csv(csv_path: &Path) -> anyhow::Result<Vec<GradeEntry>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let entries = read_csv(file)?;
    tracing::debug!(path = %csv_path.display(), rows = entries.len(), "imported grades");
    Ok(entries)
}

/// Split inline values given as repeated flags and/or separated lists.
///
/// `;` always separates. `,` separates only when no `;` is present, so
/// `"7,5;8"` reads as two pt-BR decimals.
pub fn split_values(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| {
            let separator = if value.contains(';') { ';' } else { ',' };
            value
                .split(separator)
                .map(|part| part.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
