use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value as JsonValue};

use super::filter::FilteredView;
use super::model::{Feature, Record};

/// Output formats offered by the export menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write the visible records to `path` in the given format.
pub fn export_file(view: &FilteredView<'_>, path: &Path, format: ExportFormat) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    let written = match format {
        ExportFormat::Csv => write_csv(view, writer),
        ExportFormat::Json => write_json(view, writer),
    };
    written.with_context(|| format!("writing {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// Same layout as the embedded dataset: feature columns then `target`.
pub fn write_csv<W: Write>(view: &FilteredView<'_>, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = Feature::ALL.iter().map(|f| f.column_name()).collect();
    header.push("target");
    writer.write_record(&header).context("writing CSV header")?;

    for rec in view.records() {
        let mut row: Vec<String> = rec.values.iter().map(|v| v.to_string()).collect();
        row.push(rec.class.0.to_string());
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Records-oriented array: `[{ "alcohol": 14.23, ..., "target": 0 }, ...]`.
pub fn write_json<W: Write>(view: &FilteredView<'_>, mut writer: W) -> Result<()> {
    let rows: Vec<JsonValue> = view.records().map(record_to_json).collect::<Result<_>>()?;
    serde_json::to_writer_pretty(&mut writer, &rows).context("serialising JSON")?;
    writer.flush().context("flushing JSON writer")?;
    Ok(())
}

fn record_to_json(rec: &Record) -> Result<JsonValue> {
    let mut obj = Map::new();
    for feature in Feature::ALL {
        let value = rec.get(feature);
        let Some(number) = serde_json::Number::from_f64(value) else {
            bail!("{feature} = {value} cannot be represented in JSON");
        };
        obj.insert(feature.column_name().to_string(), JsonValue::Number(number));
    }
    obj.insert("target".to_string(), JsonValue::from(rec.class.0));
    Ok(JsonValue::Object(obj))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterSpec, filtered_indices};
    use crate::data::loader::{load_csv, load_wine};
    use crate::data::model::ClassLabel;

    #[test]
    fn test_csv_export_reloads_as_same_records() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new([ClassLabel(2)]).with_range(Feature::Alcohol, 13.0, 14.0);
        let idx = filtered_indices(&ds, &spec);
        let view = FilteredView::new(&ds, &idx);

        let mut buf = Vec::new();
        write_csv(&view, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), idx.len() + 1);
        assert!(text.starts_with("alcohol,malic_acid,ash,"));

        let reloaded = load_csv(text.as_bytes()).unwrap();
        let original: Vec<_> = view.records().cloned().collect();
        assert_eq!(reloaded.records(), original.as_slice());
    }

    #[test]
    fn test_json_export_has_one_object_per_record() {
        let ds = load_wine().unwrap();
        let idx = vec![0, 5, 100];
        let view = FilteredView::new(&ds, &idx);

        let mut buf = Vec::new();
        write_json(&view, &mut buf).unwrap();

        let parsed: JsonValue = serde_json::from_slice(&buf).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["alcohol"].as_f64(), Some(14.23));
        assert_eq!(rows[0]["target"].as_u64(), Some(0));
        assert_eq!(
            rows[0]["od280/od315_of_diluted_wines"].as_f64(),
            Some(3.92)
        );
    }

    #[test]
    fn test_empty_view_exports_header_only() {
        let ds = load_wine().unwrap();
        let idx: Vec<usize> = Vec::new();
        let view = FilteredView::new(&ds, &idx);

        let mut buf = Vec::new();
        write_csv(&view, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);

        let mut buf = Vec::new();
        write_json(&view, &mut buf).unwrap();
        let parsed: JsonValue = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(0));
    }
}
