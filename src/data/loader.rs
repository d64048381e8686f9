use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use super::model::{ClassLabel, Dataset, Feature, Record};

/// The wine recognition dataset (178 samples, 3 cultivars), compiled in.
const WINE_CSV: &str = include_str!("../../data/wine.csv");

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the built-in wine dataset.
///
/// The data is part of the binary, so a failure here means the embedded
/// table is corrupt and the application cannot start.
pub fn load_wine() -> Result<Dataset> {
    load_csv(WINE_CSV.as_bytes()).context("parsing embedded wine dataset")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// One CSV row. Header names follow the column names of [`Feature`] plus
/// a `target` column holding the class label.
#[derive(Debug, Deserialize)]
struct WineRow {
    alcohol: f64,
    malic_acid: f64,
    ash: f64,
    alcalinity_of_ash: f64,
    magnesium: f64,
    total_phenols: f64,
    flavanoids: f64,
    nonflavanoid_phenols: f64,
    proanthocyanins: f64,
    color_intensity: f64,
    hue: f64,
    #[serde(rename = "od280/od315_of_diluted_wines")]
    od280_od315: f64,
    proline: f64,
    target: u32,
}

impl From<WineRow> for Record {
    fn from(row: WineRow) -> Self {
        // Same order as Feature::ALL
        Record {
            values: [
                row.alcohol,
                row.malic_acid,
                row.ash,
                row.alcalinity_of_ash,
                row.magnesium,
                row.total_phenols,
                row.flavanoids,
                row.nonflavanoid_phenols,
                row.proanthocyanins,
                row.color_intensity,
                row.hue,
                row.od280_od315,
                row.proline,
            ],
            class: ClassLabel(row.target),
        }
    }
}

/// Parse a wine CSV (header row + one record per line) and validate it.
pub fn load_csv<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for feature in Feature::ALL {
        if !headers.iter().any(|h| h == feature.column_name()) {
            bail!("CSV missing '{}' column", feature.column_name());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<WineRow>().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(Record::from(row));
    }

    let dataset = Dataset::from_records(records).context("validating dataset schema")?;
    log::debug!(
        "Parsed {} records, classes {:?}",
        dataset.len(),
        dataset.classes()
    );
    Ok(dataset)
}
