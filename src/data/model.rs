use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Feature – one named numeric column of the fixed schema
// ---------------------------------------------------------------------------

/// The 13 physicochemical measurements, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    Alcohol,
    MalicAcid,
    Ash,
    AlcalinityOfAsh,
    Magnesium,
    TotalPhenols,
    Flavanoids,
    NonflavanoidPhenols,
    Proanthocyanins,
    ColorIntensity,
    Hue,
    Od280Od315,
    Proline,
}

impl Feature {
    pub const COUNT: usize = 13;

    /// All features in column order.
    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Alcohol,
        Feature::MalicAcid,
        Feature::Ash,
        Feature::AlcalinityOfAsh,
        Feature::Magnesium,
        Feature::TotalPhenols,
        Feature::Flavanoids,
        Feature::NonflavanoidPhenols,
        Feature::Proanthocyanins,
        Feature::ColorIntensity,
        Feature::Hue,
        Feature::Od280Od315,
        Feature::Proline,
    ];

    /// Position of the feature inside [`Record::values`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name as it appears in the CSV header.
    pub fn column_name(self) -> &'static str {
        match self {
            Feature::Alcohol => "alcohol",
            Feature::MalicAcid => "malic_acid",
            Feature::Ash => "ash",
            Feature::AlcalinityOfAsh => "alcalinity_of_ash",
            Feature::Magnesium => "magnesium",
            Feature::TotalPhenols => "total_phenols",
            Feature::Flavanoids => "flavanoids",
            Feature::NonflavanoidPhenols => "nonflavanoid_phenols",
            Feature::Proanthocyanins => "proanthocyanins",
            Feature::ColorIntensity => "color_intensity",
            Feature::Hue => "hue",
            Feature::Od280Od315 => "od280/od315_of_diluted_wines",
            Feature::Proline => "proline",
        }
    }

    /// Human readable label for axes and widgets.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Alcohol => "Alcohol (%)",
            Feature::MalicAcid => "Malic Acid",
            Feature::Ash => "Ash",
            Feature::AlcalinityOfAsh => "Alcalinity of Ash",
            Feature::Magnesium => "Magnesium",
            Feature::TotalPhenols => "Total Phenols",
            Feature::Flavanoids => "Flavanoids",
            Feature::NonflavanoidPhenols => "Nonflavanoid Phenols",
            Feature::Proanthocyanins => "Proanthocyanins",
            Feature::ColorIntensity => "Color Intensity",
            Feature::Hue => "Hue",
            Feature::Od280Od315 => "OD280/OD315",
            Feature::Proline => "Proline",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// ClassLabel – the categorical target
// ---------------------------------------------------------------------------

/// Integer class label (cultivar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassLabel(pub u32);

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class_{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the dataset
// ---------------------------------------------------------------------------

/// A single wine sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Feature values indexed by [`Feature::index`].
    pub values: [f64; Feature::COUNT],
    pub class: ClassLabel,
}

impl Record {
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }
}

// ---------------------------------------------------------------------------
// FeatureBounds – observed min / max of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureBounds {
    pub min: f64,
    pub max: f64,
}

impl FeatureBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete, immutable table
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("dataset contains no records")]
    Empty,
    #[error("row {row}: {feature} is not a finite number ({value})")]
    NonFinite {
        row: usize,
        feature: Feature,
        value: f64,
    },
}

/// The loaded dataset with per-column statistics computed once.
///
/// Records are private so the table cannot change after validation.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    classes: BTreeSet<ClassLabel>,
    bounds: [FeatureBounds; Feature::COUNT],
}

impl Dataset {
    /// Validate the records and build the class set and column bounds.
    pub fn from_records(records: Vec<Record>) -> Result<Self, SchemaError> {
        if records.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut classes = BTreeSet::new();
        let first = &records[0];
        let mut bounds = first.values.map(|v| FeatureBounds { min: v, max: v });

        for (row, rec) in records.iter().enumerate() {
            classes.insert(rec.class);
            for feature in Feature::ALL {
                let value = rec.get(feature);
                if !value.is_finite() {
                    return Err(SchemaError::NonFinite {
                        row,
                        feature,
                        value,
                    });
                }
                let b = &mut bounds[feature.index()];
                b.min = b.min.min(value);
                b.max = b.max.max(value);
            }
        }

        Ok(Dataset {
            records,
            classes,
            bounds,
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> &Record {
        &self.records[index]
    }

    /// Sorted distinct class labels.
    pub fn classes(&self) -> &BTreeSet<ClassLabel> {
        &self.classes
    }

    /// Observed min / max of a feature.
    pub fn bounds(&self, feature: Feature) -> FeatureBounds {
        self.bounds[feature.index()]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
