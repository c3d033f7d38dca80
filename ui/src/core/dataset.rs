//! Survey dataset model and CSV ingest.
//!
//! The dashboard works from a single immutable table of youth smoking and
//! drug-use survey readings. Loading normalizes it once:
//!
//! - `Year`, `Age_Group`, and `Gender` are required; rows missing any of
//!   them are skipped and counted in the load summary.
//! - Metric fields that are absent or fail to parse become `NaN` and are
//!   excluded from means downstream, so dirty readings never bias an
//!   average toward zero.
//! - Extra columns in the source file are ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical age-group ordering. Every grouped view presents buckets in this
/// order regardless of row order in the source file.
pub const AGE_ORDER: [&str; 10] = [
    "10-14", "15-19", "20-24", "25-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80+",
];

/// Position of a bucket within [`AGE_ORDER`], `None` for labels the survey
/// does not define.
pub fn age_rank(age_group: &str) -> Option<usize> {
    AGE_ORDER.iter().position(|bucket| *bucket == age_group)
}

/// The numeric survey measures charts can plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    SmokingPrevalence,
    DrugExperimentation,
    PeerInfluence,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::SmokingPrevalence,
        Metric::DrugExperimentation,
        Metric::PeerInfluence,
    ];

    /// Column name in the survey CSV, doubling as the stable identifier in
    /// selector controls and exports.
    pub fn key(self) -> &'static str {
        match self {
            Metric::SmokingPrevalence => "Smoking_Prevalence",
            Metric::DrugExperimentation => "Drug_Experimentation",
            Metric::PeerInfluence => "Peer_Influence",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::SmokingPrevalence => "Smoking prevalence",
            Metric::DrugExperimentation => "Drug experimentation",
            Metric::PeerInfluence => "Peer influence",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Metric::SmokingPrevalence => record.smoking_prevalence,
            Metric::DrugExperimentation => record.drug_experimentation,
            Metric::PeerInfluence => record.peer_influence,
        }
    }

    pub fn from_key(raw: &str) -> Option<Self> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.key() == raw.trim())
    }
}

/// One survey reading: a (year, age group, gender) cell with percentage
/// measures. Metric fields hold `NaN` when the source value was unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub age_group: String,
    pub gender: String,
    pub smoking_prevalence: f64,
    pub drug_experimentation: f64,
    pub peer_influence: f64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset unreachable at {path}: {source}")]
    Unreachable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset contained no usable rows")]
    Empty,
    #[error("malformed csv at row {row}: {reason}")]
    Malformed { row: u64, reason: String },
}

/// Immutable store of survey records. Built once at startup; everything else
/// borrows from it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    skipped_rows: usize,
}

impl Dataset {
    /// Parse a CSV export of the survey. Requires a header row naming at
    /// least `Year`, `Age_Group`, and `Gender`; metric columns may be absent
    /// (their readings load as `NaN`).
    pub fn from_csv(text: &str) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .map_err(|err| map_csv_error(err, 1))?
            .clone();
        let column = |name: &str| headers.iter().position(|header| header.trim() == name);

        let year_col = require_column(&column("Year"), "Year")?;
        let age_col = require_column(&column("Age_Group"), "Age_Group")?;
        let gender_col = require_column(&column("Gender"), "Gender")?;
        let smoking_col = column(Metric::SmokingPrevalence.key());
        let drug_col = column(Metric::DrugExperimentation.key());
        let peer_col = column(Metric::PeerInfluence.key());

        let mut records = Vec::new();
        let mut skipped_rows = 0usize;

        for (index, row) in reader.records().enumerate() {
            // Header is row 1, so the first data record is row 2.
            let row = row.map_err(|err| map_csv_error(err, index as u64 + 2))?;

            let age_group = row.get(age_col).map(str::trim).unwrap_or("");
            let gender = row.get(gender_col).map(str::trim).unwrap_or("");
            let year = row
                .get(year_col)
                .and_then(|value| value.trim().parse::<i32>().ok());

            let (age_group, gender, year) = match (age_group, gender, year) {
                ("", _, _) | (_, "", _) | (_, _, None) => {
                    skipped_rows += 1;
                    continue;
                }
                (age, gen, Some(year)) => (age, gen, year),
            };

            records.push(Record {
                year,
                age_group: age_group.to_string(),
                gender: gender.to_string(),
                smoking_prevalence: parse_reading(&row, smoking_col),
                drug_experimentation: parse_reading(&row, drug_col),
                peer_influence: parse_reading(&row, peer_col),
            });
        }

        if records.is_empty() {
            return Err(LoadError::Empty);
        }

        if skipped_rows > 0 {
            eprintln!("[data] skipped {skipped_rows} rows missing year, age group, or gender");
        }

        Ok(Self {
            records,
            skipped_rows,
        })
    }

    /// Wrap records that were produced in memory, e.g. the demo generator.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            skipped_rows: 0,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows the loader dropped for missing identity fields.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Distinct survey years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|record| record.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct gender labels, sorted.
    pub fn genders(&self) -> Vec<String> {
        let mut genders: Vec<String> = self
            .records
            .iter()
            .map(|record| record.gender.clone())
            .collect();
        genders.sort();
        genders.dedup();
        genders
    }
}

fn require_column(position: &Option<usize>, name: &str) -> Result<usize, LoadError> {
    position.ok_or_else(|| LoadError::Malformed {
        row: 1,
        reason: format!("missing required column {name}"),
    })
}

fn parse_reading(row: &csv::StringRecord, column: Option<usize>) -> f64 {
    column
        .and_then(|index| row.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

fn map_csv_error(err: csv::Error, fallback_row: u64) -> LoadError {
    let reason = err.to_string();
    let row = err
        .position()
        .map(|position| position.record() + 1)
        .unwrap_or(fallback_row);
    LoadError::Malformed { row, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence,Region
2023,10-14,Male,12.5,8.0,40.2,North
2023,15-19,Female,22.1,15.3,55.0,South
2024,15-19,Male,20.9,14.8,52.7,East
";

    #[test]
    fn parses_rows_and_ignores_extra_columns() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 3);

        let first = &dataset.records()[0];
        assert_eq!(first.year, 2023);
        assert_eq!(first.age_group, "10-14");
        assert_eq!(first.gender, "Male");
        assert_eq!(first.smoking_prevalence, 12.5);
        assert_eq!(first.peer_influence, 40.2);
    }

    #[test]
    fn unparseable_readings_become_nan_but_keep_the_row() {
        let csv = "\
Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence
2023,10-14,Male,not-a-number,,9.5
";
        let dataset = Dataset::from_csv(csv).unwrap();
        assert_eq!(dataset.len(), 1);

        let record = &dataset.records()[0];
        assert!(record.smoking_prevalence.is_nan());
        assert!(record.drug_experimentation.is_nan());
        assert_eq!(record.peer_influence, 9.5);
    }

    #[test]
    fn rows_without_identity_fields_are_skipped_and_counted() {
        let csv = "\
Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence
2023,10-14,Male,12.5,8.0,40.2
2023,,Male,10.0,7.0,30.0
2023,15-19,,11.0,6.0,31.0
oops,15-19,Female,11.0,6.0,31.0
";
        let dataset = Dataset::from_csv(csv).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.skipped_rows(), 3);
    }

    #[test]
    fn missing_metric_column_loads_as_nan() {
        let csv = "\
Year,Age_Group,Gender,Smoking_Prevalence
2023,10-14,Male,12.5
";
        let dataset = Dataset::from_csv(csv).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.smoking_prevalence, 12.5);
        assert!(record.drug_experimentation.is_nan());
        assert!(record.peer_influence.is_nan());
    }

    #[test]
    fn header_only_input_is_empty() {
        let csv = "Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence\n";
        assert!(matches!(Dataset::from_csv(csv), Err(LoadError::Empty)));
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let csv = "Year,Gender,Smoking_Prevalence\n2023,Male,12.5\n";
        match Dataset::from_csv(csv) {
            Err(LoadError::Malformed { row, reason }) => {
                assert_eq!(row, 1);
                assert!(reason.contains("Age_Group"));
            }
            other => panic!("expected malformed header, got {other:?}"),
        }
    }

    #[test]
    fn quoted_fields_with_commas_parse() {
        let csv = "\
Year,Age_Group,Gender,Smoking_Prevalence,Drug_Experimentation,Peer_Influence
2023,\"15-19\",\"Non, binary\",10.0,5.0,20.0
";
        let dataset = Dataset::from_csv(csv).unwrap();
        assert_eq!(dataset.records()[0].gender, "Non, binary");
    }

    #[test]
    fn years_and_genders_enumerate_sorted_and_distinct() {
        let dataset = Dataset::from_csv(SAMPLE).unwrap();
        assert_eq!(dataset.years(), vec![2023, 2024]);
        assert_eq!(dataset.genders(), vec!["Female", "Male"]);
    }

    #[test]
    fn age_rank_follows_canonical_order() {
        assert_eq!(age_rank("10-14"), Some(0));
        assert_eq!(age_rank("80+"), Some(9));
        assert_eq!(age_rank("unknown"), None);
    }
}
