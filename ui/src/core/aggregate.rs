//! Stateless grouping and averaging over survey records.
//!
//! Every function here is a pure fold over a record slice: no caching, no
//! incremental state. Means ignore `NaN` readings; a bucket with rows but no
//! usable readings keeps its place with a `NaN` mean so charts can show the
//! gap instead of a fake zero. Buckets with no rows at all simply do not
//! appear in the output.

use std::collections::HashMap;

use super::dataset::{age_rank, Metric, Record};
use super::filters::{GenderFilter, YearFilter};

/// Mean readings for one age bucket. `means` is parallel to the metric slice
/// the caller passed in.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeGroupMeans {
    pub age_group: String,
    pub means: Vec<f64>,
}

/// Mean readings for one survey year, same layout as [`AgeGroupMeans`].
#[derive(Debug, Clone, PartialEq)]
pub struct YearMeans {
    pub year: i32,
    pub means: Vec<f64>,
}

/// One (age bucket, gender) cell of a heatmap grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    pub age_group: String,
    pub gender: String,
    pub mean: f64,
}

/// Narrow a record set to one gender. `All` reproduces the input unchanged,
/// order included.
pub fn filter_by_gender(records: &[Record], filter: &GenderFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|record| filter.matches(&record.gender))
        .cloned()
        .collect()
}

/// Narrow a record set to one survey year. `All` reproduces the input.
pub fn filter_by_year(records: &[Record], filter: &YearFilter) -> Vec<Record> {
    records
        .iter()
        .filter(|record| filter.matches(record.year))
        .cloned()
        .collect()
}

/// Average the given metrics per age bucket. Output order is canonical age
/// order; labels outside the canonical list sort after it alphabetically.
pub fn mean_by_age_group(records: &[Record], metrics: &[Metric]) -> Vec<AgeGroupMeans> {
    let mut buckets: HashMap<&str, Accumulator> = HashMap::new();
    for record in records {
        buckets
            .entry(record.age_group.as_str())
            .or_insert_with(|| Accumulator::new(metrics.len()))
            .add(record, metrics);
    }

    let mut rows: Vec<AgeGroupMeans> = buckets
        .into_iter()
        .map(|(age_group, acc)| AgeGroupMeans {
            age_group: age_group.to_string(),
            means: acc.means(),
        })
        .collect();
    rows.sort_by(|a, b| {
        let left = (age_rank(&a.age_group).unwrap_or(usize::MAX), a.age_group.as_str());
        let right = (age_rank(&b.age_group).unwrap_or(usize::MAX), b.age_group.as_str());
        left.cmp(&right)
    });
    rows
}

/// Average the given metrics per survey year, ascending.
pub fn mean_by_year(records: &[Record], metrics: &[Metric]) -> Vec<YearMeans> {
    let mut buckets: HashMap<i32, Accumulator> = HashMap::new();
    for record in records {
        buckets
            .entry(record.year)
            .or_insert_with(|| Accumulator::new(metrics.len()))
            .add(record, metrics);
    }

    let mut rows: Vec<YearMeans> = buckets
        .into_iter()
        .map(|(year, acc)| YearMeans {
            year,
            means: acc.means(),
        })
        .collect();
    rows.sort_unstable_by_key(|row| row.year);
    rows
}

/// Average one metric per (age bucket, gender) combination. Only
/// combinations present in the input produce a cell.
pub fn mean_by_age_and_gender(records: &[Record], metric: Metric) -> Vec<HeatmapCell> {
    let mut cells: HashMap<(&str, &str), Accumulator> = HashMap::new();
    for record in records {
        cells
            .entry((record.age_group.as_str(), record.gender.as_str()))
            .or_insert_with(|| Accumulator::new(1))
            .add(record, &[metric]);
    }

    let mut rows: Vec<HeatmapCell> = cells
        .into_iter()
        .map(|((age_group, gender), acc)| HeatmapCell {
            age_group: age_group.to_string(),
            gender: gender.to_string(),
            mean: acc.means()[0],
        })
        .collect();
    rows.sort_by(|a, b| {
        let left = (
            age_rank(&a.age_group).unwrap_or(usize::MAX),
            a.age_group.as_str(),
            a.gender.as_str(),
        );
        let right = (
            age_rank(&b.age_group).unwrap_or(usize::MAX),
            b.age_group.as_str(),
            b.gender.as_str(),
        );
        left.cmp(&right)
    });
    rows
}

/// Running sums and counts per requested metric, `NaN` readings excluded.
struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl Accumulator {
    fn new(width: usize) -> Self {
        Self {
            sums: vec![0.0; width],
            counts: vec![0; width],
        }
    }

    fn add(&mut self, record: &Record, metrics: &[Metric]) {
        for (index, metric) in metrics.iter().enumerate() {
            let value = metric.value(record);
            if !value.is_nan() {
                self.sums[index] += value;
                self.counts[index] += 1;
            }
        }
    }

    fn means(&self) -> Vec<f64> {
        self.sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, count)| {
                if *count == 0 {
                    f64::NAN
                } else {
                    sum / *count as f64
                }
            })
            .collect()
    }
}
