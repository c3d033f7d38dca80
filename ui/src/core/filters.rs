//! Dashboard filter state.
//!
//! One source of truth for the three global filters (gender, metric pair,
//! year). Chart renderers never own filter state; they receive a snapshot of
//! it per render cycle.

use serde::{Deserialize, Serialize};

use super::dataset::Metric;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GenderFilter {
    #[default]
    All,
    Only(String),
}

impl GenderFilter {
    pub fn matches(&self, gender: &str) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(selected) => selected == gender,
        }
    }

    /// Selector value round-trip; `"All"` is reserved.
    pub fn from_value(raw: &str) -> Self {
        if raw == "All" {
            GenderFilter::All
        } else {
            GenderFilter::Only(raw.to_string())
        }
    }

    pub fn value(&self) -> String {
        match self {
            GenderFilter::All => "All".to_string(),
            GenderFilter::Only(selected) => selected.clone(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            GenderFilter::All => "All genders".to_string(),
            GenderFilter::Only(selected) => selected.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum YearFilter {
    #[default]
    All,
    Only(i32),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Only(selected) => *selected == year,
        }
    }

    pub fn from_value(raw: &str) -> Self {
        match raw.trim().parse::<i32>() {
            Ok(year) => YearFilter::Only(year),
            Err(_) => YearFilter::All,
        }
    }

    pub fn value(&self) -> String {
        match self {
            YearFilter::All => "All".to_string(),
            YearFilter::Only(year) => year.to_string(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            YearFilter::All => "All years".to_string(),
            YearFilter::Only(year) => year.to_string(),
        }
    }
}

/// Ordered pair of distinct metrics driving the bar chart and scatter plot.
/// The first metric is the scatter x axis, the second its y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPair {
    pub first: Metric,
    pub second: Metric,
}

impl MetricPair {
    pub const DEFAULT: MetricPair = MetricPair {
        first: Metric::SmokingPrevalence,
        second: Metric::DrugExperimentation,
    };

    /// Build a pair from raw selector keys. Anything other than exactly two
    /// distinct known metrics falls back to [`MetricPair::DEFAULT`].
    pub fn from_keys(keys: &[&str]) -> Self {
        if let [first, second] = keys {
            match (Metric::from_key(first), Metric::from_key(second)) {
                (Some(first), Some(second)) if first != second => {
                    return MetricPair { first, second };
                }
                _ => {}
            }
        }

        #[cfg(debug_assertions)]
        println!("[filters] invalid metric selection {keys:?}; using default pair");

        Self::DEFAULT
    }

    pub fn metrics(&self) -> [Metric; 2] {
        [self.first, self.second]
    }
}

impl Default for MetricPair {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Snapshot of every global filter. Cloned wholesale into each render cycle
/// so all charts in the cycle observe the same selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub gender: GenderFilter,
    pub metrics: MetricPair,
    pub year: YearFilter,
}

/// Filter mutations emitted by the dashboard controls. The dashboard drains
/// every pending event before recomputing, so a burst of selector changes
/// costs a single render cycle.
#[derive(Debug, Clone)]
pub enum FilterEvent {
    SetGender(GenderFilter),
    SetMetricKeys { first: String, second: String },
    SetYear(YearFilter),
}

impl FilterState {
    pub fn apply(&mut self, event: FilterEvent) {
        match event {
            FilterEvent::SetGender(gender) => self.gender = gender,
            FilterEvent::SetMetricKeys { first, second } => {
                self.metrics = MetricPair::from_keys(&[&first, &second]);
            }
            FilterEvent::SetYear(year) => self.year = year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_selects_everything() {
        let state = FilterState::default();
        assert_eq!(state.gender, GenderFilter::All);
        assert_eq!(state.year, YearFilter::All);
        assert_eq!(state.metrics, MetricPair::DEFAULT);
    }

    #[test]
    fn metric_pair_accepts_two_distinct_keys() {
        let pair = MetricPair::from_keys(&["Peer_Influence", "Smoking_Prevalence"]);
        assert_eq!(pair.first, Metric::PeerInfluence);
        assert_eq!(pair.second, Metric::SmokingPrevalence);
    }

    #[test]
    fn metric_pair_falls_back_on_bad_selections() {
        assert_eq!(MetricPair::from_keys(&[]), MetricPair::DEFAULT);
        assert_eq!(
            MetricPair::from_keys(&["Smoking_Prevalence"]),
            MetricPair::DEFAULT
        );
        assert_eq!(
            MetricPair::from_keys(&["Smoking_Prevalence", "Smoking_Prevalence"]),
            MetricPair::DEFAULT
        );
        assert_eq!(
            MetricPair::from_keys(&["Smoking_Prevalence", "Not_A_Metric"]),
            MetricPair::DEFAULT
        );
        assert_eq!(
            MetricPair::from_keys(&["Smoking_Prevalence", "Drug_Experimentation", "Peer_Influence"]),
            MetricPair::DEFAULT
        );
    }

    #[test]
    fn gender_filter_matches_only_its_selection() {
        assert!(GenderFilter::All.matches("Female"));
        assert!(GenderFilter::Only("Male".to_string()).matches("Male"));
        assert!(!GenderFilter::Only("Male".to_string()).matches("Female"));
    }

    #[test]
    fn selector_values_round_trip() {
        assert_eq!(GenderFilter::from_value("All"), GenderFilter::All);
        assert_eq!(
            GenderFilter::from_value("Female"),
            GenderFilter::Only("Female".to_string())
        );
        assert_eq!(YearFilter::from_value("All"), YearFilter::All);
        assert_eq!(YearFilter::from_value("2024"), YearFilter::Only(2024));
    }

    #[test]
    fn apply_folds_events_in_order() {
        let mut state = FilterState::default();
        state.apply(FilterEvent::SetGender(GenderFilter::Only("Female".into())));
        state.apply(FilterEvent::SetYear(YearFilter::Only(2022)));
        state.apply(FilterEvent::SetMetricKeys {
            first: "Drug_Experimentation".to_string(),
            second: "Peer_Influence".to_string(),
        });

        assert_eq!(state.gender, GenderFilter::Only("Female".to_string()));
        assert_eq!(state.year, YearFilter::Only(2022));
        assert_eq!(state.metrics.first, Metric::DrugExperimentation);
        assert_eq!(state.metrics.second, Metric::PeerInfluence);
    }
}
