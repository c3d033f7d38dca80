//! Where the survey data comes from.
//!
//! The ui crate ships a bundled extract of the survey so both targets show
//! real figures without configuration. Desktop builds can point
//! `SMOKESCOPE_DATA` at a CSV on disk to analyze a different extract; the
//! web build always uses the bundled file.

use super::dataset::{Dataset, LoadError};

/// Survey extract compiled into the binary.
pub const BUNDLED_CSV: &str = include_str!("../../assets/data/youth_survey.csv");

/// Environment variable desktop builds honor for a local CSV override.
#[cfg(not(target_arch = "wasm32"))]
pub const DATA_ENV_VAR: &str = "SMOKESCOPE_DATA";

/// A parsed dataset plus a human-readable origin for the data view.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub dataset: Dataset,
    pub origin: String,
}

/// Resolve and parse the survey source for this platform. Runs once at
/// startup; a failure here is surfaced as a fatal dashboard card, never
/// retried behind the user's back.
pub async fn load() -> Result<LoadedData, LoadError> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = override_path() {
            let text = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| LoadError::Unreachable {
                    path: path.clone(),
                    source,
                })?;
            let dataset = Dataset::from_csv(&text)?;
            #[cfg(debug_assertions)]
            println!("[data] loaded {} rows from {path}", dataset.len());
            return Ok(LoadedData {
                dataset,
                origin: path,
            });
        }
    }

    let dataset = Dataset::from_csv(BUNDLED_CSV)?;
    #[cfg(debug_assertions)]
    println!("[data] loaded {} rows from the bundled extract", dataset.len());
    Ok(LoadedData {
        dataset,
        origin: "bundled survey extract".to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn override_path() -> Option<String> {
    std::env::var(DATA_ENV_VAR)
        .ok()
        .map(|path| path.trim().to_string())
        .filter(|path| !path.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_extract_parses() {
        let dataset = Dataset::from_csv(BUNDLED_CSV).unwrap();
        assert!(dataset.len() >= 100);
        assert!(dataset.years().len() >= 3);
        assert_eq!(dataset.skipped_rows(), 0);
    }
}
