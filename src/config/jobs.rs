//! Job table for the work command, optionally loaded from config.toml.
//!
//! Each job shifts the configured base payout range by a bonus. A built-in
//! table is used when no config file is present, so the bot runs with zero
//! setup; a `[[jobs]]` section in `config.toml` replaces it wholesale.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// A single job the work command can draw.
#[derive(Debug, Deserialize, Clone)]
pub struct JobProfile {
    /// Display name of the job
    pub name: String,
    /// Added to the configured minimum payout
    pub bonus_min: i64,
    /// Added to the configured maximum payout
    pub bonus_max: i64,
}

impl JobProfile {
    /// Resolves the inclusive payout range for this job against the
    /// configured base range. The lower bound never drops below 1.
    #[must_use]
    pub fn payout_range(&self, base_min: i64, base_max: i64) -> (i64, i64) {
        let min = (base_min + self.bonus_min).max(1);
        let max = (base_max + self.bonus_max).max(min);
        (min, max)
    }
}

/// Structure of the `config.toml` file.
#[derive(Debug, Deserialize)]
struct JobsFile {
    jobs: Vec<JobProfile>,
}

/// The built-in job table used when no config file overrides it.
#[must_use]
pub fn default_jobs() -> Vec<JobProfile> {
    let table = [
        ("developer", 20, 30),
        ("waiter", 0, 0),
        ("courier", 5, 10),
        ("salesperson", 10, 15),
        ("cleaner", -5, 0),
    ];

    table
        .into_iter()
        .map(|(name, bonus_min, bonus_max)| JobProfile {
            name: name.to_string(),
            bonus_min,
            bonus_max,
        })
        .collect()
}

/// Loads the job table from a TOML file.
pub fn load_jobs<P: AsRef<Path>>(path: P) -> Result<Vec<JobProfile>> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read job config file: {e}"),
    })?;

    let parsed: JobsFile = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse job config: {e}"),
    })?;

    if parsed.jobs.is_empty() {
        return Err(Error::Config {
            message: "Job config must define at least one job".to_string(),
        });
    }

    Ok(parsed.jobs)
}

/// Loads `./config.toml` when present, otherwise the built-in table.
pub fn load_jobs_or_default() -> Result<Vec<JobProfile>> {
    let path = Path::new("config.toml");
    if path.exists() {
        let jobs = load_jobs(path)?;
        info!("Loaded {} jobs from config.toml", jobs.len());
        Ok(jobs)
    } else {
        Ok(default_jobs())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_jobs_table() {
        let toml_str = r#"
            [[jobs]]
            name = "developer"
            bonus_min = 20
            bonus_max = 30

            [[jobs]]
            name = "cleaner"
            bonus_min = -5
            bonus_max = 0
        "#;

        let parsed: JobsFile = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.jobs.len(), 2);
        assert_eq!(parsed.jobs[0].name, "developer");
        assert_eq!(parsed.jobs[0].bonus_min, 20);
        assert_eq!(parsed.jobs[1].bonus_min, -5);
    }

    #[test]
    fn test_default_jobs_nonempty() {
        assert!(!default_jobs().is_empty());
    }

    #[test]
    fn test_payout_range_applies_bonus() {
        let job = JobProfile {
            name: "developer".to_string(),
            bonus_min: 20,
            bonus_max: 30,
        };
        assert_eq!(job.payout_range(10, 50), (30, 80));
    }

    #[test]
    fn test_payout_range_floors_at_one() {
        let job = JobProfile {
            name: "cleaner".to_string(),
            bonus_min: -20,
            bonus_max: -20,
        };
        // Base 10..50 shifted down would go non-positive; floor to 1
        assert_eq!(job.payout_range(10, 20), (1, 1));
    }
}
