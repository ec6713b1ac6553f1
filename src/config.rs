//! Environment-backed settings.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the working directory. CLI flags override them.

use std::path::PathBuf;

const OUTPUT_DIR_VAR: &str = "NUPRIOR_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "./results";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory that receives rendered figures.
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let output_dir = lookup(OUTPUT_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        Self { output_dir }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_results_dir() {
        let s = Settings::from_lookup(|_| None);
        assert_eq!(s.output_dir, PathBuf::from("./results"));
    }

    #[test]
    fn reads_output_dir_and_ignores_blank() {
        let s = Settings::from_lookup(|k| (k == OUTPUT_DIR_VAR).then(|| "/tmp/figs".to_string()));
        assert_eq!(s.output_dir, PathBuf::from("/tmp/figs"));

        let blank = Settings::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(blank.output_dir, PathBuf::from("./results"));
    }
}
