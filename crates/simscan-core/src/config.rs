use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// Directory that holds exported plaintext copies. Everything in here is
    /// transient and removed by `cleanup`.
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    /// Minimum word-run length counted by the word analyzer.
    #[serde(default = "default_min_run_words")]
    pub min_run_words: usize,
    /// Minimum common-substring length counted by the char analyzer.
    #[serde(default = "default_min_substring_chars")]
    pub min_substring_chars: usize,
}

fn default_db_path() -> String {
    "simscan.db".to_string()
}

fn default_scratch_dir() -> String {
    "./scratch".to_string()
}

fn default_reports_dir() -> String {
    "./reports".to_string()
}

fn default_min_run_words() -> usize {
    2
}

fn default_min_substring_chars() -> usize {
    20
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            db_path: default_db_path(),
            scratch_dir: default_scratch_dir(),
            reports_dir: default_reports_dir(),
            min_run_words: default_min_run_words(),
            min_substring_chars: default_min_substring_chars(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.db_path, "simscan.db");
        assert_eq!(cfg.min_run_words, 2);
        assert_eq!(cfg.min_substring_chars, 20);
    }
}
