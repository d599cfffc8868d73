use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::filters::NotificationFilters;
use crate::domain::paging::DEFAULT_PER_PAGE;
use crate::utils;

const CONFIG: &str = include_str!("../.config/config.json5");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

/// One configured column: a feed bound to a filter rule set.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct ColumnConfig {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub filters: NotificationFilters,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Stands in for the external auth state; private-repo items are hidden
    /// without it.
    #[serde(default)]
    pub has_private_access: bool,
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config = json5::from_str(CONFIG)
            .map_err(|e| config::ConfigError::Message(format!("invalid embedded config: {e}")))?;
        let data_dir = utils::get_data_dir();
        let config_dir = utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_str().unwrap_or_default())?
            .set_default("_config_dir", config_dir.to_str().unwrap_or_default())?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.json", config::FileFormat::Json),
            ("config.yaml", config::FileFormat::Yaml),
            ("config.toml", config::FileFormat::Toml),
            ("config.ini", config::FileFormat::Ini),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(
                config::File::from(config_dir.join(file))
                    .format(*format)
                    .required(false),
            );
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::warn!("No configuration file found, using built-in defaults");
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        if cfg.per_page == 0 {
            cfg.per_page = default_config.per_page;
        }
        // Columns from the user's file win; the built-in set is the fallback
        if cfg.columns.is_empty() {
            cfg.columns = default_config.columns.clone();
        }
        for column in &mut cfg.columns {
            if column.title.is_empty() {
                column.title = column.id.clone();
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::notification::Reason;

    #[test]
    fn test_embedded_default_config_parses() {
        let config: Config = json5::from_str(CONFIG).unwrap();

        assert_eq!(config.per_page, 10);
        assert!(!config.columns.is_empty());
        assert!(config.columns.iter().any(|c| c.id == "inbox"));
    }

    #[test]
    fn test_embedded_filters_deserialize() {
        let config: Config = json5::from_str(CONFIG).unwrap();

        let mentions = config
            .columns
            .iter()
            .find(|c| c.id == "mentions")
            .expect("mentions column in default config");
        assert!(mentions.filters.reasons.contains(&Reason::Mention));
    }

    #[test]
    fn test_column_config_defaults() {
        let column: ColumnConfig = json5::from_str(r#"{ id: "inbox" }"#).unwrap();

        assert_eq!(column.id, "inbox");
        assert_eq!(column.title, "");
        assert_eq!(column.filters, NotificationFilters::default());
    }
}
