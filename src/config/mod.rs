use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, tmp_path, PathResolver},
    errors::LedgerError,
    ledger::DEFAULT_CATEGORY,
};

/// User preferences stored as `config.json` in the application home.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_category_value")]
    pub default_category: String,
    /// Directory holding the `transactions` and `budgets` records. Defaults to `<home>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "Config::default_color")]
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            default_category: Self::default_category_value(),
            data_dir: None,
            color: Self::default_color(),
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 4] = ["currency_symbol", "default_category", "data_dir", "color"];

    fn default_currency_symbol() -> String {
        "$".into()
    }

    fn default_category_value() -> String {
        DEFAULT_CATEGORY.into()
    }

    fn default_color() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathResolver::data_dir_in(base))
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "default_category" => {
                if value.is_empty() {
                    return Err(LedgerError::Config(
                        "default_category must not be empty".into(),
                    ));
                }
                self.default_category = value.to_string();
            }
            "data_dir" => {
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "color" => {
                self.color = match value.to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(LedgerError::Config(format!(
                            "color expects on/off, got `{other}`"
                        )))
                    }
                };
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{other}` (expected one of {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("default_category", self.default_category.clone()),
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map(|dir| dir.display().to_string())
                    .unwrap_or_else(|| "(default)".into()),
            ),
            ("color", self.color.to_string()),
        ]
    }
}

/// Loads and saves [`Config`] under the application home directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base).map_err(|err| LedgerError::Config(err.to_string()))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data =
                fs::read_to_string(&self.path).map_err(|err| LedgerError::Config(err.to_string()))?;
            serde_json::from_str(&data).map_err(|err| LedgerError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| LedgerError::Config(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json).map_err(|err| LedgerError::Config(err.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|err| LedgerError::Config(err.to_string()))?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_file(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
