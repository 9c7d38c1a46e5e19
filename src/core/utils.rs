use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DEFAULT_DIR_NAME: &str = ".pocket_ledger";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";
pub const HOME_ENV: &str = "POCKET_LEDGER_HOME";

/// Resolves the on-disk layout rooted at the application home directory.
pub struct PathResolver;

impl PathResolver {
    /// `$POCKET_LEDGER_HOME` when set, otherwise `~/.pocket_ledger`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn data_dir_in(base: &Path) -> PathBuf {
        base.join(DATA_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Staging path used before an atomic rename, e.g. `budgets.json.tmp`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
