//! Server configuration: a versioned JSON file plus environment overrides.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const ENV_CONFIG: &str = "PORTAGE_CONFIG";
pub const ENV_BIND: &str = "PORTAGE_BIND";
pub const ENV_DATA_FILE: &str = "PORTAGE_DATA_FILE";

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_DATA_FILE: &str = "db.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub bind_addr: String,
    pub data_file: PathBuf,
    #[serde(default = "default_true")]
    pub allow_any_origin: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind_addr: DEFAULT_BIND.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            allow_any_origin: true,
        }
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("portage"))
}

/// `$PORTAGE_CONFIG` if set, otherwise `server.json` in the platform config
/// directory.
pub fn config_path() -> eyre::Result<PathBuf> {
    match std::env::var_os(ENV_CONFIG) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(config_dir()?.join("server.json")),
    }
}

/// Load the config file, then apply environment overrides. A missing file is
/// created with the defaults.
pub fn load() -> eyre::Result<ServerConfig> {
    let path = config_path()?;
    let mut config = if path.exists() {
        load_from(&path)?
    } else {
        let config = ServerConfig::default();
        if let Err(e) = save_to(&path, &config) {
            tracing::warn!(path = %path.display(), error = %e, "could not write default config");
        }
        config
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub fn load_from(path: &Path) -> eyre::Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ServerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        ));
    }

    // v0 -> v1: `port` and `db_file` became `bind_addr` and `data_file`.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let port = obj.remove("port").and_then(|v| v.as_u64()).unwrap_or(3000);
        obj.entry("bind_addr")
            .or_insert_with(|| serde_json::Value::String(format!("0.0.0.0:{port}")));
        let data_file = obj
            .remove("db_file")
            .unwrap_or_else(|| serde_json::Value::String(DEFAULT_DATA_FILE.to_string()));
        obj.entry("data_file").or_insert(data_file);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 -> v1 (port/db_file -> bind_addr/data_file)");
    }

    Ok(json)
}

/// Apply `PORTAGE_BIND` and `PORTAGE_DATA_FILE`. `lookup` abstracts the
/// environment.
pub fn apply_overrides(config: &mut ServerConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(bind) = lookup(ENV_BIND).filter(|v| !v.trim().is_empty()) {
        config.bind_addr = bind;
    }
    if let Some(file) = lookup(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
        config.data_file = PathBuf::from(file);
    }
}

pub fn save_to(path: &Path, config: &ServerConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
