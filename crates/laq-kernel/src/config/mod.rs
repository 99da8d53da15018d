//! Configuration loading
//!
//! Reads settings files in any of the formats supported by the `config`
//! crate (YAML, TOML, JSON, INI, RON, JSON5), picking the format from the
//! file extension. File contents go through `${VAR}` / `$VAR` environment
//! substitution before parsing, and [`load_with_env`] layers prefixed
//! environment variables (`PREFIX_SECTION__KEY`) on top.

use config::{Config as Cfg, Environment, File, FileFormat};
use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::LazyLock;

pub use config::FileFormat as Format;

static BRACED_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("braced env var pattern is valid")
});

static BARE_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)\b").expect("bare env var pattern is valid")
});

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Parse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Detect configuration format from file extension.
///
/// `.yaml`/`.yml`, `.toml`, `.json`, `.ini`, `.ron` and `.json5` are recognised.
pub fn detect_format(path: impl AsRef<Path>) -> ConfigResult<FileFormat> {
    let ext = path
        .as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConfigError::UnsupportedFormat("No file extension found".to_string()))?;

    match ext.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "toml" => Ok(FileFormat::Toml),
        "json" => Ok(FileFormat::Json),
        "ini" => Ok(FileFormat::Ini),
        "ron" => Ok(FileFormat::Ron),
        "json5" => Ok(FileFormat::Json5),
        _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
    }
}

/// Replace `${VAR}` and `$VAR` references with environment values.
///
/// Unset variables are left untouched so the parser reports them in context.
pub fn substitute_env_vars(content: &str) -> String {
    let braced = BRACED_VAR.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });

    BARE_VAR
        .replace_all(&braced, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

fn read_source(path: &Path) -> ConfigResult<(String, FileFormat)> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    Ok((substitute_env_vars(&content), format))
}

fn deserialize<T: DeserializeOwned>(built: Result<Cfg, config::ConfigError>) -> ConfigResult<T> {
    built
        .map_err(|e| ConfigError::Parse(e.to_string()))?
        .try_deserialize()
        .map_err(|e| ConfigError::Serialization(e.to_string()))
}

/// Load configuration from a single file.
pub fn load_config<T>(path: impl AsRef<Path>) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let (content, format) = read_source(path.as_ref())?;
    deserialize(Cfg::builder().add_source(File::from_str(&content, format)).build())
}

/// Parse configuration from a string with an explicit format.
pub fn from_str<T>(content: &str, format: FileFormat) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    deserialize(
        Cfg::builder()
            .add_source(File::from_str(&substitute_env_vars(content), format))
            .build(),
    )
}

/// Merge several in-memory sources; later sources override earlier ones.
pub fn merge_configs<T>(sources: &[(&str, FileFormat)]) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let builder = sources.iter().fold(Cfg::builder(), |builder, (content, format)| {
        builder.add_source(File::from_str(&substitute_env_vars(content), *format))
    });
    deserialize(builder.build())
}

/// Load an optional file, then apply `PREFIX_SECTION__KEY` environment overrides.
///
/// With no file, settings come from the environment alone and every missing
/// key falls back to the target type's serde defaults.
pub fn load_with_env<T>(path: Option<&Path>, env_prefix: &str) -> ConfigResult<T>
where
    T: DeserializeOwned,
{
    let mut builder = Cfg::builder();
    if let Some(path) = path {
        let (content, format) = read_source(path)?;
        builder = builder.add_source(File::from_str(&content, format));
    }
    builder = builder.add_source(
        Environment::with_prefix(env_prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    deserialize(builder.build())
}
