use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use pocatalog::WriteOptions;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "pocatalog.toml";

/// Settings read from `pocatalog.toml`. Every field is optional; command-line
/// arguments take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Wrap width for entry bodies.
    pub line_width: Option<usize>,
    /// Refuse to replace existing files.
    pub without_overwriting: bool,
    pub extract: ExtractConfig,
    pub translate: TranslateConfig,
}

/// Default inputs of `pocatalog extract`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    pub apple_root: Option<PathBuf>,
    pub android_root: Option<PathBuf>,
    pub windows_root: Option<PathBuf>,
    pub template: Option<PathBuf>,
}

/// Default converter of `pocatalog translate`, program first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslateConfig {
    pub converter: Vec<String>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Makes relative extraction paths relative to `base`, the directory of
    /// the configuration file.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let extract = &mut self.extract;
        for path in [
            &mut extract.apple_root,
            &mut extract.android_root,
            &mut extract.windows_root,
            &mut extract.template,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Combines the file settings with the command-line overrides.
    pub fn write_options(&self, no_overwrite: bool, line_width: Option<usize>) -> WriteOptions {
        let mut options = WriteOptions::new()
            .with_without_overwriting(no_overwrite || self.without_overwriting);
        if let Some(width) = line_width.or(self.line_width) {
            options = options.with_line_width(width);
        }
        options
    }
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the configuration came from; `None` means defaults.
    pub path: Option<PathBuf>,
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let path = start_dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Loads `explicit` if given (it must exist), otherwise `pocatalog.toml` in
/// `start_dir` if present, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ConfigLoadResult> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(start_dir),
    };
    let Some(path) = path else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = Config::from_toml(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(ConfigLoadResult {
        config: config.relative_to(base),
        path: Some(path),
    })
}
