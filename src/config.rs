//! Default flags read from config files.
//!
//! A config file holds one flag per line, exactly as it would be typed on the
//! command line (`--theme light`, `--code-theme=InspiredGitHub`). Blank lines
//! and lines starting with `#` are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::highlight::Background;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    /// Resolve to a concrete background, probing the environment for `Auto`.
    pub fn background(self) -> Background {
        match self {
            Self::Auto => Background::detect(),
            Self::Light => Background::Light,
            Self::Dark => Background::Dark,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub theme: Option<ThemeMode>,
    pub code_theme: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            theme: other.theme.or(self.theme),
            code_theme: other
                .code_theme
                .clone()
                .or_else(|| self.code_theme.clone()),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("topdeck").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("topdeck")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("topdeck").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("topdeck")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".topdeckrc")
}

/// Read flags from a config file; a missing file yields no flags.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    // Split off the flag only, so values such as "Solarized (dark)" keep their spaces.
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| {
            line.splitn(2, char::is_whitespace)
                .map(str::trim)
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Pick the flags this module knows about out of a token list.
///
/// Unknown tokens are skipped, so raw `std::env::args()` can be passed as is.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let takes_value = matches!(name, "--theme" | "--code-theme" | "--log-file");
        let value = if !takes_value {
            None
        } else if inline_value.is_some() {
            inline_value
        } else {
            i += 1;
            tokens.get(i).map(String::as_str)
        };

        match (name, value) {
            ("--theme", Some(value)) => flags.theme = parse_theme(value),
            ("--code-theme", Some(value)) if !value.is_empty() => {
                flags.code_theme = Some(value.to_string());
            }
            ("--log-file", Some(value)) if !value.is_empty() => {
                flags.log_file = Some(PathBuf::from(value));
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}
