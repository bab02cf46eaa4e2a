//! INI file loading.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use ini::Ini;

use super::{ConfigError, TallyConfig};
use crate::badge::NumberFormat;
use crate::index::LogWindow;

impl TallyConfig {
    /// Load configuration from an INI file, starting from the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_ini_str(&content)
    }

    /// Parse configuration from INI text, starting from the defaults.
    pub fn from_ini_str(content: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = TallyConfig::default();
        config.apply_ini(&ini)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_ini(&mut self, ini: &Ini) -> Result<(), ConfigError> {
        // [source]
        if let Some(v) = value(ini, "source", "base_url") {
            self.source.base_url = v.to_string();
        }
        if let Some(v) = value(ini, "source", "mirrors") {
            self.source.mirrors = v
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(v) = value(ini, "source", "timeout_secs") {
            self.source.timeout = Duration::from_secs(parse(v, "source.timeout_secs")?);
        }
        if let Some(v) = value(ini, "source", "parallel") {
            self.source.parallel = parse_bool(v, "source.parallel")?;
        }

        // [package]
        if let Some(v) = value(ini, "package", "id") {
            self.package.id = v.to_string();
        }
        if let Some(v) = value(ini, "package", "window") {
            self.package.window = parse::<LogWindow>(v, "package.window")?;
        }
        if let Some(v) = value(ini, "package", "repo_prefix") {
            self.package.repo_prefix = v.to_string();
        }
        if let Some(v) = value(ini, "package", "api_prefix") {
            self.package.api_prefix = v.to_string();
        }

        // [badge]
        let style = &mut self.badge.style;
        if let Some(v) = value(ini, "badge", "output") {
            self.badge.output = v.into();
        }
        if let Some(v) = value(ini, "badge", "label") {
            style.label = v.to_string();
        }
        if let Some(v) = value(ini, "badge", "color") {
            style.color = v.to_string();
        }
        if let Some(v) = value(ini, "badge", "zero_color") {
            style.zero_color = v.to_string();
        }
        if let Some(v) = value(ini, "badge", "cache_seconds") {
            style.cache_seconds = match v {
                "" | "none" => None,
                _ => Some(parse(v, "badge.cache_seconds")?),
            };
        }
        if let Some(v) = value(ini, "badge", "number_format") {
            style.number_format = parse::<NumberFormat>(v, "badge.number_format")?;
        }
        if let Some(v) = value(ini, "badge", "group_separator") {
            let separator = single_char(v, "badge.group_separator")?;
            match style.number_format {
                NumberFormat::Grouped { .. } => {
                    style.number_format = NumberFormat::Grouped { separator };
                }
                NumberFormat::Compact => {
                    return Err(ConfigError::invalid(
                        "badge.group_separator",
                        v,
                        "only applies when number_format = grouped",
                    ));
                }
            }
        }
        if let Some(v) = value(ini, "badge", "timestamp") {
            style.include_timestamp = parse_bool(v, "badge.timestamp")?;
        }

        Ok(())
    }
}

fn value<'a>(ini: &'a Ini, section: &str, key: &str) -> Option<&'a str> {
    ini.get_from(Some(section), key).map(str::trim)
}

fn parse<T>(v: &str, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    v.parse::<T>()
        .map_err(|e| ConfigError::invalid(key, v, e.to_string()))
}

fn parse_bool(v: &str, key: &str) -> Result<bool, ConfigError> {
    match v.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::invalid(key, v, "expected true or false")),
    }
}

fn single_char(v: &str, key: &str) -> Result<char, ConfigError> {
    let mut chars = v.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::invalid(key, v, "expected a single character")),
    }
}
