//! INI parsing: `Ini` → `ConfigFile`.
//!
//! The single place where INI key names are mapped to struct fields.

use std::path::PathBuf;

use ini::Ini;

use super::defaults::{MAX_SOURCE_TIMEOUT_SECS, VALID_LOG_LEVELS};
use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found. Unknown
/// sections and keys are ignored.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [source] section
    if let Some(section) = ini.section(Some("source")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid("source", "url", v, "must be an http:// or https:// URL"));
            }
            config.source.url = v.to_string();
        }
        if let Some(v) = section.get("timeout") {
            let timeout: u64 = v
                .trim()
                .parse()
                .map_err(|_| invalid("source", "timeout", v, "must be a whole number of seconds"))?;
            if timeout == 0 || timeout > MAX_SOURCE_TIMEOUT_SECS {
                return Err(invalid(
                    "source",
                    "timeout",
                    v,
                    &format!("must be between 1 and {}", MAX_SOURCE_TIMEOUT_SECS),
                ));
            }
            config.source.timeout = timeout;
        }
        if let Some(v) = section.get("user_agent") {
            let v = v.trim();
            if !v.is_empty() {
                config.source.user_agent = v.to_string();
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if v.is_empty() || v.contains(['/', '\\']) {
                return Err(invalid("logging", "file", v, "must be a plain file name"));
            }
            config.logging.file = v.to_string();
        }
        if let Some(v) = section.get("level") {
            let v = v.trim().to_lowercase();
            if !VALID_LOG_LEVELS.contains(&v.as_str()) {
                return Err(invalid(
                    "logging",
                    "level",
                    &v,
                    "must be one of: trace, debug, info, warn, error",
                ));
            }
            config.logging.level = v;
        }
    }

    // [display] section
    if let Some(section) = ini.section(Some("display")) {
        if let Some(v) = section.get("handheld") {
            config.display.handheld = parse_bool(v)
                .ok_or_else(|| invalid("display", "handheld", v, "must be true or false"))?;
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_source_section() {
        let config = parse(
            "[source]\nurl = https://example.com/pos.json\ntimeout = 5\nuser_agent = test/1.0\n",
        )
        .unwrap();
        assert_eq!(config.source.url, "https://example.com/pos.json");
        assert_eq!(config.source.timeout, 5);
        assert_eq!(config.source.user_agent, "test/1.0");
    }

    #[test]
    fn test_empty_user_agent_keeps_default() {
        let config = parse("[source]\nuser_agent =\n").unwrap();
        assert_eq!(config.source.user_agent, default_user_agent());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let err = parse("[source]\nurl = ftp://example.com\n").unwrap_err();
        assert!(matches!(err, ConfigFileError::InvalidValue { ref key, .. } if key == "url"));
    }

    #[test]
    fn test_rejects_out_of_range_timeout() {
        assert!(parse("[source]\ntimeout = 0\n").is_err());
        assert!(parse("[source]\ntimeout = 301\n").is_err());
        assert!(parse("[source]\ntimeout = 300\n").is_ok());
    }

    #[test]
    fn test_logging_section() {
        let config = parse("[logging]\ndirectory = /tmp/iss\nfile = run.log\nlevel = DEBUG\n").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/tmp/iss"));
        assert_eq!(config.logging.file, "run.log");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_path(), PathBuf::from("/tmp/iss/run.log"));
    }

    #[test]
    fn test_rejects_unknown_level() {
        let err = parse("[logging]\nlevel = loud\n").unwrap_err();
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn test_rejects_log_file_with_path() {
        assert!(parse("[logging]\nfile = ../escape.log\n").is_err());
    }

    #[test]
    fn test_display_handheld() {
        assert!(parse("[display]\nhandheld = yes\n").unwrap().display.handheld);
        assert!(!parse("[display]\nhandheld = false\n").unwrap().display.handheld);
        assert!(parse("[display]\nhandheld = maybe\n").is_err());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse("[source]\nrefresh = 5\n[extra]\nfoo = bar\n").unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/logs");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("logs"));
        }
        assert_eq!(expand_tilde("/var/log"), PathBuf::from("/var/log"));
    }
}
