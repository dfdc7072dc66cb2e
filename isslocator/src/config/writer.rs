//! INI serialization: `ConfigFile` → commented INI string.

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to the commented INI text written to `config.ini`.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[source]
; Endpoint returning JSON with "latitude" and "longitude"
url = {}
; Per-request timeout in seconds (1-300)
timeout = {}
; User-Agent header sent with every request
user_agent = {}

[logging]
; Directory for the log file (~ is expanded)
directory = {}
; Log file name, cleared at every start
file = {}
; Default level when RUST_LOG is not set: trace, debug, info, warn, error
level = {}

[display]
; Treat the terminal as a handheld device: a window taller than it is wide
; pauses tracking until it is resized back to landscape
handheld = {}
"#,
        config.source.url,
        config.source.timeout,
        config.source.user_agent,
        config.logging.directory.to_string_lossy(),
        config.logging.file,
        config.logging.level,
        config.display.handheld,
    )
}
