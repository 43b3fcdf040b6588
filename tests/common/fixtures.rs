//! Form and store fixtures.

/// A complete form submission, all values as the browser posts them
pub const VALID_FORM_JSON: &str = r#"{
  "unbound_reload_command": "service unbound reload",
  "blocklist_repo_url": "https://example.org/blocklist",
  "blocklist_local_path": "/usr/local/opnsense/scripts/smt/social_media_domains.txt",
  "usage_threshold_hours": "2",
  "block_duration_minutes": "45",
  "unbound_log_file": "/var/log/resolver/latest.log",
  "rpz_file": "/var/unbound/rpz/smt.rpz",
  "logging_level": "DEBUG",
  "logging_file": "/var/log/smt/smt.log",
  "enable_service": "on"
}"#;

/// `VALID_FORM_JSON` with a zero duration
pub const ZERO_DURATION_FORM_JSON: &str = r#"{
  "unbound_reload_command": "service unbound reload",
  "blocklist_repo_url": "https://example.org/blocklist",
  "blocklist_local_path": "/usr/local/opnsense/scripts/smt/social_media_domains.txt",
  "usage_threshold_hours": "2",
  "block_duration_minutes": "0",
  "unbound_log_file": "/var/log/resolver/latest.log",
  "rpz_file": "/var/unbound/rpz/smt.rpz",
  "logging_level": "DEBUG",
  "logging_file": "/var/log/smt/smt.log"
}"#;

/// Stored settings with the service enabled and a three hour threshold
pub const STORED_SETTINGS_TOML: &str = r#"[opnsense]
unbound_reload_command = "service unbound reload"
enable_service = true

[blocklist]
repo_url = "https://github.com/smt-plugin/blocklist"
local_path = "/usr/local/opnsense/scripts/smt/social_media_domains.txt"

[social_media]
usage_threshold_hours = 3
block_duration_minutes = 60

[logging]
level = "WARNING"
file = "/var/log/smt/smt.log"

[unbound]
log_file = "/var/log/resolver/latest.log"
rpz_file = "/var/unbound/rpz/smt.rpz"
"#;
