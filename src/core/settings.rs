//! Settings module
//!
//! User-configurable settings, read from a `key=value` rc file.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::time::Duration;

/// Network profiles that survive startup/shutdown cleanup
pub const DEFAULT_KEEP_PROFILES: [&str; 2] = ["preconfigured", "lo"];

/// Main settings structure
#[derive(Debug, Clone)]
pub struct Settings {
    pub filename: Option<PathBuf>,

    // Storage
    pub contacts_file: PathBuf,

    // Login gate
    pub passcode: String,
    pub login_attempts: u32,
    pub passcode_length: usize,

    // Display geometry (in list rows / text columns of the LCD)
    pub visible_items: usize,
    pub screen_columns: usize,

    // Timing, in milliseconds
    pub poll_interval_ms: u64,
    pub cursor_blink_ms: u64,
    pub notice_ms: u64,
    pub brief_notice_ms: u64,

    // Network
    pub keep_profiles: Vec<String>,

    // Logging
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with defaults and the default config location
    pub fn new() -> Self {
        Settings {
            filename: Self::default_config_path(),
            contacts_file: PathBuf::from("Contacts.json"),
            passcode: "123456".to_string(),
            login_attempts: 3,
            passcode_length: 6,
            visible_items: 4,
            screen_columns: 20,
            poll_interval_ms: 50,
            cursor_blink_ms: 500,
            notice_ms: 1500,
            brief_notice_ms: 1000,
            keep_profiles: DEFAULT_KEEP_PROFILES.iter().map(|s| s.to_string()).collect(),
            log_file: None,
        }
    }

    /// Get the default config file path
    fn default_config_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("frontpanel").join("frontpanelrc"))
        } else {
            dirs::home_dir().map(|home| {
                home.join(".config")
                    .join("frontpanel")
                    .join("frontpanelrc")
            })
        }
    }

    /// Load settings from the config file
    pub fn load(&mut self) -> anyhow::Result<()> {
        let path = match &self.filename {
            Some(p) => p.clone(),
            None => return Ok(()),
        };

        if !path.exists() {
            return Ok(());
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                self.parse_setting(key.trim(), value.trim());
            }
        }

        Ok(())
    }

    /// Parse a single setting line
    fn parse_setting(&mut self, key: &str, value: &str) {
        match key {
            "contacts_file" => {
                if !value.is_empty() {
                    self.contacts_file = PathBuf::from(value);
                }
            }
            "passcode" => {
                if !value.is_empty() {
                    self.passcode = value.to_string();
                }
            }
            "login_attempts" => {
                if let Ok(v) = value.parse::<u32>() {
                    self.login_attempts = v.max(1);
                }
            }
            "passcode_length" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.passcode_length = v.clamp(1, 16);
                }
            }
            "visible_items" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.visible_items = v.max(1);
                }
            }
            "screen_columns" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.screen_columns = v.max(8);
                }
            }
            "poll_interval_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.poll_interval_ms = v.clamp(10, 1000);
                }
            }
            "cursor_blink_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.cursor_blink_ms = v.max(50);
                }
            }
            "notice_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.notice_ms = v;
                }
            }
            "brief_notice_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.brief_notice_ms = v;
                }
            }
            "keep_profiles" => {
                self.keep_profiles = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "log_file" => {
                self.log_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => {}
        }
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }

    pub fn brief_notice_duration(&self) -> Duration {
        Duration::from_millis(self.brief_notice_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn cursor_blink(&self) -> Duration {
        Duration::from_millis(self.cursor_blink_ms)
    }

    /// Where log output goes when `log_file` is unset
    pub fn log_file_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.log_file {
            return Some(path.clone());
        }
        dirs::state_dir().map(|dir| dir.join("frontpanel").join("frontpanel.log"))
    }
}

// Stub for dirs crate functionality
mod dirs {
    use std::path::PathBuf;

    pub fn config_dir() -> Option<PathBuf> {
        std::env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|h| h.join(".config")))
    }

    pub fn state_dir() -> Option<PathBuf> {
        std::env::var("XDG_STATE_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| home_dir().map(|h| h.join(".local").join("state")))
    }

    pub fn home_dir() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
