//! nmcli - Wi-Fi scan/connect and profile cleanup via NetworkManager's CLI
//!
//! Every failure is reported as `false` or an empty list; nothing here
//! returns an error to the screens.

use std::process::{Command, Stdio};

use super::{Network, NetworkManager};

/// NetworkManager command-line backend
#[derive(Debug, Clone)]
pub struct Nmcli {
    program: String,
}

impl Default for Nmcli {
    fn default() -> Self {
        Self::new()
    }
}

impl Nmcli {
    pub fn new() -> Self {
        Nmcli {
            program: "nmcli".to_string(),
        }
    }

    /// Run nmcli and return stdout on a zero exit status
    fn run(&self, args: &[&str]) -> Option<String> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
            Ok(out) => {
                log::warn!(
                    "{} {} exited with {}: {}",
                    self.program,
                    args.first().copied().unwrap_or_default(),
                    out.status,
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                None
            }
            Err(e) => {
                log::warn!("failed to run {}: {}", self.program, e);
                None
            }
        }
    }
}

impl NetworkManager for Nmcli {
    fn scan(&mut self) -> Vec<Network> {
        let networks = self
            .run(&[
                "-t", "-f", "SSID,SECURITY,SIGNAL", "dev", "wifi", "list", "--rescan", "yes",
            ])
            .map(|out| parse_wifi_list(&out))
            .unwrap_or_default();
        log::info!("wifi scan found {} networks", networks.len());
        networks
    }

    fn connect(&mut self, ssid: &str, password: Option<&str>) -> bool {
        let mut args = vec!["device", "wifi", "connect", ssid];
        match password {
            Some(pw) if !pw.is_empty() => {
                args.push("password");
                args.push(pw);
            }
            _ => {}
        }
        let ok = self.run(&args).is_some();
        log::info!("connect to {:?}: {}", ssid, if ok { "ok" } else { "failed" });
        ok
    }

    fn list_profiles(&mut self) -> Vec<String> {
        self.run(&["-t", "connection", "show"])
            .map(|out| parse_profile_names(&out))
            .unwrap_or_default()
    }

    fn delete_profile(&mut self, name: &str) -> bool {
        self.run(&["connection", "delete", name]).is_some()
    }
}

/// Split one line of `nmcli -t` output on unescaped colons
pub fn split_terse(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parse `nmcli -t -f SSID,SECURITY,SIGNAL dev wifi list`
pub fn parse_wifi_list(output: &str) -> Vec<Network> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut fields = split_terse(line).into_iter();
            let ssid = fields.next().unwrap_or_default();
            let security = fields.next().unwrap_or_default();
            let signal = fields.next().unwrap_or_default();

            if ssid.trim().is_empty() {
                return None;
            }
            Some(Network {
                ssid,
                security,
                signal: signal.trim().parse().unwrap_or(0),
            })
        })
        .collect()
}

/// Parse `nmcli -t connection show` into profile names
pub fn parse_profile_names(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| split_terse(line).into_iter().next())
        .filter(|name| !name.is_empty())
        .collect()
}
