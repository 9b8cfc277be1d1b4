//! SSH client configuration rendering

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::ClientSettings;

/// Legacy algorithms appended to OpenSSH's defaults.
///
/// Only names every current OpenSSH build still recognizes; an unknown one
/// makes `ssh` reject the whole file.
const HOST_KEY_ALGORITHMS: &str = "+ssh-rsa";
const PUBKEY_ACCEPTED_KEY_TYPES: &str = "+ssh-rsa";
const KEX_ALGORITHMS: &str = "+diffie-hellman-group14-sha1,diffie-hellman-group1-sha1";
const CIPHERS: &str = "+aes128-cbc,aes192-cbc,aes256-cbc";
const MACS: &str = "+hmac-sha1";

/// Client configuration for unattended logins.
///
/// Host keys are never checked or remembered and only the materialized key
/// is offered. That is the right trade for throwaway automation hosts and
/// the wrong one anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// `Host` pattern the block applies to
    pub host: String,
    /// Private key to authenticate with
    pub identity_file: PathBuf,
    pub connect_timeout: u32,
    pub server_alive_interval: u32,
    pub tcp_keepalive: bool,
}

impl ClientConfig {
    /// Config for all hosts using `identity_file`
    pub fn new(identity_file: &Path, settings: &ClientSettings) -> Self {
        Self {
            host: "*".to_string(),
            identity_file: identity_file.to_path_buf(),
            connect_timeout: settings.connect_timeout,
            server_alive_interval: settings.server_alive_interval,
            tcp_keepalive: settings.tcp_keepalive,
        }
    }

    /// Render as `ssh_config(5)` text
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn options(&self) -> Vec<(&'static str, String)> {
        vec![
            ("StrictHostKeyChecking", "no".to_string()),
            ("UserKnownHostsFile", "/dev/null".to_string()),
            ("IdentityFile", quote_path(&self.identity_file)),
            ("IdentitiesOnly", "yes".to_string()),
            ("PubkeyAuthentication", "yes".to_string()),
            ("PasswordAuthentication", "no".to_string()),
            ("ChallengeResponseAuthentication", "no".to_string()),
            ("BatchMode", "yes".to_string()),
            ("ConnectTimeout", self.connect_timeout.to_string()),
            ("ServerAliveInterval", self.server_alive_interval.to_string()),
            ("TCPKeepAlive", yes_no(self.tcp_keepalive).to_string()),
            ("LogLevel", "ERROR".to_string()),
            ("HostKeyAlgorithms", HOST_KEY_ALGORITHMS.to_string()),
            ("PubkeyAcceptedKeyTypes", PUBKEY_ACCEPTED_KEY_TYPES.to_string()),
            ("KexAlgorithms", KEX_ALGORITHMS.to_string()),
            ("Ciphers", CIPHERS.to_string()),
            ("MACs", MACS.to_string()),
        ]
    }
}

impl fmt::Display for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Generated by sshkey-normalize; rewritten on every run")?;
        writeln!(f, "Host {}", self.host)?;
        for (key, value) in self.options() {
            writeln!(f, "    {} {}", key, value)?;
        }
        Ok(())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn quote_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.chars().any(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn option_value<'a>(rendered: &'a str, key: &str) -> Option<&'a str> {
        rendered
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(key)?.strip_prefix(' '))
    }

    #[test]
    fn test_default_render() {
        let config = ClientConfig::new(Path::new("/home/ci/.ssh/id_rsa"), &ClientSettings::default());
        let rendered = config.render();

        assert!(rendered.starts_with("# Generated"));
        assert!(rendered.contains("\nHost *\n"));
        assert_eq!(option_value(&rendered, "StrictHostKeyChecking"), Some("no"));
        assert_eq!(option_value(&rendered, "UserKnownHostsFile"), Some("/dev/null"));
        assert_eq!(option_value(&rendered, "IdentityFile"), Some("/home/ci/.ssh/id_rsa"));
        assert_eq!(option_value(&rendered, "PasswordAuthentication"), Some("no"));
        assert_eq!(option_value(&rendered, "PubkeyAuthentication"), Some("yes"));
        assert_eq!(option_value(&rendered, "ConnectTimeout"), Some("10"));
        assert_eq!(option_value(&rendered, "ServerAliveInterval"), Some("60"));
        assert_eq!(option_value(&rendered, "TCPKeepAlive"), Some("yes"));
        assert_eq!(option_value(&rendered, "Ciphers"), Some(CIPHERS));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_settings_flow_through() {
        let settings = ClientSettings {
            connect_timeout: 5,
            server_alive_interval: 15,
            tcp_keepalive: false,
        };
        let rendered = ClientConfig::new(Path::new("/k"), &settings).render();
        assert_eq!(option_value(&rendered, "ConnectTimeout"), Some("5"));
        assert_eq!(option_value(&rendered, "ServerAliveInterval"), Some("15"));
        assert_eq!(option_value(&rendered, "TCPKeepAlive"), Some("no"));
    }

    #[test]
    fn test_identity_file_with_spaces_is_quoted() {
        let config = ClientConfig::new(
            Path::new("/Users/Build Agent/.ssh/id_rsa"),
            &ClientSettings::default(),
        );
        assert_eq!(
            option_value(&config.render(), "IdentityFile"),
            Some("\"/Users/Build Agent/.ssh/id_rsa\"")
        );
    }

    #[test]
    fn test_options_are_indented_under_host() {
        let rendered = ClientConfig::new(Path::new("/k"), &ClientSettings::default()).render();
        let body: Vec<&str> = rendered.lines().skip(2).collect();
        assert!(!body.is_empty());
        assert!(body.iter().all(|line| line.starts_with("    ")));
    }
}
