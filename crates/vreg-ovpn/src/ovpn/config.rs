//! `.ovpn` directive scan and required-directive validation.
//!
//! Only the directives needed to locate the server (`remote`, `port`,
//! `proto`) and to confirm the profile is usable (`dev`, `ca`, inline
//! `<ca>` block) are interpreted. Everything else is skipped.

use crate::ovpn::error::ConfigIssue;
use crate::ovpn::types::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Directive scan (.ovpn → DirectiveScan)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse and validate a profile in one call.
pub fn parse(content: &str) -> ValidationResult {
    check(scan_directives(content))
}

/// Fold every directive line of `content` into a [`DirectiveScan`].
///
/// Later lines overwrite earlier values, except that only the first
/// `remote` line contributes host, port, and protocol.
pub fn scan_directives(content: &str) -> DirectiveScan {
    let mut scan = DirectiveScan {
        has_ca: has_inline_ca(content),
        ..DirectiveScan::default()
    };

    for line in content.split(['\n', '\r']) {
        let raw = trim_line(line);
        // Skip comments and blank lines
        if raw.is_empty() || raw.starts_with('#') || raw.starts_with(';') {
            continue;
        }

        let mut tokens = raw.split_whitespace();
        let directive = match tokens.next() {
            Some(d) => d.to_lowercase(),
            None => continue,
        };
        let args: Vec<&str> = tokens.collect();

        match directive.as_str() {
            "client" => scan.has_client = true,
            "dev" => scan.has_dev = true,
            "remote" => {
                if !scan.has_remote {
                    if let Some(host) = args.first() {
                        scan.host = host.to_string();
                    }
                    if let Some(port) = args.get(1) {
                        scan.port = port.to_string();
                    }
                    if let Some(proto) = args.get(2) {
                        scan.protocol = proto.to_uppercase();
                    }
                }
                scan.has_remote = true;
            }
            "proto" => {
                scan.has_proto = true;
                if let Some(proto) = args.first() {
                    scan.protocol = normalize_proto(proto);
                }
            }
            "port" => {
                if let Some(port) = args.first() {
                    scan.port = port.to_string();
                }
            }
            "ca" => scan.has_ca = true,
            _ => {}
        }
    }

    scan
}

/// True when the raw text holds both `<ca>` and `</ca>` anywhere,
/// comments and arguments included.
fn has_inline_ca(content: &str) -> bool {
    content.contains("<ca>") && content.contains("</ca>")
}

/// Trim surrounding whitespace and a byte-order mark.
fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Upper-case a `proto` argument and fold the IPv6 variants onto their
/// base transport. The fold is a substring replace over the whole token.
fn normalize_proto(value: &str) -> String {
    value
        .to_uppercase()
        .replace("UDP6", "UDP")
        .replace("TCP6", "TCP")
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Required-directive issues for a scan, in check order.
pub fn issues(scan: &DirectiveScan) -> Vec<ConfigIssue> {
    ConfigIssue::ALL
        .into_iter()
        .filter(|issue| match issue {
            ConfigIssue::MissingRemote => !scan.has_remote,
            ConfigIssue::MissingCa => !scan.has_ca,
            ConfigIssue::MissingDev => !scan.has_dev,
        })
        .collect()
}

/// Run every check against a finished scan. All checks run; failures
/// accumulate.
pub fn check(scan: DirectiveScan) -> ValidationResult {
    let errors: Vec<String> = issues(&scan).iter().map(|i| i.to_string()).collect();

    if errors.is_empty() {
        ValidationResult::Success {
            descriptor: ConnectionDescriptor {
                host: scan.host,
                port: scan.port,
                protocol: scan.protocol,
            },
        }
    } else {
        ValidationResult::Failure { errors }
    }
}
