//! Shared types for profile intake: the extracted connection descriptor,
//! the validation outcome, and the raw directive-scan accumulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Port used when neither `remote` nor `port` supplies one.
pub const DEFAULT_PORT: &str = "1194";

/// Protocol used when neither `remote` nor `proto` supplies one.
pub const DEFAULT_PROTOCOL: &str = "UDP";

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Protocol / transport
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Transport protocol for the VPN tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Transport {
    Udp,
    Tcp,
}

impl Default for Transport {
    fn default() -> Self {
        Self::Udp
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp => write!(f, "UDP"),
            Self::Tcp => write!(f, "TCP"),
        }
    }
}

impl Transport {
    /// Map a normalized protocol string. Only the exact uppercase forms match.
    pub fn from_normalized(s: &str) -> Option<Self> {
        match s {
            "UDP" => Some(Self::Udp),
            "TCP" => Some(Self::Tcp),
            _ => None,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Connection descriptor
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The `{host, port, protocol}` triple extracted from a usable profile.
///
/// Values are kept as the text the profile supplied (after protocol
/// upper-casing); the registry stores them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    pub host: String,
    pub port: String,
    pub protocol: String,
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_PORT.to_string(),
            protocol: DEFAULT_PROTOCOL.to_string(),
        }
    }
}

impl ConnectionDescriptor {
    pub fn transport(&self) -> Option<Transport> {
        Transport::from_normalized(&self.protocol)
    }

    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }
}

impl fmt::Display for ConnectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.host, self.port, self.protocol)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Validation outcome
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Outcome of checking a profile.
///
/// `Failure` always carries at least one message, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationResult {
    Success { descriptor: ConnectionDescriptor },
    Failure { errors: Vec<String> },
}

impl ValidationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Error messages; empty on success.
    pub fn errors(&self) -> &[String] {
        match self {
            Self::Success { .. } => &[],
            Self::Failure { errors } => errors,
        }
    }

    pub fn descriptor(&self) -> Option<&ConnectionDescriptor> {
        match self {
            Self::Success { descriptor } => Some(descriptor),
            Self::Failure { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<ConnectionDescriptor, Vec<String>> {
        match self {
            Self::Success { descriptor } => Ok(descriptor),
            Self::Failure { errors } => Err(errors),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Directive scan accumulator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// State accumulated over one top-to-bottom pass of a profile.
///
/// `has_client` and `has_proto` are recorded but no check consults them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveScan {
    pub has_client: bool,
    pub has_dev: bool,
    pub has_remote: bool,
    pub has_proto: bool,
    pub has_ca: bool,
    pub host: String,
    pub port: String,
    pub protocol: String,
}

impl Default for DirectiveScan {
    fn default() -> Self {
        let d = ConnectionDescriptor::default();
        Self {
            has_client: false,
            has_dev: false,
            has_remote: false,
            has_proto: false,
            has_ca: false,
            host: d.host,
            port: d.port,
            protocol: d.protocol,
        }
    }
}

impl DirectiveScan {
    pub fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor {
            host: self.host.clone(),
            port: self.port.clone(),
            protocol: self.protocol.clone(),
        }
    }
}
