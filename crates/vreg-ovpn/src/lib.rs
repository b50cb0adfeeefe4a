//! # vreg-ovpn
//!
//! Intake checks for OpenVPN client profiles uploaded when an operator
//! registers a VPN endpoint.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | **types** | Connection descriptor, validation result, directive scan |
//! | **config** | `.ovpn` directive scan and required-directive validation |
//! | **error** | Validation issues and intake rejection errors |
//! | **settings** | Caller-side intake limits |
//! | **service** | Upload intake: size/encoding checks, registry record |

pub mod ovpn;
