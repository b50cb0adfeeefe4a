//! Profile intake service.
//!
//! Sits between an upload handler and the parser: enforces the upload
//! limit, decodes the bytes, runs validation, and on success builds the
//! record the registry stores. Persisting the record and the original
//! file is the caller's job.

use crate::ovpn::config::{check, scan_directives};
use crate::ovpn::error::{IntakeError, IntakeResult};
use crate::ovpn::settings::IntakeSettings;
use crate::ovpn::types::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Registry entry for an accepted profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    pub id: String,
    pub host: String,
    pub port: String,
    pub protocol: String,
    /// Storage reference of the original upload, used when the record is
    /// deleted to remove the stored file.
    pub source_file: Option<String>,
    /// SHA-256 of the raw upload, lowercase hex.
    pub fingerprint: String,
    pub registered_at: DateTime<Utc>,
}

impl EndpointRecord {
    pub fn descriptor(&self) -> ConnectionDescriptor {
        ConnectionDescriptor {
            host: self.host.clone(),
            port: self.port.clone(),
            protocol: self.protocol.clone(),
        }
    }
}

pub struct OvpnIntakeService {
    settings: IntakeSettings,
}

impl Default for OvpnIntakeService {
    fn default() -> Self {
        Self::new(IntakeSettings::default())
    }
}

impl OvpnIntakeService {
    pub fn new(settings: IntakeSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &IntakeSettings {
        &self.settings
    }

    /// Validate an upload and return the full result, including failures.
    ///
    /// Size and encoding problems are errors; a profile that decodes but
    /// lacks required directives is an `Ok(Failure { .. })`.
    pub fn inspect_bytes(&self, upload: &[u8]) -> IntakeResult<ValidationResult> {
        if upload.len() > self.settings.max_upload_bytes {
            log::warn!(
                "ovpn upload rejected: {} bytes exceeds limit {}",
                upload.len(),
                self.settings.max_upload_bytes
            );
            return Err(IntakeError::TooLarge {
                size: upload.len(),
                limit: self.settings.max_upload_bytes,
            });
        }

        let mut text = std::str::from_utf8(upload).map_err(|e| {
            log::warn!("ovpn upload rejected: {}", e);
            IntakeError::from(e)
        })?;
        if self.settings.strip_byte_order_mark {
            text = text.strip_prefix('\u{feff}').unwrap_or(text);
        }

        let scan = scan_directives(text);
        log::debug!(
            "ovpn scan: client={} dev={} remote={} proto={} ca={}",
            scan.has_client,
            scan.has_dev,
            scan.has_remote,
            scan.has_proto,
            scan.has_ca
        );
        Ok(check(scan))
    }

    /// Validate an upload, mapping a failed profile to
    /// [`IntakeError::Rejected`].
    pub fn check_bytes(&self, upload: &[u8]) -> IntakeResult<ConnectionDescriptor> {
        match self.inspect_bytes(upload)? {
            ValidationResult::Success { descriptor } => {
                log::info!("ovpn profile accepted: {}", descriptor);
                Ok(descriptor)
            }
            ValidationResult::Failure { errors } => {
                log::warn!("ovpn profile rejected with {} error(s)", errors.len());
                Err(IntakeError::Rejected(errors))
            }
        }
    }

    /// Validate an upload and build the registry record for it.
    pub fn register(
        &self,
        upload: &[u8],
        source_file: Option<String>,
    ) -> IntakeResult<EndpointRecord> {
        let descriptor = self.check_bytes(upload)?;
        let record = EndpointRecord {
            id: uuid::Uuid::new_v4().to_string(),
            host: descriptor.host,
            port: descriptor.port,
            protocol: descriptor.protocol,
            source_file,
            fingerprint: fingerprint(upload),
            registered_at: Utc::now(),
        };
        log::info!("endpoint record {} prepared for {}", record.id, record.host);
        Ok(record)
    }
}

/// SHA-256 of an upload as lowercase hex.
pub fn fingerprint(upload: &[u8]) -> String {
    hex::encode(Sha256::digest(upload))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "client\ndev tun\nremote vpn.example.com 443 tcp\n<ca>\nMIIB\n</ca>\n";

    fn service_with_limit(limit: usize) -> OvpnIntakeService {
        OvpnIntakeService::new(IntakeSettings {
            max_upload_bytes: limit,
            ..IntakeSettings::default()
        })
    }

    // ── check_bytes ──────────────────────────────────────────────

    #[test]
    fn accepts_good_profile() {
        let svc = OvpnIntakeService::default();
        let d = svc.check_bytes(GOOD.as_bytes()).unwrap();
        assert_eq!(d.host, "vpn.example.com");
        assert_eq!(d.port, "443");
        assert_eq!(d.protocol, "TCP");
    }

    #[test]
    fn rejects_missing_directives_with_all_errors() {
        let svc = OvpnIntakeService::default();
        let err = svc.check_bytes(b"").unwrap_err();
        match &err {
            IntakeError::Rejected(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn enforces_size_limit() {
        let svc = service_with_limit(8);
        let err = svc.check_bytes(GOOD.as_bytes()).unwrap_err();
        assert_eq!(
            err,
            IntakeError::TooLarge {
                size: GOOD.len(),
                limit: 8
            }
        );
    }

    #[test]
    fn upload_at_exact_limit_passes() {
        let svc = service_with_limit(GOOD.len());
        assert!(svc.check_bytes(GOOD.as_bytes()).is_ok());
    }

    #[test]
    fn rejects_invalid_utf8() {
        let svc = OvpnIntakeService::default();
        let err = svc.check_bytes(&[0x72, 0x65, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidEncoding(_)));
    }

    #[test]
    fn strips_bom_before_parse() {
        let svc = OvpnIntakeService::default();
        let upload = format!("\u{feff}{}", GOOD);
        assert!(svc.check_bytes(upload.as_bytes()).is_ok());
    }

    // ── inspect_bytes ────────────────────────────────────────────

    #[test]
    fn inspect_returns_failure_as_value() {
        let svc = OvpnIntakeService::default();
        let r = svc.inspect_bytes(b"dev tun\n").unwrap();
        assert!(!r.is_success());
        assert_eq!(r.errors().len(), 2);
    }

    // ── register ─────────────────────────────────────────────────

    #[test]
    fn register_builds_record() {
        let svc = OvpnIntakeService::default();
        let rec = svc
            .register(GOOD.as_bytes(), Some("uploads/abc.ovpn".into()))
            .unwrap();
        assert_eq!(rec.host, "vpn.example.com");
        assert_eq!(rec.port, "443");
        assert_eq!(rec.protocol, "TCP");
        assert_eq!(rec.source_file.as_deref(), Some("uploads/abc.ovpn"));
        assert_eq!(rec.fingerprint, fingerprint(GOOD.as_bytes()));
        assert_eq!(rec.fingerprint.len(), 64);
        assert!(uuid::Uuid::parse_str(&rec.id).is_ok());
        assert_eq!(rec.descriptor().transport(), Some(Transport::Tcp));
    }

    #[test]
    fn register_ids_are_unique() {
        let svc = OvpnIntakeService::default();
        let a = svc.register(GOOD.as_bytes(), None).unwrap();
        let b = svc.register(GOOD.as_bytes(), None).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn register_rejected_profile() {
        let svc = OvpnIntakeService::default();
        let err = svc.register(b"remote h\n", None).unwrap_err();
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn record_serializes_camel_case() {
        let svc = OvpnIntakeService::default();
        let rec = svc.register(GOOD.as_bytes(), None).unwrap();
        let v = serde_json::to_value(&rec).unwrap();
        assert!(v.get("registeredAt").is_some());
        assert!(v.get("sourceFile").is_some());
    }

    #[test]
    fn fingerprint_known_value() {
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
