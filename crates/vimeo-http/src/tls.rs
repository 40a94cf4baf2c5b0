//! Certificate pinning.
//!
//! The server is trusted iff the SHA-256 fingerprint of its end-entity
//! certificate is on the allow-list. Chain validity and the system trust
//! store play no part; an empty list trusts nothing.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, DigitallySignedStruct, SignatureScheme};
use tracing::{trace, warn};

use vimeo_core::error::ConfigurationError;
use vimeo_core::{CertFingerprint, TrustedFingerprints};

/// Accepts exactly the pinned certificates.
#[derive(Debug)]
pub(crate) struct PinnedCertVerifier {
    trusted: TrustedFingerprints,
    provider: Arc<CryptoProvider>,
}

impl PinnedCertVerifier {
    pub(crate) fn new(trusted: TrustedFingerprints, provider: Arc<CryptoProvider>) -> Self {
        Self { trusted, provider }
    }
}

impl ServerCertVerifier for PinnedCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let fingerprint = CertFingerprint::of_der(end_entity.as_ref());

        if self.trusted.contains(&fingerprint) {
            trace!(?server_name, %fingerprint, "Pinned certificate accepted");
            Ok(ServerCertVerified::assertion())
        } else {
            warn!(?server_name, %fingerprint, "Certificate is not in the pinned set");
            Err(rustls::Error::InvalidCertificate(
                CertificateError::ApplicationVerificationFailure,
            ))
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        rustls::crypto::verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// A rustls client configuration that trusts only `trusted`.
pub(crate) fn pinned_client_config(
    trusted: TrustedFingerprints,
) -> Result<rustls::ClientConfig, ConfigurationError> {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let verifier = PinnedCertVerifier::new(trusted, Arc::clone(&provider));

    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| ConfigurationError::Tls {
            message: e.to_string(),
        })?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CERT: &[u8] = b"not a real certificate, only its bytes are hashed";

    fn verify(trusted: TrustedFingerprints, der: &[u8]) -> Result<ServerCertVerified, rustls::Error> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = PinnedCertVerifier::new(trusted, provider);
        let server_name = ServerName::try_from("api.vimeo.com").unwrap();

        verifier.verify_server_cert(
            &CertificateDer::from(der.to_vec()),
            &[],
            &server_name,
            &[],
            UnixTime::now(),
        )
    }

    #[test]
    fn accepts_pinned_certificate() {
        let trusted = TrustedFingerprints::new([
            CertFingerprint::of_der(b"some other certificate"),
            CertFingerprint::of_der(CERT),
        ]);
        assert!(verify(trusted, CERT).is_ok());
    }

    #[test]
    fn rejects_unpinned_certificate() {
        let trusted = TrustedFingerprints::new([CertFingerprint::of_der(b"other")]);
        let err = verify(trusted, CERT).unwrap_err();
        assert_eq!(
            err,
            rustls::Error::InvalidCertificate(CertificateError::ApplicationVerificationFailure)
        );
    }

    #[test]
    fn empty_pin_set_rejects_everything() {
        assert!(verify(TrustedFingerprints::default(), CERT).is_err());
    }

    #[test]
    fn builds_client_config() {
        let trusted = TrustedFingerprints::new([CertFingerprint::of_der(CERT)]);
        assert!(pinned_client_config(trusted).is_ok());
    }
}
