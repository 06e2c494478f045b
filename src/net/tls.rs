//! TLS configuration for the encrypted half of a GURT connection.
//!
//! The protocol pins the encrypted transport to TLS 1.3 and requires both
//! sides to negotiate the `GURT/1.0` ALPN identifier. The connector built
//! here is reusable across requests; it holds no connection state.

use std::sync::Arc;

use tokio_rustls::rustls::client::danger::{
    HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier,
};
use tokio_rustls::rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use tokio_rustls::rustls::{self, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tokio_rustls::TlsConnector;
use tracing::warn;

use crate::error::{GurtError, Result};
use crate::protocol::GURT_ALPN;

/// Builds the TLS connector used for the upgrade phase: TLS 1.3 only,
/// ALPN set to the GURT identifier.
///
/// With `verify_tls` false, certificate and hostname verification are
/// replaced by an accept-everything verifier. That mode is insecure and
/// exists for development against self-signed servers.
pub fn connector(verify_tls: bool) -> Result<TlsConnector> {
    let provider = CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::ring::default_provider()));

    let builder = rustls::ClientConfig::builder_with_provider(provider.clone())
        .with_protocol_versions(&[&rustls::version::TLS13])
        .map_err(|e| GurtError::Tls(format!("failed to pin TLS 1.3: {e}")))?;

    let mut config = if verify_tls {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        builder
            .with_root_certificates(roots)
            .with_no_client_auth()
    } else {
        warn!("TLS certificate verification disabled - only use for development");

        builder
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
            .with_no_client_auth()
    };

    config.alpn_protocols = vec![GURT_ALPN.to_vec()];

    Ok(TlsConnector::from(Arc::new(config)))
}

/// Certificate verifier that accepts any server identity.
///
/// Signature checks still go through the crypto provider; only the chain
/// and hostname validation are skipped.
#[derive(Debug)]
struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
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
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
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
