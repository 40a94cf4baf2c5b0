//! Certificate pinning against a real TLS listener.
//!
//! A self-signed certificate is generated per test and served by a minimal
//! HTTP/1.1 responder, so the whole handshake runs through the pinned
//! verifier.

use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use vimeo_core::error::{Error, TransportError};
use vimeo_core::{ApiUrl, CertFingerprint, Credentials, TrustedFingerprints};
use vimeo_http::VimeoClient;

/// Serves one canned token response per connection until the test ends.
struct TlsServer {
    api: ApiUrl,
    cert: CertificateDer<'static>,
}

impl TlsServer {
    async fn start() -> Self {
        let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let cert = generated.cert.der().clone();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(
            generated.key_pair.serialize_der(),
        ));

        let config = rustls::ServerConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![cert.clone()], key)
        .unwrap();
        let acceptor = TlsAcceptor::from(Arc::new(config));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    return;
                };
                let acceptor = acceptor.clone();
                tokio::spawn(async move {
                    // A rejected handshake ends here; the client reports it.
                    if let Ok(stream) = acceptor.accept(stream).await {
                        respond(stream).await;
                    }
                });
            }
        });

        Self {
            api: ApiUrl::new(format!("https://127.0.0.1:{port}")).unwrap(),
            cert,
        }
    }

    fn client(&self, trusted: TrustedFingerprints) -> VimeoClient {
        let credentials = Credentials::new("client-id", "client-secret", trusted);
        VimeoClient::new(self.api.clone(), credentials).unwrap()
    }
}

async fn respond<S>(mut stream: S)
where
    S: AsyncReadExt + AsyncWriteExt + Unpin,
{
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];

    // Headers, then as much body as Content-Length announces.
    let header_end = loop {
        let Ok(read) = stream.read(&mut chunk).await else {
            return;
        };
        if read == 0 {
            return;
        }
        request.extend_from_slice(&chunk[..read]);
        if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while request.len() < header_end + content_length {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(read) => request.extend_from_slice(&chunk[..read]),
        }
    }

    let body = json!({
        "access_token": "pinned-token",
        "token_type": "bearer",
        "scope": "public"
    })
    .to_string();
    let response = format!(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

#[tokio::test]
async fn test_matching_pin_completes_request() {
    let server = TlsServer::start().await;
    let trusted = TrustedFingerprints::new([CertFingerprint::of_der(&server.cert)]);

    let client = server.client(trusted);
    assert!(client.http().pins_enforced());

    let token = client.authenticate_client_credentials(None).await.unwrap();
    assert_eq!(token.access_token.as_str(), "pinned-token");
    assert_eq!(token.scope, "public");
}

#[tokio::test]
async fn test_mismatched_pin_is_tls_failure() {
    let server = TlsServer::start().await;
    let trusted = TrustedFingerprints::new([CertFingerprint::of_der(b"some other certificate")]);

    let client = server.client(trusted);
    let err = client.authenticate_client_credentials(None).await.unwrap_err();

    assert!(err.is_network());
    assert!(
        matches!(err, Error::Transport(TransportError::Tls { .. })),
        "expected a TLS failure, got {err:?}"
    );
    assert!(client.credentials().await.access_token().is_none());
}

#[tokio::test]
async fn test_one_matching_pin_among_several_is_enough() {
    let server = TlsServer::start().await;
    let trusted = TrustedFingerprints::new([
        CertFingerprint::of_der(b"retired certificate"),
        CertFingerprint::of_der(&server.cert),
    ]);

    let token = server
        .client(trusted)
        .authenticate_client_credentials(None)
        .await
        .unwrap();
    assert_eq!(token.access_token.as_str(), "pinned-token");
}
