// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::probes::traits::{CertificateInfo, CertificateInspector};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::Url;
use x509_parser::prelude::*;

/// 证书检查器
///
/// 对主机发起直接TLS握手，只为读取服务器证书的有效期窗口，
/// 与HTTP语义无关。握手不校验信任链，过期证书也能返回日期。
pub struct TlsInspector {
    timeout: Duration,
}

impl TlsInspector {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TlsInspector {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

/// 计算距离过期的整天数（向下取整），已过期为负数
pub(crate) fn days_remaining(now: DateTime<Utc>, not_after: DateTime<Utc>) -> i64 {
    (not_after - now).num_seconds().div_euclid(86_400)
}

/// 放行所有服务器证书的校验器
///
/// 检查器的职责是读取证书元数据而不是建立可信通道，
/// 签名本身仍然校验，链信任不校验
#[derive(Debug)]
struct MetadataOnlyVerification(CryptoProvider);

impl MetadataOnlyVerification {
    fn new() -> Self {
        Self(rustls::crypto::ring::default_provider())
    }
}

impl ServerCertVerifier for MetadataOnlyVerification {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
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
            &self.0.signature_verification_algorithms,
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
            &self.0.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.0.signature_verification_algorithms.supported_schemes()
    }
}

impl TlsInspector {
    /// 建立TLS连接并读取叶子证书的有效期窗口
    async fn fetch_leaf_validity(&self, host: &str, port: u16) -> Result<CertificateInfo> {
        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(MetadataOnlyVerification::new()))
            .with_no_client_auth();
        let connector = TlsConnector::from(Arc::new(config));

        let addr = format!("{host}:{port}");
        // SNI presents the hostname to the server
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid server name: {e}"))?;

        let tcp = tokio::time::timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| anyhow::anyhow!("Connection timed out"))?
            .map_err(|e| anyhow::anyhow!("TCP connection failed: {e}"))?;

        let tls_stream = tokio::time::timeout(self.timeout, connector.connect(server_name, tcp))
            .await
            .map_err(|_| anyhow::anyhow!("TLS handshake timed out"))?
            .map_err(|e| anyhow::anyhow!("TLS handshake failed: {e}"))?;

        let (_io, conn) = tls_stream.get_ref();
        let certs = conn
            .peer_certificates()
            .ok_or_else(|| anyhow::anyhow!("No peer certificates"))?;
        let leaf_der = certs
            .first()
            .ok_or_else(|| anyhow::anyhow!("Empty certificate chain"))?;

        // Parse the leaf certificate
        let (_, cert) = X509Certificate::from_der(leaf_der.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to parse X.509 certificate: {e}"))?;

        let not_before_ts = cert.validity().not_before.to_datetime().unix_timestamp();
        let not_after_ts = cert.validity().not_after.to_datetime().unix_timestamp();
        let not_before = DateTime::from_timestamp(not_before_ts, 0)
            .ok_or_else(|| anyhow::anyhow!("Certificate notBefore out of range"))?;
        let not_after = DateTime::from_timestamp(not_after_ts, 0)
            .ok_or_else(|| anyhow::anyhow!("Certificate notAfter out of range"))?;

        let now = Utc::now();
        Ok(CertificateInfo {
            valid: now >= not_before && now <= not_after,
            issued_on: not_before.date_naive(),
            expires_on: not_after.date_naive(),
            days_remaining: days_remaining(now, not_after),
        })
    }
}

#[async_trait]
impl CertificateInspector for TlsInspector {
    /// 检查URL对应主机的服务器证书
    ///
    /// 非加密协议短路为不适用；握手失败、超时、证书缺失或不可解析
    /// 都是该站点的可恢复结果，返回 `None`，绝不中断整个批次
    async fn inspect(&self, url: &str) -> Option<CertificateInfo> {
        let parsed = Url::parse(url).ok()?;
        if parsed.scheme() != "https" {
            return None;
        }
        let host = parsed.host_str()?.to_string();
        let port = parsed.port_or_known_default().unwrap_or(443);

        match self.fetch_leaf_validity(&host, port).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::debug!(host = %host, error = %e, "certificate inspection failed");
                None
            }
        }
    }
}
