use anyhow::{Context, Result, ensure};
use axum_server::tls_rustls::RustlsConfig;
use backoffice::domain::config::SslConfig;
use tracing::warn;

/// Fails fast on a certificate or key path that does not point at a file.
pub(crate) fn check(ssl: &SslConfig) -> Result<()> {
    ensure!(ssl.cert.is_file(), "SSL certificate not found at: {}", ssl.cert.display());
    ensure!(ssl.key.is_file(), "SSL key not found at: {}", ssl.key.display());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = ssl.key.metadata()?.permissions().mode();
        if mode & 0o077 != 0 {
            warn!(key = %ssl.key.display(), mode = format!("{mode:o}"), "SSL key is readable by others");
        }
    }
    Ok(())
}

pub(crate) async fn load(ssl: &SslConfig) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
        .await
        .with_context(|| format!("Failed to load TLS material from {}", ssl.cert.display()))
}
