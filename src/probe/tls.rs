//! TLS certificate verification probe.
//!
//! Performs an HTTPS `GET` against a known URL with certificate verification
//! against the same CA bundle Ruby's OpenSSL would use, and reports whether
//! the failure (if any) happened at the connection level or during
//! verification.

use std::error::Error as StdError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use reqwest::Url;
use rustls::pki_types::CertificateDer;
use rustls::{ClientConfig, ProtocolVersion, RootCertStore};

/// Default verification target.
pub const DEFAULT_VERIFY_URL: &str =
    "https://raw.githubusercontent.com/SketchUp/ruby-api-docs/gh-pages/css/common.css";

/// Default connect/read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Result of a verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsOutcome {
    /// The request completed with HTTP 200.
    Success(Duration),
    /// TCP connect, DNS, or socket I/O failed.
    Transport(String),
    /// The TLS handshake or certificate verification failed.
    Verification(String),
    /// The server answered with a non-200 status.
    HttpStatus(u16),
    /// The URL could not be used.
    InvalidUrl(String),
    /// Network probes are disabled.
    Skipped,
}

impl TlsOutcome {
    /// The report text for this outcome.
    pub fn message(&self) -> String {
        match self {
            TlsOutcome::Success(elapsed) => {
                format!("Success in {:.3} sec", elapsed.as_secs_f64())
            }
            TlsOutcome::Transport(_) => "*** UNKNOWN - internet connection failure? ***".to_string(),
            TlsOutcome::Verification(_) => "*** FAILURE ***".to_string(),
            TlsOutcome::HttpStatus(code) => format!("*** FAILURE *** (HTTP {})", code),
            TlsOutcome::InvalidUrl(_) => "*** FAILURE *** (invalid URL)".to_string(),
            TlsOutcome::Skipped => "skipped (offline)".to_string(),
        }
    }

    /// Whether verification succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, TlsOutcome::Success(_))
    }
}

/// Where to look for trusted certificates.
#[derive(Debug, Clone, Default)]
pub struct CaSources {
    /// Files, in priority order; the first existing one is used.
    pub files: Vec<PathBuf>,
    /// Directories of PEM files, used when no file exists.
    pub dirs: Vec<PathBuf>,
}

impl CaSources {
    /// Load trusted roots from the first usable source.
    pub fn load_roots(&self) -> RootCertStore {
        let mut roots = RootCertStore::empty();

        if let Some(file) = self.files.iter().find(|f| f.is_file()) {
            let certs = read_pem_certs(file);
            let (added, ignored) = roots.add_parsable_certificates(certs);
            tracing::debug!(
                "Loaded {} roots from {} ({} ignored)",
                added,
                file.display(),
                ignored
            );
            return roots;
        }

        for dir in self.dirs.iter().filter(|d| d.is_dir()) {
            let Ok(entries) = std::fs::read_dir(dir) else {
                tracing::warn!("Cannot read certificate dir {}", dir.display());
                continue;
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    roots.add_parsable_certificates(read_pem_certs(&path));
                }
            }
            if !roots.is_empty() {
                tracing::debug!("Loaded {} roots from {}", roots.len(), dir.display());
                return roots;
            }
        }

        tracing::debug!("No CA bundle found; verifying against an empty root store");
        roots
    }
}

fn read_pem_certs(path: &Path) -> Vec<CertificateDer<'static>> {
    match try_read_pem_certs(path) {
        Ok(certs) => certs,
        Err(e) => {
            tracing::debug!("{:#}", e);
            Vec::new()
        }
    }
}

fn try_read_pem_certs(path: &Path) -> anyhow::Result<Vec<CertificateDer<'static>>> {
    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("Malformed PEM in {}", path.display()))
}

/// The TLS verification probe.
#[derive(Debug, Clone)]
pub struct TlsProbe {
    url: String,
    timeout: Duration,
    offline: bool,
}

impl TlsProbe {
    /// Create a probe for `url`.
    pub fn new(url: impl Into<String>, timeout: Duration, offline: bool) -> Self {
        Self {
            url: url.into(),
            timeout,
            offline,
        }
    }

    /// Run the probe against the given CA sources.
    pub fn verify(&self, sources: &CaSources) -> TlsOutcome {
        if self.offline {
            return TlsOutcome::Skipped;
        }
        let Some(url) = parse_https_url(&self.url) else {
            return TlsOutcome::InvalidUrl(self.url.clone());
        };

        tracing::debug!("Verifying TLS against {}", url);
        let start = Instant::now();
        let outcome = match self.request(url, sources.load_roots()) {
            Ok(200) => TlsOutcome::Success(start.elapsed()),
            Ok(code) => TlsOutcome::HttpStatus(code),
            Err(outcome) => outcome,
        };
        tracing::debug!("TLS probe finished: {:?}", outcome);
        outcome
    }

    fn request(&self, url: Url, roots: RootCertStore) -> Result<u16, TlsOutcome> {
        let config = ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .map_err(|e| TlsOutcome::Verification(e.to_string()))?
        .with_root_certificates(roots)
        .with_no_client_auth();

        let client = reqwest::blocking::Client::builder()
            .use_preconfigured_tls(config)
            .user_agent(concat!("rbdiag/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(self.timeout)
            .timeout(self.timeout)
            .build()
            .map_err(|e| TlsOutcome::Verification(e.to_string()))?;

        let response = client.get(url).send().map_err(|e| classify_error(&e))?;
        Ok(response.status().as_u16())
    }
}

/// Accept only absolute `https` URLs with a host.
pub fn parse_https_url(url: &str) -> Option<Url> {
    let url = Url::parse(url).ok()?;
    (url.scheme() == "https" && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

/// Distinguish TLS failures from transport failures anywhere in an error's
/// source chain.
pub fn classify_error(err: &(dyn StdError + 'static)) -> TlsOutcome {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(tls_err) = as_rustls_error(e) {
            return TlsOutcome::Verification(tls_err.to_string());
        }
        current = e.source();
    }
    TlsOutcome::Transport(err.to_string())
}

fn as_rustls_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a rustls::Error> {
    if let Some(tls_err) = err.downcast_ref::<rustls::Error>() {
        return Some(tls_err);
    }
    err.downcast_ref::<io::Error>()
        .and_then(|io_err| io_err.get_ref())
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
}

/// Protocol versions the verifier's TLS stack supports, space separated.
pub fn supported_protocols() -> String {
    rustls::ALL_VERSIONS
        .iter()
        .map(|v| match v.version {
            ProtocolVersion::TLSv1_2 => "TLS1_2".to_string(),
            ProtocolVersion::TLSv1_3 => "TLS1_3".to_string(),
            other => format!("{:?}", other),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
