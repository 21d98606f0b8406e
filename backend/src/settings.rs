//! Process configuration loaded via OrthoConfig.
//!
//! Every value can come from the command line, a config file or a
//! `CAMPUS_*` environment variable (`CAMPUS_DATABASE_URL`,
//! `CAMPUS_JWT_SECRET_FILE`, ...).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_JWT_ISSUER: &str = "campus-backend";
/// HS256 keys shorter than the digest size weaken the MAC.
pub const JWT_SECRET_MIN_BYTES: usize = 32;
const EPHEMERAL_SECRET_BYTES: usize = 64;

/// Errors raised while turning raw settings into usable values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("CAMPUS_DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to read JWT secret at {path}: {source}")]
    SecretFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JWT secret must be at least {JWT_SECRET_MIN_BYTES} bytes")]
    WeakJwtSecret,
    #[error("no JWT secret configured; set CAMPUS_JWT_SECRET_FILE or CAMPUS_JWT_SECRET")]
    MissingJwtSecret,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CAMPUS")]
pub struct CampusSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Listen address, `0.0.0.0:8080` when unset.
    pub bind_addr: Option<String>,
    /// Token signing secret given inline. Prefer `jwt_secret_file`.
    pub jwt_secret: Option<String>,
    /// File holding the token signing secret.
    pub jwt_secret_file: Option<PathBuf>,
    /// `iss` claim written to and required of every token.
    pub jwt_issuer: Option<String>,
    /// Allow a random per-process secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Mark the login cookie `Secure`; on unless set to false.
    pub cookie_secure: Option<bool>,
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Apply embedded migrations before serving; on unless set to false.
    pub run_migrations: Option<bool>,
}

impl CampusSettings {
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn jwt_issuer(&self) -> &str {
        self.jwt_issuer.as_deref().unwrap_or(DEFAULT_JWT_ISSUER)
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Resolve the token signing secret.
    ///
    /// The secret file wins over the inline value. Without either, debug
    /// builds (or `allow_ephemeral_secret`) fall back to a random secret,
    /// which invalidates every token on restart.
    pub fn jwt_secret(&self) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        let configured = match (&self.jwt_secret_file, &self.jwt_secret) {
            (Some(path), _) => Some(read_secret_file(path)?),
            (None, Some(inline)) => Some(Zeroizing::new(inline.trim().as_bytes().to_vec())),
            (None, None) => None,
        };

        match configured {
            Some(secret) if secret.len() >= JWT_SECRET_MIN_BYTES => Ok(secret),
            Some(_) => Err(SettingsError::WeakJwtSecret),
            None if cfg!(debug_assertions) || self.allow_ephemeral_secret => {
                warn!("using an ephemeral JWT secret; tokens will not survive a restart");
                let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_BYTES]);
                rand::thread_rng().fill_bytes(&mut secret);
                Ok(secret)
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }
}

fn read_secret_file(path: &Path) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
    let raw = Zeroizing::new(std::fs::read(path).map_err(|source| SettingsError::SecretFile {
        path: path.to_path_buf(),
        source,
    })?);
    let end = raw
        .iter()
        .rposition(|byte| !byte.is_ascii_whitespace())
        .map_or(0, |last| last + 1);
    Ok(Zeroizing::new(raw[..end].to_vec()))
}
