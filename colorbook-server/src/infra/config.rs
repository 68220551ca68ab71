use std::env;

use anyhow::anyhow;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHasher};
use tracing::warn;

/// Runtime configuration, resolved once at startup from the environment
/// (`.env` is loaded first when present). CLI arguments may override the
/// bind address afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    /// Argon2 PHC string the login handler verifies against.
    pub admin_password_hash: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    /// Hostnames the image proxy may fetch from.
    pub proxy_allowed_hosts: Vec<String>,
    pub ip_echo_primary: String,
    pub ip_echo_fallback: String,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8700;
const DEFAULT_ADMIN_EMAIL: &str = "admin@colorbook.dev";
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_PROXY_ALLOWED_HOSTS: &str =
    "images.colorbook.dev,images.unsplash.com,i.imgur.com,raw.githubusercontent.com";
const DEFAULT_IP_ECHO_PRIMARY: &str = "https://api.ipify.org";
const DEFAULT_IP_ECHO_FALLBACK: &str = "https://ifconfig.me/ip";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Bind address defaults live here; COLORBOOK_HOST/COLORBOOK_PORT and
        // the --host/--port flags are applied by the CLI layer.
        let host = DEFAULT_HOST.to_string();
        let port = DEFAULT_PORT;

        let admin_email =
            env::var("ADMIN_EMAIL").unwrap_or_else(|_| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_password_hash = resolve_admin_password_hash()?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                warn!("JWT_SECRET not set, using an insecure development secret");
                "colorbook-dev-secret".to_string()
            }
        };

        let token_ttl_minutes = match env::var("TOKEN_TTL_MINUTES") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|ttl| *ttl > 0)
                .ok_or_else(|| anyhow!("TOKEN_TTL_MINUTES must be a positive integer: {raw}"))?,
            Err(_) => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let proxy_allowed_hosts = env::var("PROXY_ALLOWED_HOSTS")
            .unwrap_or_else(|_| DEFAULT_PROXY_ALLOWED_HOSTS.to_string())
            .split(',')
            .map(|host| host.trim().to_lowercase())
            .filter(|host| !host.is_empty())
            .collect();

        let ip_echo_primary =
            env::var("IP_ECHO_PRIMARY").unwrap_or_else(|_| DEFAULT_IP_ECHO_PRIMARY.to_string());
        let ip_echo_fallback =
            env::var("IP_ECHO_FALLBACK").unwrap_or_else(|_| DEFAULT_IP_ECHO_FALLBACK.to_string());

        Ok(Self {
            host,
            port,
            admin_email,
            admin_password_hash,
            jwt_secret,
            token_ttl_minutes,
            proxy_allowed_hosts,
            ip_echo_primary,
            ip_echo_fallback,
        })
    }
}

/// Prefer a pre-hashed credential; fall back to hashing a plaintext
/// `ADMIN_PASSWORD` at startup, and finally to a well-known development
/// password so a bare `cargo run` still comes up.
fn resolve_admin_password_hash() -> anyhow::Result<String> {
    if let Ok(hash) = env::var("ADMIN_PASSWORD_HASH") {
        if !hash.trim().is_empty() {
            return Ok(hash);
        }
    }

    let plaintext = match env::var("ADMIN_PASSWORD") {
        Ok(password) if !password.is_empty() => password,
        _ => {
            warn!("ADMIN_PASSWORD not set, using the default development credential");
            "colorbook-admin".to_string()
        }
    };

    hash_password(&plaintext)
}

pub fn hash_password(plaintext: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash admin password: {err}"))
}
