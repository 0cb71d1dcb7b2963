// src/config.rs

//! Settings loaded once from the environment at startup.

use std::path::Path;
use std::time::Duration;

use log::warn;

use crate::error::{AppError, Result};

pub const DEFAULT_MAIL_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_MAIL_PORT: u16 = 587;
pub const DEFAULT_MAIL_TIMEOUT: Duration = Duration::from_secs(10);
const DEV_SECRET_KEY: &str = "you-will-never-guess";

/// SMTP settings. Only present when every credential is configured.
#[derive(Debug, Clone, PartialEq)]
pub struct MailSettings {
    pub server: String,
    pub port: u16,
    pub use_tls: bool,
    pub username: String,
    pub password: String,
    pub admin_email: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub secret_key: String,
    /// SQLite path, or `:memory:`.
    pub database_path: String,
    pub mail: Option<MailSettings>,
    pub host: String,
    pub port: u16,
    pub assets_dir: String,
}

impl Settings {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url =
            get("DATABASE_URL").ok_or_else(|| AppError::config("DATABASE_URL is not set"))?;
        let database_path = sqlite_path(&database_url)?;

        let secret_key = get("SECRET_KEY").unwrap_or_else(|| {
            warn!("[CONFIG] SECRET_KEY is not set, using the development fallback");
            DEV_SECRET_KEY.to_string()
        });

        let mail = mail_settings(&get)?;

        Ok(Settings {
            secret_key,
            database_path,
            mail,
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("PORT", get("PORT"), 5000)?,
            assets_dir: get("ASSETS_DIR").unwrap_or_else(|| "assets".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn mail_settings<G>(get: &G) -> Result<Option<MailSettings>>
where
    G: Fn(&str) -> Option<String>,
{
    let username = get("EMAIL_USER");
    let password = get("EMAIL_PASS");
    let admin_email = get("ADMIN_EMAIL");

    let (username, password, admin_email) = match (username, password, admin_email) {
        (Some(user), Some(pass), Some(admin)) => (user, pass, admin),
        (user, pass, admin) => {
            let missing: Vec<&str> = [
                ("EMAIL_USER", user.is_none()),
                ("EMAIL_PASS", pass.is_none()),
                ("ADMIN_EMAIL", admin.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, absent)| absent.then_some(key))
            .collect();
            warn!(
                "[CONFIG] {} not set, admin notifications are disabled",
                missing.join(", ")
            );
            return Ok(None);
        }
    };

    let use_tls = match get("MAIL_USE_TLS") {
        None => true,
        Some(raw) => parse_bool("MAIL_USE_TLS", &raw)?,
    };
    let timeout_secs = parse_or(
        "MAIL_TIMEOUT_SECS",
        get("MAIL_TIMEOUT_SECS"),
        DEFAULT_MAIL_TIMEOUT.as_secs(),
    )?;

    Ok(Some(MailSettings {
        server: get("MAIL_SERVER").unwrap_or_else(|| DEFAULT_MAIL_SERVER.to_string()),
        port: parse_or("MAIL_PORT", get("MAIL_PORT"), DEFAULT_MAIL_PORT)?,
        use_tls,
        username,
        password,
        admin_email,
        timeout: Duration::from_secs(timeout_secs),
    }))
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{key} has an invalid value '{raw}'"))),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!("{key} has an invalid value '{raw}'"))),
    }
}

/// Maps a `DATABASE_URL` to a SQLite path.
///
/// `sqlite:///reviews.db` is relative, `sqlite:////var/lib/reviews.db` is
/// absolute and `sqlite://` alone is an in-memory database. A value without a
/// scheme is used as a path as-is.
pub fn sqlite_path(url: &str) -> Result<String> {
    let url = url.trim();
    if let Some(rest) = url.strip_prefix("sqlite://") {
        let path = rest.strip_prefix('/').unwrap_or(rest);
        if path.is_empty() || path == ":memory:" {
            return Ok(":memory:".to_string());
        }
        return Ok(path.to_string());
    }
    if let Some((scheme, _)) = url.split_once("://") {
        return Err(AppError::config(format!(
            "DATABASE_URL scheme '{scheme}' is not supported, only sqlite is"
        )));
    }
    Ok(url.to_string())
}

/// Creates the directory that will hold the database file, if any.
pub fn ensure_database_dir(database_path: &str) -> Result<()> {
    if database_path == ":memory:" {
        return Ok(());
    }
    match Path::new(database_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir)?;
            Ok(())
        }
        _ => Ok(()),
    }
}
