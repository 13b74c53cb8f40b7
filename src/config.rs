//!
//! src/config.rs
//!
//! Loads all environment driven configuration once at startup and
//! hands it to the pipeline as a single immutable struct
//!
//!

use std::path::PathBuf;
use std::time;
use url::Url;
use crate::BadgeError;

/// Constants for HTTP Config
pub const HTTP_TIMEOUT: u64 = 30_000;
pub const HTTP_CONNECT_TIMEOUT: u64 = 2_000;
pub const HTTP_MAX_REDIRECTS: u8 = 4;

pub const DEFAULT_POOL: usize = 20;
pub const DEFAULT_SVG_PATH: &str = "assets/soundcloud-like.svg";
pub const DEFAULT_README_PATH: &str = "README.md";
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; github-readme-bot/1.0)";

/// Wrapper over env::var to return an invalid enviroment var error
fn env_check(s: &str) -> Result<String, BadgeError> {
    match std::env::var(s) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(BadgeError::Config(format!("{s} was not set"))),
    }
}

fn env_to_uint(s: &str, default: usize) -> usize {
    match std::env::var(s) {
        Ok(s) => {
            match s.trim().parse::<usize>() {
                Ok(value) => value,
                _ => default
            }
        },
        Err(_) => {
            default
        }
    }
}

/// Ensures that url is https
fn ensure_https(url: &Url) -> Result<(), String> {
    if url.scheme() == "https" {
        Ok(())
    } else {
        Err(format!("URL must be https: {url}"))
    }
}

fn ensure_host(url: &Url, expected_host: &str) -> Result<(), String> {
    match url.host_str() {
        Some(h) if h.eq_ignore_ascii_case(expected_host) => Ok(()),
        Some(h) => Err(
            format!("Unexpected host for {url} (got {h}, expected {expected_host})")
        ),
        None => Err(format!("URL missing host: {url}"))
    }
}

///
/// Configuration for the badge itself: which profile to sample, how many
/// recent likes form the pool, and where output lands
///
#[derive(Debug, Clone)]
pub struct BadgeConfig {
    pub username: String,
    pub pool: usize,               // sample from N most recent likes
    pub seed: Option<String>,      // optional deterministic randomness
    pub svg_path: PathBuf,
    pub readme_path: Option<PathBuf>,
}

fn build_badge() -> Result<BadgeConfig, BadgeError> {
    let username = env_check("SOUNDCLOUD_USERNAME")?.trim().to_string();
    let pool     = env_to_uint("SOUNDCLOUD_POOL", DEFAULT_POOL);

    let seed = std::env::var("SOUNDCLOUD_SEED")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let svg_path = PathBuf::from(
        std::env::var("SVG_PATH").unwrap_or_else(|_| DEFAULT_SVG_PATH.to_string())
    );

    // README_PATH set to an empty string disables the readme rewrite step
    let readme_path = match std::env::var("README_PATH") {
        Ok(v) if v.trim().is_empty() => None,
        Ok(v)  => Some(PathBuf::from(v)),
        Err(_) => Some(PathBuf::from(DEFAULT_README_PATH)),
    };

    Ok( BadgeConfig { username, pool, seed, svg_path, readme_path } )
}

///
/// Configuration for the target site
///
#[derive(Debug, Clone)]
pub struct SoundCloudConfig {
    pub base_url: Url,
    pub user_agent: String,
}

fn build_soundcloud() -> Result<SoundCloudConfig, BadgeError> {
    let base_url = std::env::var("SOUNDCLOUD_BASE_URL")
        .unwrap_or_else(|_| "https://soundcloud.com/".to_string());

    let mut base_url = Url::parse(&base_url)
        .map_err(|e| BadgeError::Config(
            format!("SOUNDCLOUD_BASE_URL invalid {e}")
        ))?;

    // https and hostname check
    ensure_https(&base_url)
        .map_err(BadgeError::Config)?;
    ensure_host(&base_url, "soundcloud.com")
        .map_err(BadgeError::Config)?;

    // ensure trailing slash
    if !base_url.path().ends_with('/') {
        let mut path = base_url.path().to_string();
        path.push('/');
        base_url.set_path(&path);
    }

    Ok( SoundCloudConfig {
        base_url,
        user_agent: USER_AGENT.to_string()
    })
}

///
/// Configuration for Http timeouts, redirects, etc.
///
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: time::Duration,
    pub connect_timeout: time::Duration,
    pub max_redirects: u8,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: time::Duration::from_millis(HTTP_TIMEOUT),
            connect_timeout: time::Duration::from_millis(HTTP_CONNECT_TIMEOUT),
            max_redirects: HTTP_MAX_REDIRECTS,
        }
    }
}

///
/// Configuration for Logger
///

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter_directives: String,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub include_file_line: bool,
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter_directives: "info,likes_badge=debug,reqwest=warn".to_string(),
            format: LogFormat::Pretty,
            with_ansi: true,
            include_file_line: false,
            include_target: false,
        }
    }
}

///
/// AppConfig which holds everything the pipeline needs
///
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub badge: BadgeConfig,
    pub soundcloud: SoundCloudConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig
}

///
/// Return all environment variables to caller at program start.
///
pub fn load_config() -> Result<AppConfig, BadgeError> {
    dotenvy::dotenv().ok();

    let badge      = build_badge()?;
    let soundcloud = build_soundcloud()?;
    let http       = HttpConfig::default();
    let logging    = LoggingConfig::default();

    Ok( AppConfig { badge, soundcloud, http, logging } )
}
