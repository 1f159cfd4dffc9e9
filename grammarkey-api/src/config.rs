//! Server configuration from the environment.

use std::str::FromStr;

use anyhow::{bail, Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use grammarkey::{KdfParams, DEFAULT_ITERATIONS, DEFAULT_MAX_LENGTH};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `GRAMMARKEY_CORS_ORIGINS=*`
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return CorsOrigins::Any;
        }
        CorsOrigins::List(
            raw.split(',')
                .map(|s| s.trim().trim_end_matches('/').to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub bind: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    pub kdf_iterations: u32,
    pub max_key_length: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            cors_origins: CorsOrigins::parse(DEFAULT_CORS_ORIGINS),
            kdf_iterations: DEFAULT_ITERATIONS,
            max_key_length: DEFAULT_MAX_LENGTH,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Reads `GRAMMARKEY_*` variables; anything unset keeps its default.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Config::default();

        if let Some(bind) = lookup("GRAMMARKEY_BIND") {
            cfg.bind = bind.trim().to_string();
        }
        if let Some(port) = parse_var(&lookup, "GRAMMARKEY_PORT")? {
            cfg.port = port;
        }
        if let Some(origins) = lookup("GRAMMARKEY_CORS_ORIGINS") {
            cfg.cors_origins = CorsOrigins::parse(&origins);
        }
        if let Some(iterations) = parse_var(&lookup, "GRAMMARKEY_KDF_ITERATIONS")? {
            cfg.kdf_iterations = iterations;
        }
        if let Some(max) = parse_var(&lookup, "GRAMMARKEY_MAX_KEY_LENGTH")? {
            cfg.max_key_length = max;
        }
        if let Some(fmt) = lookup("GRAMMARKEY_LOG_FORMAT") {
            cfg.log_format = if fmt.trim() == "json" { LogFormat::Json } else { LogFormat::Pretty };
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kdf_iterations == 0 {
            bail!("GRAMMARKEY_KDF_ITERATIONS must be at least 1");
        }
        if self.max_key_length == 0 {
            bail!("GRAMMARKEY_MAX_KEY_LENGTH must be at least 1");
        }
        if let CorsOrigins::List(origins) = &self.cors_origins {
            if origins.is_empty() {
                bail!("GRAMMARKEY_CORS_ORIGINS names no origins (use \"*\" to allow any)");
            }
            if origins.iter().any(|o| o == "*") {
                bail!("GRAMMARKEY_CORS_ORIGINS mixes \"*\" with explicit origins");
            }
        }
        Ok(())
    }

    pub fn kdf(&self) -> KdfParams {
        KdfParams::with_iterations(self.kdf_iterations)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn cors_layer(&self) -> Result<CorsLayer> {
        let layer = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);

        let origins = match &self.cors_origins {
            CorsOrigins::Any => return Ok(layer.allow_origin(Any)),
            CorsOrigins::List(origins) if origins.is_empty() => bail!("no CORS origins configured"),
            CorsOrigins::List(origins) => origins,
        };

        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin: {}", o)))
            .collect::<Result<Vec<_>>>()?;
        Ok(layer.allow_origin(AllowOrigin::list(origins)))
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has invalid value {:?}", name, raw)),
    }
}
