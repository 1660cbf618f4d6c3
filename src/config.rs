use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::providers::{Env, Format, Json, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{TickerError, TickerResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// JSON file of shape `{ "api_key": "..." }`, maintained by the operator.
    pub credentials_path: PathBuf,
    pub api: ApiConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
    pub infra: InfraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            api: ApiConfig::default(),
            output: OutputConfig::default(),
            display: DisplayConfig::default(),
            infra: InfraConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> TickerResult<()> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err(TickerError::Config(
                "credentials_path must not be empty".to_string(),
            ));
        }
        self.api.validate()?;
        self.output.validate()?;
        self.display.validate()?;
        Ok(())
    }
}

fn default_credentials_path() -> PathBuf {
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default();
    path.push(".config/simmer/credentials.json");
    path
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub trades_limit: u32,
    /// 0 leaves the HTTP client's default in place.
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.simmer.markets".to_string(),
            trades_limit: 5,
            request_timeout_ms: 0,
        }
    }
}

impl ApiConfig {
    pub fn validate(&self) -> TickerResult<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(TickerError::Config("api.base_url must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(TickerError::Config(format!(
                "api.base_url must be an http(s) url, got {base}"
            )));
        }
        if self.trades_limit == 0 {
            return Err(TickerError::Config(
                "api.trades_limit must be >0".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub json_path: PathBuf,
    pub js_path: PathBuf,
    pub html_path: PathBuf,
    pub embed_inline_data: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("docs/data.json"),
            js_path: PathBuf::from("docs/data.js"),
            html_path: PathBuf::from("docs/index.html"),
            embed_inline_data: true,
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> TickerResult<()> {
        for (name, path) in [
            ("output.json_path", &self.json_path),
            ("output.js_path", &self.js_path),
            ("output.html_path", &self.html_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(TickerError::Config(format!("{name} must not be empty")));
            }
        }
        if self.json_path == self.js_path
            || self.json_path == self.html_path
            || self.js_path == self.html_path
        {
            return Err(TickerError::Config(
                "output paths must be distinct".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// IANA zone name used for `updatedAt`.
    pub timezone: String,
    /// Appended verbatim after the local time.
    pub timezone_label: String,
    pub max_trades: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: "America/New_York".to_string(),
            timezone_label: "ET".to_string(),
            max_trades: 5,
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> TickerResult<()> {
        self.tz()?;
        if self.max_trades == 0 {
            return Err(TickerError::Config(
                "display.max_trades must be >0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tz(&self) -> TickerResult<chrono_tz::Tz> {
        chrono_tz::Tz::from_str(self.timezone.trim()).map_err(|e| {
            TickerError::Config(format!(
                "display.timezone '{}' is not a known IANA zone: {e}",
                self.timezone
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InfraConfig {
    pub log_level: String,
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

pub fn load_config() -> TickerResult<AppConfig> {
    let figment = build_figment_from_env()?;
    load_config_from(figment)
}

fn build_figment_from_env() -> TickerResult<Figment> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Ok(path) = std::env::var("TICKER_CONFIG_PATH") {
        figment = merge_config_file(figment, &path)?;
    }

    figment = figment.merge(Env::prefixed("TICKER_").ignore(&["CONFIG_PATH"]).split("__"));
    Ok(figment)
}

fn merge_config_file(figment: Figment, path: &str) -> TickerResult<Figment> {
    let p = Path::new(path);
    match p.extension().and_then(|s| s.to_str()) {
        Some("toml") => Ok(figment.merge(Toml::file(path))),
        Some("json") => Ok(figment.merge(Json::file(path))),
        _ => Err(TickerError::Config(format!(
            "unsupported config file extension for TICKER_CONFIG_PATH: {path} (expected .toml or .json)"
        ))),
    }
}

fn load_config_from(figment: Figment) -> TickerResult<AppConfig> {
    let cfg: AppConfig = figment
        .extract()
        .map_err(|e| TickerError::Config(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}
