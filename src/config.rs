use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::language::Language;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Delay before the mock bot reply, in milliseconds
    #[arg(long, env = "REPLY_DELAY_MS")]
    pub reply_delay_ms: Option<u64>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,

    /// Log output format (pretty or json)
    #[arg(long, env = "LOG_FORMAT")]
    pub log_format: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub chat: ChatConfig,
    pub visitors: VisitorConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub request_timeout_secs: u64,
    pub timeout_disabled: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
    pub default_language: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VisitorConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub level: String,
    pub format: String,
}

const DEFAULT_CONFIG_FILE: &str = "config.yaml";

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("server.timeout_disabled", false)?
            .set_default("chat.reply_delay_ms", 1500)?
            .set_default("chat.default_language", "en")?
            .set_default("visitors.idle_timeout_secs", 30 * 60)?
            .set_default("visitors.sweep_interval_secs", 60)?
            .set_default("log.level", "info")?
            .set_default("log.format", "pretty")?;

        // Explicit file must exist; ./config.yaml is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::new(path, format_for(path)).required(true)),
            None => builder.add_source(
                File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false),
            ),
        };

        // INGRES_SERVER__PORT=8000 and friends
        builder = builder.add_source(
            Environment::with_prefix("INGRES")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > INGRES_ env > config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(delay) = cli.reply_delay_ms {
            builder = builder.set_override(
                "chat.reply_delay_ms",
                i64::try_from(delay).unwrap_or(i64::MAX),
            )?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("server.timeout_disabled", td)?;
        }
        if let Some(format) = cli.log_format {
            builder = builder.set_override("log.format", format)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if Language::from_code(&self.chat.default_language).is_none() {
            return Err(config::ConfigError::Message(format!(
                "unsupported chat.default_language: {}",
                self.chat.default_language
            )));
        }
        if !matches!(self.log.format.as_str(), "pretty" | "json") {
            return Err(config::ConfigError::Message(format!(
                "log.format must be \"pretty\" or \"json\", got {}",
                self.log.format
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat.reply_delay_ms)
    }

    #[must_use]
    pub fn default_language(&self) -> Language {
        Language::from_code(&self.chat.default_language).unwrap_or_default()
    }

    /// `None` when the timeout middleware is switched off.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        (!self.server.timeout_disabled)
            .then(|| Duration::from_secs(self.server.request_timeout_secs))
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.visitors.idle_timeout_secs)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.visitors.sweep_interval_secs.max(1))
    }
}

fn format_for(path: &str) -> FileFormat {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("toml") => FileFormat::Toml,
        Some("json") => FileFormat::Json,
        _ => FileFormat::Yaml,
    }
}
