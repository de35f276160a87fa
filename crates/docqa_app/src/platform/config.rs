use std::time::Duration;

use clap::Parser;
use docqa_engine::{BackendSettings, DEFAULT_BACKEND_URL};
use log::LevelFilter;

use super::logging::LogDestination;

/// Upload a document to a RAG question-answering service and ask questions about it.
#[derive(Debug, Clone, Parser)]
#[command(name = "docqa", version)]
pub struct AppConfig {
    /// Base url of the RAG backend.
    #[arg(long, env = "DOCQA_BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    pub backend_url: String,

    #[arg(long, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Upload covers server-side ingestion, so it gets the longest budget.
    #[arg(long, default_value_t = 120)]
    pub upload_timeout_secs: u64,

    #[arg(long, default_value_t = 60)]
    pub ask_timeout_secs: u64,

    #[arg(long, default_value_t = 5)]
    pub health_timeout_secs: u64,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    pub log_level: LevelFilter,

    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log_destination: LogDestination,

    /// Skip probing the backend at startup.
    #[arg(long)]
    pub no_health_check: bool,
}

impl AppConfig {
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.backend_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            upload_timeout: Duration::from_secs(self.upload_timeout_secs),
            ask_timeout: Duration::from_secs(self.ask_timeout_secs),
            health_timeout: Duration::from_secs(self.health_timeout_secs),
        }
    }
}

fn parse_log_level(raw: &str) -> Result<LevelFilter, String> {
    docqa_logging::parse_level(raw).ok_or_else(|| format!("unknown log level '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_backend_settings() {
        let config = AppConfig::try_parse_from(["docqa"]).unwrap();
        let settings = config.backend_settings();
        let defaults = BackendSettings::default();

        assert_eq!(settings.upload_timeout, defaults.upload_timeout);
        assert_eq!(settings.ask_timeout, defaults.ask_timeout);
        assert_eq!(settings.health_timeout, defaults.health_timeout);
        assert_eq!(settings.connect_timeout, defaults.connect_timeout);
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.log_destination, LogDestination::File);
    }

    #[test]
    fn flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "docqa",
            "--backend-url",
            "http://rag.internal:9000/api",
            "--ask-timeout-secs",
            "5",
            "--log-level",
            "DEBUG",
            "--log-destination",
            "both",
            "--no-health-check",
        ])
        .unwrap();

        assert_eq!(config.backend_url, "http://rag.internal:9000/api");
        assert_eq!(config.backend_settings().ask_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_destination, LogDestination::Both);
        assert!(config.no_health_check);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(AppConfig::try_parse_from(["docqa", "--log-level", "loud"]).is_err());
    }
}
