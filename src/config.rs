// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;

use crate::filter::{FilterPolicy, PipelineOptions, QuoteStyle};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Directory for the daily rolling log file.
    pub log_dir: String,
    pub filter: PipelineOptions,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://comments.db?mode=rwc".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address like 0.0.0.0:3000");

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let policy = match env::var("COMMENT_FILTER_POLICY") {
            Ok(v) => v.parse::<FilterPolicy>().expect("COMMENT_FILTER_POLICY is invalid"),
            Err(_) => FilterPolicy::default(),
        };

        let quotes = match env::var("COMMENT_QUOTE_STYLE") {
            Ok(v) => v.parse::<QuoteStyle>().expect("COMMENT_QUOTE_STYLE is invalid"),
            Err(_) => QuoteStyle::default(),
        };

        let autolink = env::var("COMMENT_AUTOLINK")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            database_url,
            rust_log,
            bind_addr,
            log_dir,
            filter: PipelineOptions {
                policy,
                quotes,
                autolink,
            },
        }
    }
}

/// Anything other than an explicit "off" value counts as enabled.
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
