//! Runtime configuration for the relay server and the telemetry publisher.
//!
//! Every value is read from the environment (after `.env` has been loaded by
//! the binary) and falls back to a placeholder that has to be replaced before
//! talking to real services.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_KEY: &str = "YOUR_GROQ_API_KEY_HERE";
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";

pub const DEFAULT_BROKER_HOST: &str = "YOUR DEVICE IP";
pub const DEFAULT_BROKER_PORT: u16 = 1883;
pub const DEFAULT_CLIENT_ID: &str = "crane-publisher";
pub const DEFAULT_TOPIC: &str = "crane/operations";
pub const DEFAULT_KEEP_ALIVE_SECS: u64 = 60;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// Connection details for the chat-completion API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: DEFAULT_API_KEY.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_key: lookup("GROQ_API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            api_url: lookup("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: String,
    pub upstream: UpstreamConfig,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_addr: lookup("RELAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            upstream: UpstreamConfig::from_lookup(&lookup),
        }
    }
}

/// Broker and loop settings for the telemetry publisher.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub broker_host: String,
    pub broker_port: u16,
    pub client_id: String,
    pub topic: String,
    pub keep_alive: Duration,
    pub interval: Duration,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            broker_host: DEFAULT_BROKER_HOST.to_string(),
            broker_port: DEFAULT_BROKER_PORT,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            keep_alive: Duration::from_secs(DEFAULT_KEEP_ALIVE_SECS),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl PublisherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            broker_host: lookup("MQTT_BROKER_HOST")
                .unwrap_or_else(|| DEFAULT_BROKER_HOST.to_string()),
            broker_port: parse_or(&lookup, "MQTT_BROKER_PORT", DEFAULT_BROKER_PORT)?,
            client_id: lookup("MQTT_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            topic: lookup("MQTT_TOPIC").unwrap_or_else(|| DEFAULT_TOPIC.to_string()),
            keep_alive: Duration::from_secs(parse_or(
                &lookup,
                "MQTT_KEEP_ALIVE_SECS",
                DEFAULT_KEEP_ALIVE_SECS,
            )?),
            interval: Duration::from_millis(parse_or(
                &lookup,
                "PUBLISH_INTERVAL_MS",
                DEFAULT_INTERVAL_MS,
            )?),
        })
    }

    pub fn broker_addr(&self) -> String {
        format!("{}:{}", self.broker_host, self.broker_port)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
