use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::language::LanguageTag;
use crate::web::models::WidgetConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server
    pub host: String,
    pub port: u16,

    // Generation service
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout: Duration,

    // Widget
    pub widget: WidgetSettings,
}

#[derive(Debug, Clone)]
pub struct WidgetSettings {
    pub customer_id: String,
    pub bot_name: String,
    pub primary_color: String,
    /// `None` means auto-detect per message.
    pub language: Option<LanguageTag>,
    pub greeting_message: String,
}

impl WidgetSettings {
    pub fn to_wire(&self) -> WidgetConfig {
        WidgetConfig {
            customer_id: self.customer_id.clone(),
            bot_name: self.bot_name.clone(),
            primary_color: self.primary_color.clone(),
            language: self
                .language
                .map(|tag| tag.as_str().to_string())
                .unwrap_or_else(|| "auto".to_string()),
            greeting_message: self.greeting_message.clone(),
        }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            customer_id: "demo".to_string(),
            bot_name: "Care Bot".to_string(),
            primary_color: "#6366f1".to_string(),
            language: None,
            greeting_message: "Hello! How can I help you with care services today?".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 150,
            temperature: 0.7,
            request_timeout: Duration::from_secs(30),
            widget: WidgetSettings::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);

        let widget_language = match lookup("WIDGET_LANGUAGE") {
            None => defaults.widget.language,
            Some(value) if value.trim().eq_ignore_ascii_case("auto") => None,
            Some(value) => Some(
                LanguageTag::from_code(&value)
                    .ok_or_else(|| anyhow!("WIDGET_LANGUAGE must be auto, ja, en or zh, got {value:?}"))?,
            ),
        };

        Ok(Self {
            host: string("HOST", defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            api_key: lookup("OPENAI_API_KEY").filter(|key| !key.trim().is_empty()),
            base_url: string("OPENAI_BASE_URL", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: string("OPENAI_MODEL", defaults.model),
            max_tokens: parse_var(&lookup, "MAX_TOKENS", defaults.max_tokens)?,
            temperature: parse_var(&lookup, "TEMPERATURE", defaults.temperature)?,
            request_timeout: Duration::from_secs(parse_var(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )?),
            widget: WidgetSettings {
                customer_id: string("WIDGET_CUSTOMER_ID", defaults.widget.customer_id),
                bot_name: string("WIDGET_BOT_NAME", defaults.widget.bot_name),
                primary_color: string("WIDGET_PRIMARY_COLOR", defaults.widget.primary_color),
                language: widget_language,
                greeting_message: string("WIDGET_GREETING", defaults.widget.greeting_message),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
