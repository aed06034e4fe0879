use crate::domain::model::EventWindow;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

const USER_AGENT: &str = concat!("event-landing/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Parser)]
#[command(name = "event-landing")]
#[command(about = "Live-event landing page behavior: countdown, registration, webhook delivery")]
pub struct CliConfig {
    #[arg(long, default_value = "https://hooks.example.com/registration")]
    pub webhook_url: String,

    #[arg(long, default_value = "./data")]
    pub store_path: String,

    #[arg(long, default_value = "2025-09-08T20:00:00-04:00")]
    pub event_start: DateTime<Utc>,

    #[arg(long, default_value = "2025-09-08T21:00:00-04:00")]
    pub event_end: DateTime<Utc>,

    #[arg(long, default_value = "https://example.org/landing")]
    pub page_source: String,

    /// Delay between a successful submission and the confirmation view.
    #[arg(long, default_value_t = 1000)]
    pub submit_delay_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Send one synthetic webhook payload on startup")]
    pub debug_webhook: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the 1-second status clock
    Countdown {
        #[arg(long, help = "Stop after this many ticks (runs until interrupted when omitted)")]
        ticks: Option<u64>,
    },
    /// Validate and submit a registration
    Register {
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        specialty: String,
        #[arg(long, default_value = "")]
        stage: String,
        #[arg(long, help = "Agree to receive event updates")]
        agree: bool,
    },
    /// Render the confirmation view for the stored registration
    Confirm,
}

impl ConfigProvider for CliConfig {
    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    fn event_window(&self) -> EventWindow {
        // Invariant start < end is checked by validate() at startup.
        EventWindow {
            start: self.event_start,
            end: self.event_end,
        }
    }

    fn page_source(&self) -> &str {
        &self.page_source
    }

    fn user_agent(&self) -> &str {
        USER_AGENT
    }

    fn submit_delay_ms(&self) -> u64 {
        self.submit_delay_ms
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("webhook_url", &self.webhook_url)?;
        validate_non_empty_string("store_path", &self.store_path)?;
        validate_non_empty_string("page_source", &self.page_source)?;
        validate_range("submit_delay_ms", self.submit_delay_ms, 1000, 1500)?;
        EventWindow::new(self.event_start, self.event_end)?;
        Ok(())
    }
}
