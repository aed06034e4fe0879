pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::clock::SystemClock;
pub use crate::adapters::display::TerminalDisplay;
pub use crate::adapters::store::FileStore;
pub use crate::adapters::webhook::{BeaconTransport, FormTransport};
pub use crate::config::{CliConfig, Command};
pub use crate::core::engine::LandingEngine;
pub use crate::core::registration::{DeliveryOutcome, RegistrationPipeline, REGISTRATION_KEY};
pub use crate::domain::model::{ConfirmationView, RegistrationForm, RegistrationRecord};
pub use crate::utils::error::{LandingError, Result};
