use clap::Parser;
use event_landing::domain::ports::Clock;
use event_landing::utils::{logger, validation::Validate};
use event_landing::{
    BeaconTransport, CliConfig, Command, FileStore, FormTransport, LandingEngine,
    RegistrationForm, RegistrationPipeline, SystemClock, TerminalDisplay,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting event-landing CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let command = config.command.clone();
    let debug_webhook = config.debug_webhook;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = FileStore::new(&config.store_path);
    let beacon = Arc::new(BeaconTransport::new(config.webhook_url.clone()));
    let fallback = Arc::new(FormTransport::new(config.webhook_url.clone()));
    let pipeline = RegistrationPipeline::new(store, config, Arc::clone(&clock), beacon, fallback);
    let engine = LandingEngine::new(pipeline, clock);

    match command {
        Command::Countdown { ticks } => {
            if debug_webhook {
                let outcome = engine.send_debug_webhook().await;
                tracing::info!("Debug webhook outcome: {:?}", outcome);
            }
            let mut display = TerminalDisplay::new();
            engine.run_countdown(Some(&mut display), ticks).await;
            println!();
        }
        Command::Register {
            first_name,
            last_name,
            email,
            specialty,
            stage,
            agree,
        } => {
            let form = RegistrationForm {
                first_name,
                last_name,
                email,
                specialty,
                stage,
                agreement_accepted: agree,
            };
            match engine.run_registration(&form).await {
                Ok(view) => {
                    println!(
                        "✅ {}",
                        view.greeting
                            .unwrap_or_else(|| "Registration received.".to_string())
                    );
                    if let Some(line) = view.registered_line {
                        println!("{}", line);
                    }
                }
                Err(e) => {
                    tracing::error!("❌ Registration rejected: {}", e);
                    eprintln!("❌ {}", e);
                    std::process::exit(1);
                }
            }
        }
        Command::Confirm => {
            let view = engine.run_confirmation().await;
            match view.greeting {
                Some(greeting) => {
                    println!("{}", greeting);
                    if let Some(line) = view.registered_line {
                        println!("{}", line);
                    }
                }
                None => println!("Thank you for registering!"),
            }
        }
    }

    Ok(())
}
