use std::process::ExitCode;

use ais_consumer::{settings::Settings, startup::App};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    settings.init_tracer();

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("a crypto provider is already installed");
    }

    let app = App::build(&settings);

    info!("starting ais-consumer...");

    match app.run().await {
        Ok(snapshot) => {
            info!(total_ships = snapshot.total_ships, "ais-consumer finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("ais-consumer failed: {e:?}");
            ExitCode::FAILURE
        }
    }
}
