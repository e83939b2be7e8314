mod cleanup_task;
mod game_registry;
mod game_session;
mod server_config;
mod web_server;

use clap::Parser;
use common::{log, log_error, logger};

use cleanup_task::CleanupTask;
use game_registry::GameRegistry;
use server_config::ServerConfig;
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// Path to the YAML server config; defaults apply when the file is absent.
    #[arg(long, default_value = "server_config.yaml")]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = match ServerConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            log_error!("{}", err);
            return Err(err.into());
        }
    };

    let registry = GameRegistry::new();

    let cleanup_task = CleanupTask::new(
        registry.clone(),
        config.cleanup_check_interval(),
        config.inactivity_timeout(),
    );
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    log!("Tic-tac-toe server starting");
    run_web_server(registry, &config).await;

    log!("Server shut down gracefully");
    Ok(())
}
