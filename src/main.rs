use chatline::chat::ChatClient;
use chatline::cli::{parse_args, run_command, version_string, CliCommand, USAGE};
use chatline::config::ClientConfig;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries only the reply.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatline=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("chatline: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    // Handle --version before any initialization
    if command == CliCommand::Version {
        println!("{}", version_string());
        return Ok(());
    }

    color_eyre::install()?;
    init_logging();

    let client = ChatClient::from_config(ClientConfig::from_env())?;
    run_command(&client, command).await
}
