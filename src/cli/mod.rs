//! CLI module for chatline.
//!
//! - Argument parsing
//! - Version display
//! - Command dispatch against a [`ChatClient`]
//!
//! ```ignore
//! use chatline::cli::{parse_args, run_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_command(&client, command).await?;
//! ```

pub mod args;
pub mod output;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand, USAGE};
pub use output::{format_conversation_line, format_message, PrintCallbacks};
pub use version::{version_string, VERSION};

use std::future::Future;
use std::io;

use color_eyre::Result;
use futures::future;
use tracing::warn;

use crate::cache::MessageReconciler;
use crate::chat::ChatClient;

/// Execute one command.
///
/// Sending stops early on Ctrl-C; the partial reply is discarded.
pub async fn run_command(client: &ChatClient, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => println!("{}", version_string()),
        CliCommand::Help => println!("{}", USAGE),
        CliCommand::List { offset } => {
            let page = client.list_conversations(offset).await?;
            if page.conversations.is_empty() {
                eprintln!("no conversations");
            }
            for conversation in &page.conversations {
                println!("{}", format_conversation_line(conversation));
            }
            if page.has_more() {
                let next = offset as usize + page.conversations.len();
                eprintln!("more: chatline --list --offset {}", next);
            }
        }
        CliCommand::History { conversation_id } => {
            let snapshot = client.snapshot(&conversation_id).await?;
            if let Some(title) = &snapshot.title {
                println!("# {}\n", title);
            }
            for message in &snapshot.messages {
                println!("{}\n", format_message(message));
            }
        }
        CliCommand::Send {
            conversation_id,
            message,
        } => {
            let mut reconciler = MessageReconciler::new();
            let mut callbacks = PrintCallbacks::new();
            let cancel = cancel_on(tokio::signal::ctrl_c());
            client
                .send_until(
                    &mut reconciler,
                    conversation_id.as_deref(),
                    &message,
                    &mut callbacks,
                    cancel,
                )
                .await?;
        }
    }
    Ok(())
}

/// Resolve when `signal` fires.
///
/// If the handler cannot be installed the returned future never resolves, so
/// the send runs to completion instead of being cancelled immediately.
async fn cancel_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!(error = %e, "Ctrl-C handler unavailable; sending without cancellation");
        future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_on_resolves_when_signal_fires() {
        let fired = tokio::time::timeout(Duration::from_secs(1), cancel_on(async { Ok(()) })).await;
        assert!(fired.is_ok());
    }

    #[tokio::test]
    async fn test_cancel_on_never_resolves_without_handler() {
        let signal = async { Err(io::Error::new(io::ErrorKind::Other, "no signal handler")) };
        let fired = tokio::time::timeout(Duration::from_millis(50), cancel_on(signal)).await;
        assert!(fired.is_err());
    }
}
