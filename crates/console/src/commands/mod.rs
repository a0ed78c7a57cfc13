//! Subcommand handlers. Each one drives a controller and prints the
//! result; toasts are emitted by the controllers themselves.

pub mod events;
pub mod press;
pub mod sliders;
pub mod videos;

use std::path::Path;
use std::sync::Arc;

use herald_client::HeraldClient;
use herald_core::attachment::{Attachment, PreviewRegistry};
use herald_core::CoreError;

use crate::cli::Command;
use crate::confirm::{AssumeAnswer, Confirm};
use crate::controller::OperationError;
use crate::notify::Notifier;

/// Everything a command needs: the API client, the notification sink,
/// the confirmation prompt and the preview registry for picked files.
pub struct Console {
    client: HeraldClient,
    notifier: Arc<dyn Notifier>,
    prompt: Arc<dyn Confirm>,
    previews: PreviewRegistry,
}

impl Console {
    pub fn new(client: HeraldClient, notifier: Arc<dyn Notifier>, prompt: Arc<dyn Confirm>) -> Self {
        Self {
            client,
            notifier,
            prompt,
            previews: PreviewRegistry::new(),
        }
    }

    pub fn client(&self) -> &HeraldClient {
        &self.client
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// The prompt to use for a destructive action; `--yes` skips it.
    pub fn confirm(&self, assume_yes: bool) -> Arc<dyn Confirm> {
        if assume_yes {
            Arc::new(AssumeAnswer(true))
        } else {
            Arc::clone(&self.prompt)
        }
    }
}

pub async fn run(console: &Console, command: Command) -> anyhow::Result<()> {
    let result = match command {
        Command::Events(cmd) => events::run(console, cmd).await,
        Command::Press(cmd) => press::run(console, cmd).await,
        Command::Sliders(cmd) => sliders::run(console, cmd).await,
        Command::Videos(cmd) => videos::run(console, cmd).await,
    };
    result.map_err(anyhow::Error::from)
}

/// Print one line per row, or `empty` when there are none.
pub(crate) fn print_rows(rows: &[String], empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    for row in rows {
        println!("{row}");
    }
}

/// Read a picked file and turn it into an attachment.
pub(crate) async fn read_attachment(
    previews: &PreviewRegistry,
    path: &Path,
) -> Result<Attachment, CoreError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CoreError::Attachment(format!("cannot read {}: {e}", path.display())))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Attachment::from_bytes(previews, file_name, bytes)
}

/// Turn an attachment that failed to load into a reported failure.
pub(crate) fn attachment_failed(
    notifier: &dyn Notifier,
    message: &str,
    err: CoreError,
) -> OperationError {
    tracing::warn!(error = %err, "Attachment rejected");
    notifier.error(message);
    OperationError::new(message, err)
}
