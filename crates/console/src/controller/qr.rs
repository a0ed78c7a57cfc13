//! Saving an event's QR code to disk.

use std::path::{Path, PathBuf};

use herald_client::AssetFetcher;
use herald_core::event::PhotoEvent;
use herald_core::CoreError;

use crate::controller::{FailureCause, OperationError};
use crate::notify::Notifier;

pub const QR_DOWNLOADED: &str = "QR Code downloaded successfully";
pub const QR_FAILED: &str = "Failed to download QR Code";

/// Fetch the event's QR image and write it into `out_dir` as
/// `<Title_With_Underscores>-QR.png`. Returns the written path.
pub async fn download_qr(
    fetcher: &dyn AssetFetcher,
    notifier: &dyn Notifier,
    event: &PhotoEvent,
    out_dir: &Path,
) -> Result<PathBuf, OperationError> {
    match save_qr(fetcher, event, out_dir).await {
        Ok(path) => {
            tracing::info!(event = %event.id, path = %path.display(), "QR code saved");
            notifier.success(QR_DOWNLOADED);
            Ok(path)
        }
        Err(cause) => {
            tracing::error!(event = %event.id, error = %cause, "QR download failed");
            notifier.error(QR_FAILED);
            Err(OperationError {
                message: QR_FAILED.to_string(),
                cause,
            })
        }
    }
}

async fn save_qr(
    fetcher: &dyn AssetFetcher,
    event: &PhotoEvent,
    out_dir: &Path,
) -> Result<PathBuf, FailureCause> {
    let url = event
        .qr_code
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("event {} has no QR code", event.id)))?;

    let bytes = fetcher.fetch_bytes(url).await?;
    let path = out_dir.join(event.qr_file_name());
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}
