use crate::common::file_utils;
use crate::core::SnapshotTarget;
use crate::errors::BridgeError;
use crate::operations::op_helper::{with_status, BridgeContext};
use anyhow::{Context, Result};
use bytes::Bytes;
use clap::ArgMatches;
use futures::{Stream, StreamExt};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

pub async fn handle_snapshot_cli(ctx: &BridgeContext, args: &ArgMatches) -> Result<()> {
    let op_start_time = Instant::now();
    let webcam_name = args
        .get_one::<String>("webcam")
        .context("Missing --webcam argument for snapshot command")?;
    let output_dir = args
        .get_one::<String>("output")
        .cloned()
        .unwrap_or_else(|| ctx.settings.output_directory.clone());

    info!("📸 Taking snapshot of '{}'", webcam_name);
    let snapshot = ctx
        .snapshot_proxy
        .take_snapshot(SnapshotTarget::Named(webcam_name.clone()), &ctx.provider)
        .await
        .map_err(with_status)?;

    let dir = PathBuf::from(&output_dir);
    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    let filename = file_utils::generate_timestamped_filename(
        snapshot.webcam(),
        &ctx.settings.filename_timestamp_format,
        "jpg",
    );
    let file_path = dir.join(filename);
    let written = write_snapshot(snapshot, &file_path).await?;

    info!(
        "✅ Saved snapshot of '{}' ({} bytes) to {} in {:?}",
        webcam_name,
        written,
        file_path.display(),
        op_start_time.elapsed()
    );
    println!("{}", file_path.display());
    Ok(())
}

/// Drains `chunks` into `{file_path}.part` and renames it into place once
/// the body is complete. A failed body leaves nothing behind.
pub async fn write_snapshot<S>(chunks: S, file_path: &Path) -> Result<usize>
where
    S: Stream<Item = Result<Bytes, BridgeError>> + Unpin,
{
    let mut part_path = file_path.as_os_str().to_owned();
    part_path.push(".part");
    let part_path = PathBuf::from(part_path);

    match drain_to_file(chunks, &part_path).await {
        Ok(written) => {
            fs::rename(&part_path, file_path)
                .await
                .with_context(|| format!("Failed to move snapshot into {}", file_path.display()))?;
            Ok(written)
        }
        Err(e) => {
            warn!("⚠️ Discarding partial snapshot {}", part_path.display());
            if let Err(rm_err) = fs::remove_file(&part_path).await {
                debug!("Could not remove {}: {}", part_path.display(), rm_err);
            }
            Err(e)
        }
    }
}

async fn drain_to_file<S>(mut chunks: S, path: &Path) -> Result<usize>
where
    S: Stream<Item = Result<Bytes, BridgeError>> + Unpin,
{
    let mut file = File::create(path)
        .await
        .with_context(|| format!("Failed to create file {}", path.display()))?;
    let mut written = 0usize;
    let mut count = 0usize;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(with_status)?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        written += chunk.len();
        count += 1;
    }
    file.flush().await?;
    debug!("Wrote {} chunk(s) to {}", count, path.display());
    Ok(written)
}
