//! Debug logging to a file under the data directory

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use vfs_loader::config::paths;

/// Log file for this run, named by start time
fn log_file_path(logs_dir: &Path) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    logs_dir.join(format!("vfs-loader-{}-{}.log", stamp, std::process::id()))
}

/// Install the tracing subscriber when `--debug` is given
///
/// Without `--debug` nothing is installed and the tool stays quiet. With it,
/// events go to a fresh file so stdout and stderr carry only command output.
/// `RUST_LOG` narrows the filter; the default level is `debug`.
pub fn init_logging(debug: bool) -> Result<Option<PathBuf>> {
    if !debug {
        return Ok(None);
    }

    let logs_dir = paths::data_dir().join("logs");
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create log directory: {}", logs_dir.display()))?;

    let path = log_file_path(&logs_dir);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();

    Ok(Some(path))
}
