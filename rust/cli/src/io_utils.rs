//! File and stdin helpers shared by the commands.
//!
//! Model files hold the JSON produced by [`TrainedModel::persist`]. A path
//! ending in `.zst` is Zstandard-compressed on write and decompressed on
//! read; anything else is stored as plain JSON.

use std::io::BufRead;
use std::path::Path;

use hucfr_ai::TrainedModel;

use crate::error::CliError;

/// Compression level for `.zst` model files.
const ZSTD_LEVEL: i32 = 3;

/// Reads one trimmed line; `None` on EOF or a read error.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use hucfr_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "zst")
}

/// Loads a model written by [`write_model`].
///
/// # Errors
///
/// `CliError::Io` when the file cannot be read, `CliError::Model` when it
/// does not decompress or does not hold a model.
pub fn read_model(path: &Path) -> Result<TrainedModel, CliError> {
    let raw = std::fs::read(path).map_err(|e| {
        CliError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })?;
    let bytes = if is_compressed(path) {
        zstd::stream::decode_all(raw.as_slice())
            .map_err(|e| CliError::Model(format!("{}: {}", path.display(), e)))?
    } else {
        raw
    };
    TrainedModel::restore(&bytes).map_err(|e| CliError::Model(format!("{}: {}", path.display(), e)))
}

/// Persists `model` to `path`, creating parent directories as needed.
pub fn write_model(path: &Path, model: &TrainedModel) -> Result<(), CliError> {
    ensure_parent_dir(path)?;
    let json = model.persist()?;
    let bytes = if is_compressed(path) {
        zstd::stream::encode_all(json.as_slice(), ZSTD_LEVEL)?
    } else {
        json
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Ensure parent directory exists for given path, creating if needed.
pub fn ensure_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", parent.display(), e),
            ))
        })?;
    }
    Ok(())
}
