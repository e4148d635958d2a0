use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use futures_util::StreamExt;
use harvester_core::final_path_segment;

use crate::fetch::map_reqwest_error;
use crate::DownloadError;

/// Where the archive behind `url` lands inside `dest_dir`.
///
/// Two links sharing a final segment map to the same file; the later download
/// overwrites the earlier one.
pub fn archive_destination(url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
    let name = final_path_segment(url);
    if name.is_empty() || name == "." || name == ".." {
        return Err(DownloadError::NoFileName {
            url: url.to_string(),
        });
    }
    Ok(dest_dir.join(name))
}

/// Stream a successful response body into its destination file.
///
/// A failure part-way leaves whatever was written on disk.
pub(crate) async fn stream_to_file(
    response: reqwest::Response,
    url: &str,
    dest_dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let path = archive_destination(url, dest_dir)?;
    let file = File::create(&path).map_err(|source| DownloadError::CreateFile {
        path: path.clone(),
        source,
    })?;
    let write_error = |source| DownloadError::Write {
        path: path.clone(),
        source,
    };

    let mut writer = BufWriter::new(file);
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        writer.write_all(&chunk).map_err(write_error)?;
        written += chunk.len() as u64;
    }
    writer.flush().map_err(write_error)?;

    engine_info!("Wrote {} bytes from {} to {:?}", written, url, path);
    Ok(path)
}
