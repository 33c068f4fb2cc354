// FTP operations (list/retrieve)

use crate::errors::RemoteError;
use crate::models::RemoteEntry;
use chrono::{DateTime, Utc};
use std::io::Read;
use std::str::FromStr;
use suppaftp::list::File;
use suppaftp::types::FileType;
use suppaftp::FtpStream;
use tracing::{debug, error, info, instrument};

/// List the current directory
#[instrument(skip(stream))]
pub fn list_entries(stream: &mut FtpStream) -> Result<Vec<RemoteEntry>, RemoteError> {
    let lines = stream.list(None).map_err(|e| {
        error!(error = %e, "Failed to list directory");
        RemoteError::ListingFailed(format!("LIST failed: {}", e))
    })?;

    let entries = parse_listing(&lines);
    debug!(lines = lines.len(), entries = entries.len(), "Directory listed");
    Ok(entries)
}

/// Parse raw LIST output into entries, skipping directories and
/// lines that are not file records (such as `total 42`)
pub fn parse_listing(lines: &[String]) -> Vec<RemoteEntry> {
    lines
        .iter()
        .filter_map(|line| match File::from_str(line) {
            Ok(file) if file.is_directory() => None,
            Ok(file) => Some(RemoteEntry::new(
                file.name(),
                file.size() as u64,
                DateTime::<Utc>::from(file.modified()),
            )),
            Err(e) => {
                debug!(line = %line, error = %e, "Skipping unparseable listing line");
                None
            }
        })
        .collect()
}

/// Download `name` from the current directory into memory
#[instrument(skip(stream))]
pub fn retrieve_file(stream: &mut FtpStream, name: &str) -> Result<Vec<u8>, RemoteError> {
    stream.transfer_type(FileType::Binary).map_err(|e| {
        error!(error = %e, "Failed to switch to binary mode");
        RemoteError::RetrieveFailed(format!("TYPE I failed: {}", e))
    })?;

    let mut data = stream.retr_as_stream(name).map_err(|e| {
        error!(error = %e, name = %name, "Failed to start transfer");
        RemoteError::RetrieveFailed(format!("RETR {} failed: {}", name, e))
    })?;

    let mut buffer = Vec::new();
    let read = data.read_to_end(&mut buffer);
    // Always finalize so the control connection reads the transfer reply
    let finalized = stream.finalize_retr_stream(data);

    read.map_err(|e| {
        error!(error = %e, name = %name, "Failed to read data stream");
        RemoteError::ReadFailed(format!("Reading {} failed: {}", name, e))
    })?;
    finalized.map_err(|e| {
        error!(error = %e, name = %name, "Transfer did not complete");
        RemoteError::ReadFailed(format!("Transfer of {} incomplete: {}", name, e))
    })?;

    info!(name = %name, size = buffer.len(), "File retrieved");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_parse_listing_reads_posix_records() {
        let entries = parse_listing(&lines(&[
            "total 3",
            "-rw-r--r--   1 ftp      ftp         23456 Jan 10  2023 sn.0003",
            "-rw-r--r--   1 ftp      ftp         34567 Jan 10  2023 sn.0004",
            "drwxr-xr-x   2 ftp      ftp          4096 Jan 10  2023 archive",
        ]));

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["sn.0003", "sn.0004"]);
        assert_eq!(entries[0].size, 23456);
        assert_eq!(entries[1].size, 34567);
    }

    #[test]
    fn test_parse_listing_skips_garbage() {
        assert!(parse_listing(&lines(&["", "not a listing line"])).is_empty());
    }
}
