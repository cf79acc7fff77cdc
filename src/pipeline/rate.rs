//! Driver rate source: a single line holding cents per mile.

use crate::config::DEFAULT_RATE_CENTS;
use crate::error::SettlementError;
use std::path::Path;
use tracing::debug;

/// Parse the first line of a rate source. An empty source means the default rate.
pub fn parse_rate(source: &str) -> Result<u32, SettlementError> {
    let line = source.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        debug!("Rate source empty, using default {}", DEFAULT_RATE_CENTS);
        return Ok(DEFAULT_RATE_CENTS);
    }
    line.parse().map_err(|_| SettlementError::InvalidRate {
        value: line.to_string(),
    })
}

/// Read and parse a rate file.
pub async fn read_rate_file(path: &Path) -> Result<u32, SettlementError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        SettlementError::RateSourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    parse_rate(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_uses_default() {
        assert_eq!(parse_rate("").unwrap(), 24);
        assert_eq!(parse_rate("\n").unwrap(), 24);
    }

    #[test]
    fn reads_first_line_only() {
        assert_eq!(parse_rate("31\nignored").unwrap(), 31);
        assert_eq!(parse_rate("  28  \r\n").unwrap(), 28);
    }

    #[test]
    fn non_numeric_fails() {
        let err = parse_rate("twenty").unwrap_err();
        assert!(matches!(err, SettlementError::InvalidRate { ref value } if value == "twenty"));
        assert!(parse_rate("-5").is_err());
        assert!(parse_rate("24.5").is_err());
    }

    #[tokio::test]
    async fn reads_rate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rate.txt");
        std::fs::write(&path, "27\n").unwrap();
        assert_eq!(read_rate_file(&path).await.unwrap(), 27);
    }

    #[tokio::test]
    async fn missing_rate_file_is_unreadable() {
        let err = read_rate_file(Path::new("/nonexistent/rate.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, SettlementError::RateSourceUnreadable { .. }));
    }
}
