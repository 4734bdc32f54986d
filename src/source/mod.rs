//! Address input source
//!
//! Produces a lazy, finite, non-restartable sequence of address strings from
//! a line-oriented UTF-8 input: one address per line, in input order, with
//! surrounding whitespace trimmed and blank lines skipped. A source that
//! cannot be opened fails loudly with a typed error instead of silently
//! producing zero items.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error produced when opening or reading an address source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The address file could not be opened; fatal to the run
    #[error("failed to open address file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be read from the input
    #[error("failed to read address line: {0}")]
    Read(#[from] io::Error),
}

/// Lazy iterator of trimmed, non-empty address lines
///
/// Each yielded address is an owned `String`; ownership transfers to the
/// consumer on handoff. The source is exhausted after one pass.
pub struct AddressSource {
    reader: Box<dyn BufRead + Send>,
}

impl std::fmt::Debug for AddressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressSource").finish_non_exhaustive()
    }
}

impl AddressSource {
    /// Open an address file
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Open` if the file cannot be opened. This error
    /// is fatal to a pipeline run and should surface immediately.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            reader: Box::new(BufReader::new(file)),
        })
    }

    /// Build a source from any buffered reader (used by tests)
    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }
}

impl Iterator for AddressSource {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let address = line.trim();
                    if !address.is_empty() {
                        return Some(Ok(address.to_string()));
                    }
                }
                Err(e) => return Some(Err(SourceError::Read(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn collect(input: &str) -> Vec<String> {
        AddressSource::from_reader(Cursor::new(input.to_string()))
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_one_address_per_line_in_order() {
        let addresses = collect("120 Little Creek Road\n74 Wingold Avenue\nSquare One\n");
        assert_eq!(
            addresses,
            vec!["120 Little Creek Road", "74 Wingold Avenue", "Square One"]
        );
    }

    #[test]
    fn test_blank_lines_skipped() {
        let addresses = collect("first\n\n\nsecond\n   \nthird\n");
        assert_eq!(addresses, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let addresses = collect("  7 Gaylord Place, St. Albert  \r\n");
        assert_eq!(addresses, vec!["7 Gaylord Place, St. Albert"]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("\n\n\n").is_empty());
    }

    #[test]
    fn test_missing_last_newline() {
        let addresses = collect("only line");
        assert_eq!(addresses, vec!["only line"]);
    }

    #[test]
    fn test_open_missing_file() {
        let err = AddressSource::open("/nonexistent/addresses.txt").unwrap_err();
        assert!(matches!(err, SourceError::Open { .. }));
    }

    #[test]
    fn test_open_real_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "120 Little Creek Road, Mississauga, Ontario").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "74 Wingold Avenue, North York, Ontario").unwrap();

        let addresses: Vec<String> = AddressSource::open(file.path())
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0], "120 Little Creek Road, Mississauga, Ontario");
    }
}
