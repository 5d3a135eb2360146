//! CSV file reading with decompression support
//!
//! [`CsvReader`] is the byte source: it opens a path, hands its bytes to a
//! [`CsvParser`], and closes the file when it goes out of scope, whichever
//! way the parse ends.

use crate::csv::CsvParser;
use crate::error::{CsvError, Result};
use crate::types::Table;
use s_zip::StreamingZipReader;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};

/// Label reported in errors for sources that have no path
const STREAM_LABEL: &str = "<stream>";

enum Source {
    Plain(BufReader<File>),
    Decompressed(Cursor<Vec<u8>>),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Plain(reader) => reader.read(buf),
            Source::Decompressed(cursor) => cursor.read(buf),
        }
    }
}

/// CSV file reader
///
/// A `.csv.zst`, `.csv.zip` or `.csv.gz` path must name a ZIP container;
/// its first `.csv` entry is decompressed and parsed. Raw gzip streams are
/// not supported. Any other path is read directly.
///
/// # Examples
///
/// ```no_run
/// use csvparse::CsvReader;
///
/// let reader = CsvReader::open("data.csv").unwrap();
/// let table = reader.read_table().unwrap();
///
/// for row in &table {
///     println!("{:?}", row.to_strings());
/// }
/// ```
pub struct CsvReader {
    source: Source,
    path: PathBuf,
}

impl CsvReader {
    /// Open CSV file - auto-detects compression from file extension
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::SourceUnavailable`] if the file cannot be opened
    /// or, for compressed paths, if the container has no readable entry.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        let source = if path_str.ends_with(".csv.zst")
            || path_str.ends_with(".csv.zip")
            || path_str.ends_with(".csv.gz")
        {
            Source::Decompressed(Cursor::new(read_compressed(path_ref)?))
        } else {
            let file =
                File::open(path_ref).map_err(|e| CsvError::source_unavailable(path_ref, e))?;
            Source::Plain(BufReader::new(file))
        };

        tracing::debug!(path = %path_ref.display(), "opened CSV source");

        Ok(CsvReader {
            source,
            path: path_ref.to_path_buf(),
        })
    }

    /// Path this reader was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the whole source into a table
    ///
    /// Consumes the reader, so the underlying file is closed before this
    /// returns, on success and on every error.
    pub fn read_table(self) -> Result<Table> {
        let CsvReader { source, path } = self;
        read_from(source, &path)
    }
}

fn read_compressed(path: &Path) -> Result<Vec<u8>> {
    let unavailable = |msg: String| CsvError::source_unavailable(path, io::Error::other(msg));

    let mut zip = StreamingZipReader::open(path)
        .map_err(|e| unavailable(format!("Failed to open ZIP: {}", e)))?;

    // Find first .csv entry
    let entry_name = zip
        .entries()
        .iter()
        .find(|e| e.name.ends_with(".csv"))
        .or_else(|| zip.entries().first())
        .ok_or_else(|| unavailable("No CSV entry found in archive".to_string()))?
        .name
        .clone();

    tracing::trace!(entry = %entry_name, "decompressing CSV entry");

    zip.read_entry_by_name(&entry_name)
        .map_err(|e| unavailable(format!("Failed to read ZIP entry: {}", e)))
}

fn read_from<R: Read>(reader: R, path: &Path) -> Result<Table> {
    let mut parser = CsvParser::new();
    for byte in reader.bytes() {
        let byte = byte.map_err(|e| CsvError::source_unavailable(path, e))?;
        if let Err(e) = parser.step(byte) {
            tracing::warn!(path = %path.display(), error = %e, "abandoning CSV parse");
            return Err(e);
        }
    }

    let table = parser.finish();
    tracing::debug!(path = %path.display(), rows = table.row_count(), "parsed CSV");
    Ok(table)
}

/// Parse the CSV file at `path` into a table
///
/// # Examples
///
/// ```no_run
/// let table = csvparse::parse("data.csv").unwrap();
/// println!("{} rows", table.row_count());
/// ```
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Table> {
    CsvReader::open(path)?.read_table()
}

/// Parse CSV from any byte stream
///
/// Read failures are reported as [`CsvError::SourceUnavailable`].
/// Wrap unbuffered readers in a [`BufReader`]: input is consumed one byte
/// at a time.
pub fn parse_reader<R: Read>(reader: R) -> Result<Table> {
    read_from(reader, Path::new(STREAM_LABEL))
}

/// Parse CSV held in memory
///
/// # Examples
///
/// ```
/// let table = csvparse::parse_bytes(b"\"x,y\",z\n").unwrap();
/// assert_eq!(table[0].to_strings(), vec!["x,y", "z"]);
/// ```
pub fn parse_bytes(bytes: &[u8]) -> Result<Table> {
    let mut parser = CsvParser::new();
    parser.feed(bytes)?;
    Ok(parser.finish())
}
