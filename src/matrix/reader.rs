//! A reader for tab-delimited matrix text.

use std::io::BufRead;
use std::io::{self};
use std::iter;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The delimiter between fields in a row.
pub const DELIMITER: char = '\t';

/// The prefix for a comment line.
pub const COMMENT_PREFIX: char = '#';

/// A row of fields read from the underlying reader, along with the (1-based)
/// line number it was read from.
pub type Row = (usize, Vec<String>);

/// A matrix text reader.
///
/// Blank lines and lines beginning with [`COMMENT_PREFIX`] are skipped.
#[derive(Clone, Debug)]
pub struct Reader<T>
where
    T: BufRead,
{
    /// The inner reader.
    inner: T,

    /// The number of raw lines read so far.
    line_no: usize,
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a matrix reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"GENE_ID\tCOMMON\tS1\n672\tBRCA1\t1.5";
    /// let reader = profiledata::matrix::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Gets the number of raw lines read so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Reads a raw, textual line from the underlying reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"# DATA_TYPE\tCNA\r\nGENE_ID\tCOMMON";
    /// let mut reader = profiledata::matrix::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 17);
    /// assert_eq!(buffer, "# DATA_TYPE\tCNA");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 14);
    /// assert_eq!(buffer, "GENE_ID\tCOMMON");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        let read = read_line(&mut self.inner, buffer)?;

        if read > 0 {
            self.line_no += 1;
        }

        Ok(read)
    }

    /// Attempts to read the next data row, skipping blank and comment lines.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"# Warning:  Unknown gene:  FOO\n\nGENE_ID\tCOMMON\tS1\n";
    /// let mut reader = profiledata::matrix::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    /// let (line_no, fields) = reader.read_row(&mut buffer)?.unwrap();
    ///
    /// assert_eq!(line_no, 3);
    /// assert_eq!(fields, vec!["GENE_ID", "COMMON", "S1"]);
    /// assert!(reader.read_row(&mut buffer)?.is_none());
    ///
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_row(&mut self, buffer: &mut String) -> io::Result<Option<Row>> {
        loop {
            if self.read_line_raw(buffer)? == 0 {
                return Ok(None);
            }

            if is_skipped(buffer) {
                continue;
            }

            let fields = buffer.split(DELIMITER).map(String::from).collect();
            return Ok(Some((self.line_no, fields)));
        }
    }

    /// Returns an iterator over the data rows in the underlying reader.
    pub fn rows(&mut self) -> impl Iterator<Item = io::Result<Row>> + '_ {
        let mut buffer = String::new();
        iter::from_fn(move || self.read_row(&mut buffer).transpose())
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self { inner, line_no: 0 }
    }
}

/// Whether a line carries no matrix data.
fn is_skipped(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(COMMENT_PREFIX)
}

/// Reads a line from a buffered reader, stripping the line ending.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}
