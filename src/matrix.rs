//! A rectangular grid of strings parsed from tab-delimited text.

use std::io::BufRead;
use std::io::{self};

pub mod reader;

pub use reader::Reader;

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error associated with parsing a matrix.
#[derive(Debug)]
pub enum ParseError {
    /// A row had a different number of fields than the header row.
    RaggedRow {
        /// The line number of the offending row.
        line_no: usize,

        /// The number of fields in the header row.
        expected: usize,

        /// The number of fields in the offending row.
        found: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::RaggedRow {
                line_no,
                expected,
                found,
            } => write!(
                f,
                "invalid number of fields at line {line_no}: expected {expected} fields, found \
                 {found} fields"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// An error related to a [`Matrix`].
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// A parse error.
    Parse(ParseError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Parse(err) => write!(f, "parse error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////////////////////
// Matrix
////////////////////////////////////////////////////////////////////////////////////////

/// A rectangular grid of strings.
///
/// The first row is the header row. Every other row has the same number of
/// columns as the header row.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Matrix {
    /// The rows, header row first.
    rows: Vec<Vec<String>>,
}

impl Matrix {
    /// Attempts to parse a [`Matrix`] from raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use profiledata::matrix::Matrix;
    ///
    /// let text = "# DATA_TYPE\tCNA\nGENE_ID\tCOMMON\tS1\tS2\n672\tBRCA1\t-1\t0\n";
    /// let matrix = Matrix::parse(text)?;
    ///
    /// assert_eq!(matrix.num_rows(), 2);
    /// assert_eq!(matrix.num_columns(), 4);
    /// assert_eq!(matrix.get(1, 2), Some("-1"));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_reader(Reader::new(text.as_bytes()))
    }

    /// Attempts to read a [`Matrix`] from a [`Reader`].
    pub fn from_reader<T>(mut reader: Reader<T>) -> Result<Self>
    where
        T: BufRead,
    {
        let mut rows: Vec<Vec<String>> = Vec::new();

        for result in reader.rows() {
            let (line_no, fields) = result.map_err(Error::Io)?;

            if let Some(header) = rows.first() {
                if header.len() != fields.len() {
                    return Err(Error::Parse(ParseError::RaggedRow {
                        line_no,
                        expected: header.len(),
                        found: fields.len(),
                    }));
                }
            }

            rows.push(fields);
        }

        Ok(Self { rows })
    }

    /// Gets all rows, header row first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Gets the header row (if the matrix is not empty).
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Gets the rows after the header row.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }

    /// Gets a single cell.
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Gets the number of rows, including the header row.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Gets the number of columns.
    pub fn num_columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or_default()
    }

    /// Whether the matrix holds no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes self and returns the rows.
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}
