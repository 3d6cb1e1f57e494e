use thiserror::Error;

/// Failure while reading or parsing one of the source tables.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
	/// The request itself failed.
	#[error("fetching {url} failed: {message}")]
	Fetch {
		/// Requested URL.
		url: String,
		/// Browser error text.
		message: String,
	},

	/// The server answered with a non-success status.
	#[error("fetching {url} returned HTTP {status}")]
	Http {
		/// Requested URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// A row did not match the table's columns.
	#[error("malformed {table} table: {message}")]
	Csv {
		/// Which table.
		table: &'static str,
		/// Parser error text.
		message: String,
	},
}

/// Failure while turning a positioned graph into something displayable.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
	/// A lookup table has no row for `key`.
	#[error("no {table} row for key {key:?}")]
	MissingRow {
		/// Which table.
		table: &'static str,
		/// The key that had no row.
		key: String,
	},

	/// Browser canvas call failed.
	#[error("canvas error: {0}")]
	Canvas(String),
}
