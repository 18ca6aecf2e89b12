//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cache::CacheStats;
use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format.
    ///
    /// `cache` ends up in the JSON metadata block.
    fn format(&self, format: OutputFormat, cache: Option<CacheStats>) -> Result<String>;
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat, cache: Option<CacheStats>) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self, cache)?),
        }
    }
}

/// A gateway result paired with its table rows.
///
/// JSON output serializes `data` in full; the table shows `rows`.
pub struct Report<'a, J: ?Sized, R> {
    pub data: &'a J,
    pub rows: Vec<R>,
}

impl<'a, J: ?Sized, R> Report<'a, J, R> {
    pub fn new(data: &'a J, rows: Vec<R>) -> Self {
        Self { data, rows }
    }
}

impl<J: Serialize + ?Sized, R: Tabled> Formattable for Report<'_, J, R> {
    fn format(&self, format: OutputFormat, cache: Option<CacheStats>) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(&self.rows)),
            OutputFormat::Json => Ok(json::format_json(self.data, cache)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(
    data: &T,
    format: OutputFormat,
    cache: Option<CacheStats>,
) -> Result<()> {
    let output = data.format(format, cache)?;
    println!("{}", output);
    Ok(())
}
