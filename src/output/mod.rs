//! Output formatting for probe results
//!
//! Result lines go to stdout and nothing else does, so the output can be
//! piped straight into other tools. Failures reported under the continue
//! policy are formatted here too but are written to stderr by the caller.

mod formatter;

pub use formatter::{JsonFormatter, OutputFormatter, PlainFormatter};

use crate::types::OutputFormat;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter for the requested output format
    pub fn create_formatter(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Plain => Box::new(PlainFormatter),
            OutputFormat::Json => Box::new(JsonFormatter),
        }
    }
}
