//! Rendering of query results for stdout.

use std::fmt;
use std::fmt::Write as _;

use crate::network::InterfaceAddress;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One tab-separated line per address.
    #[default]
    Text,
    /// A pretty-printed JSON array.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Renders `addresses` in the given format.
///
/// Text output is `name<TAB>family<TAB>address<TAB>flags`, one line per
/// address, each terminated by a newline. An empty slice renders as an
/// empty string (text) or `[]` (JSON).
///
/// # Errors
///
/// Returns the serializer error if JSON encoding fails.
pub fn render(
    addresses: &[InterfaceAddress],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(addresses)),
        OutputFormat::Json => serde_json::to_string_pretty(addresses),
    }
}

fn render_text(addresses: &[InterfaceAddress]) -> String {
    addresses.iter().fold(String::new(), |mut out, a| {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}",
            a.name(),
            a.family(),
            a.text(),
            a.flags()
        );
        out
    })
}
