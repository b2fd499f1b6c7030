//! JSON output for a metadata mapping.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::types::{FetchResult, MetadataMap};

const INDENT: &[u8] = b"    ";

/// Write `metadata` as pretty JSON (4-space indent, enumeration order) to any writer.
pub fn render_to<W: Write>(writer: &mut W, metadata: &MetadataMap) -> FetchResult<()> {
    let mut ser = Serializer::with_formatter(&mut *writer, PrettyFormatter::with_indent(INDENT));
    metadata
        .serialize(&mut ser)
        .map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Render to a string, without the trailing newline.
pub fn to_pretty_json(metadata: &MetadataMap) -> FetchResult<String> {
    let mut buf = Vec::new();
    render_to(&mut buf, metadata)?;
    buf.pop();
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Print `metadata` to stdout.
pub fn render(metadata: &MetadataMap) -> FetchResult<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    render_to(&mut lock, metadata)?;
    lock.flush()?;
    Ok(())
}
