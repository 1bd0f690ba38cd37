use std::io::{Seek, Write};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::pack::PackError;

const JSON_INDENT: &[u8] = b"    ";

pub trait ZipWriterExt {
    fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<(), PackError>;

    fn write_json_entry<T: Serialize>(&mut self, path: &str, value: &T) -> Result<(), PackError>;
}

/// Deflate, with the timestamp pinned to the zip epoch so equal content gives equal entries.
fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

impl<W: Write + Seek> ZipWriterExt for ZipWriter<W> {
    fn write_entry(&mut self, path: &str, data: &[u8]) -> Result<(), PackError> {
        self.start_file(path, entry_options())?;
        self.write_all(data)?;
        Ok(())
    }

    fn write_json_entry<T: Serialize>(&mut self, path: &str, value: &T) -> Result<(), PackError> {
        let json = to_pretty_json(value).map_err(|source| PackError::Json {
            path: path.to_string(),
            source,
        })?;
        self.write_entry(path, &json)
    }
}

/// Pretty printed json with a 4 space indent.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut serializer)?;
    Ok(out)
}
