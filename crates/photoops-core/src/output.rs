//! Record output as JSON or JSON Lines.
//!
//! Facet sets are written as their flattened records, so the output of a run
//! is exactly what a key/value store would receive.

use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

use crate::config::OutputConfig;
use crate::engine::FacetSet;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One JSON array holding every record
    Json,
    /// One record per line (newline-delimited JSON)
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "jsonlines" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// A writer that serializes records to JSON or JSONL.
///
/// In JSON mode records are buffered and written as one array on
/// [`finish`](OutputWriter::finish); JSONL streams each record immediately.
pub struct OutputWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    pretty: bool,
    pending: Vec<Value>,
    items_written: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Create a new output writer.
    ///
    /// `pretty` only affects JSON; JSONL is always one compact object per line.
    pub fn new(writer: W, format: OutputFormat, pretty: bool) -> Self {
        Self {
            writer,
            format,
            pretty,
            pending: Vec::new(),
            items_written: 0,
        }
    }

    /// Create a writer from the `[output]` config section.
    ///
    /// Unknown formats fall back to JSON; config validation rejects them
    /// before this point.
    pub fn from_config(writer: W, config: &OutputConfig) -> Self {
        let format = OutputFormat::parse(&config.format).unwrap_or(OutputFormat::Json);
        Self::new(writer, format, config.pretty)
    }

    /// Write one record.
    pub fn write<T: Serialize>(&mut self, item: &T) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let value = serde_json::to_value(item).map_err(io::Error::other)?;
                self.pending.push(value);
            }
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.writer, item).map_err(io::Error::other)?;
                writeln!(self.writer)?;
            }
        }
        self.items_written += 1;
        Ok(())
    }

    /// Write every record of a facet set.
    pub fn write_set(&mut self, set: &FacetSet) -> io::Result<()> {
        for record in set.records().map_err(io::Error::other)? {
            self.write(&record)?;
        }
        Ok(())
    }

    /// Get the number of records written.
    pub fn items_written(&self) -> usize {
        self.items_written
    }

    /// Emit any buffered JSON array and flush the underlying writer.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            let items = std::mem::take(&mut self.pending);
            if self.pretty {
                serde_json::to_writer_pretty(&mut self.writer, &items)
                    .map_err(io::Error::other)?;
            } else {
                serde_json::to_writer(&mut self.writer, &items).map_err(io::Error::other)?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()
    }

    /// Consume the writer and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
