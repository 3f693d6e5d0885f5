//! Line-oriented writer over any `io::Write`

use crate::core::{OutputRecord, RecordWriter, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes one line per record
pub struct StreamWriter<W: Write + Send> {
    writer: W,
    name: String,
}

/// Standard output, the default write collaborator
pub type ConsoleWriter = StreamWriter<io::Stdout>;

impl<W: Write + Send> StreamWriter<W> {
    pub fn new(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl StreamWriter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout(), "console")
    }
}

impl Default for StreamWriter<io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl StreamWriter<BufWriter<File>> {
    /// Append to `path`, creating the file if needed
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file), "file"))
    }
}

impl<W: Write + Send> RecordWriter for StreamWriter<W> {
    fn write(&mut self, record: &OutputRecord) -> Result<()> {
        let line = record.render()?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<W: Write + Send> Drop for StreamWriter<W> {
    fn drop(&mut self) {
        // Ensure all buffered data reaches the sink
        let _ = self.writer.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_stream_writer_lines() -> Result<()> {
        let mut writer = StreamWriter::new(Vec::new(), "buffer");

        let mut record = Map::new();
        record.insert("log_message".to_string(), json!("first"));
        writer.write(&OutputRecord::Structured(record))?;
        writer.write(&OutputRecord::Encoded(r#"{"chunk":"1/1"}"#.to_string()))?;

        let output = String::from_utf8(std::mem::take(&mut writer.writer)).unwrap();
        assert_eq!(output, "{\"log_message\":\"first\"}\n{\"chunk\":\"1/1\"}\n");
        Ok(())
    }

    #[test]
    fn test_file_writer() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("events.jsonl");

        {
            let mut writer = StreamWriter::file(&path)?;
            writer.write(&OutputRecord::Text("hello".to_string()))?;
            writer.flush()?;
        }

        let content = fs::read_to_string(&path)?;
        assert_eq!(content, "hello\n");
        Ok(())
    }

    #[test]
    fn test_console_writer_name() {
        assert_eq!(ConsoleWriter::stdout().name(), "console");
    }
}
