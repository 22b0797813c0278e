//! Sinks that persist rendered route modules
//!
//! The tree never interprets its destination; it hands `(destination, text)`
//! to a [`RouteWriter`] exactly once per commit.

use std::fs;
use std::io;
use std::path::Path;

/// Trait for route module sinks
pub trait RouteWriter {
    /// Persist `text` at `destination`; a single blocking write, no retry
    fn write(&mut self, destination: &str, text: &str) -> io::Result<()>;

    /// Get writer backend name
    fn name(&self) -> &'static str;
}

impl<W: RouteWriter + ?Sized> RouteWriter for &mut W {
    fn write(&mut self, destination: &str, text: &str) -> io::Result<()> {
        (**self).write(destination, text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<W: RouteWriter + ?Sized> RouteWriter for Box<W> {
    fn write(&mut self, destination: &str, text: &str) -> io::Result<()> {
        (**self).write(destination, text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Writes the module to a file path, creating parent directories
#[derive(Debug, Clone, Copy, Default)]
pub struct FileWriter;

impl RouteWriter for FileWriter {
    fn write(&mut self, destination: &str, text: &str) -> io::Result<()> {
        let path = Path::new(destination);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// One recorded write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub destination: String,
    pub text: String,
}

/// Keeps every write in memory (dry runs, tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    commits: Vec<Commit>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn last(&self) -> Option<&Commit> {
        self.commits.last()
    }
}

impl RouteWriter for MemoryWriter {
    fn write(&mut self, destination: &str, text: &str) -> io::Result<()> {
        self.commits.push(Commit {
            destination: destination.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("src/router/routes.js");
        let destination = target.to_str().unwrap();

        FileWriter.write(destination, "export default [\n];\n").unwrap();
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "export default [\n];\n"
        );

        FileWriter.write(destination, "replaced").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "replaced");
    }

    #[test]
    fn test_file_writer_reports_io_errors() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be overwritten with a file
        let destination = temp_dir.path().to_str().unwrap();
        assert!(FileWriter.write(destination, "x").is_err());
    }

    #[test]
    fn test_memory_writer_records_in_order() {
        fn write_twice<W: RouteWriter>(mut sink: W) -> &'static str {
            sink.write("a.js", "one").unwrap();
            sink.write("b.js", "two").unwrap();
            sink.name()
        }

        let mut writer = MemoryWriter::new();
        assert_eq!(write_twice(&mut writer), "memory");
        assert_eq!(writer.commits().len(), 2);
        assert_eq!(
            writer.last(),
            Some(&Commit {
                destination: "b.js".into(),
                text: "two".into()
            })
        );
    }
}
