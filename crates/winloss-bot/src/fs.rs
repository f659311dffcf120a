//! Filesystem access used by the configuration store and the log sink.
//!
//! Production code uses [`SystemFs`]; tests use the in-memory `MemFs`, which
//! can also be told to fail writes to exercise best-effort error paths.

use std::io;
use std::path::Path;

pub trait ReadFile {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Replaces the whole file.
pub trait WriteFile {
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Opens a file for appending, creating it if absent.
pub trait OpenAppendFile {
    type Writer: io::Write;
    fn open_append(&self, path: &Path) -> io::Result<Self::Writer>;
}

/// Zero-sized type; delegates to `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

impl ReadFile for SystemFs {
    #[inline]
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl WriteFile for SystemFs {
    #[inline]
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

impl OpenAppendFile for SystemFs {
    type Writer = std::fs::File;

    #[inline]
    fn open_append(&self, path: &Path) -> io::Result<Self::Writer> {
        std::fs::File::options().create(true).append(true).open(path)
    }
}

#[cfg(test)]
pub use mem::MemFs;
