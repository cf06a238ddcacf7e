//! Size-bounded log file that rotates into numbered backups.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

/// Append-only file that rolls over to `<path>.1 … <path>.N` once it would
/// reach `max_bytes`. With no backups configured the file grows unbounded.
///
/// Cloning shares the underlying file handle.
#[derive(Clone)]
pub struct RotatingFile {
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("RotatingFile")
            .field("path", &inner.path)
            .field("max_bytes", &inner.max_bytes)
            .field("backup_count", &inner.backup_count)
            .finish()
    }
}

struct Inner {
    path: PathBuf,
    max_bytes: u64,
    backup_count: usize,
    file: File,
    size: u64,
}

impl RotatingFile {
    /// Open `path` for appending, creating parent directories as needed.
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backup_count: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { path, max_bytes, backup_count, file, size })),
        })
    }

    /// Path of the active log file.
    pub fn path(&self) -> PathBuf {
        self.lock().path.clone()
    }

    /// Path of the `n`th rotated backup.
    pub fn backup_path(path: &Path, n: usize) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn should_rotate(&self, incoming: usize) -> bool {
        self.max_bytes > 0
            && self.backup_count > 0
            && self.size > 0
            && self.size + incoming as u64 >= self.max_bytes
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        for n in (1..self.backup_count).rev() {
            let src = RotatingFile::backup_path(&self.path, n);
            if src.exists() {
                let dst = RotatingFile::backup_path(&self.path, n + 1);
                remove_if_exists(&dst)?;
                fs::rename(&src, &dst)?;
            }
        }
        let first = RotatingFile::backup_path(&self.path, 1);
        remove_if_exists(&first)?;
        fs::rename(&self.path, &first)?;
        self.file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        self.size = 0;
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Locked write handle produced for each log event.
pub struct RotatingFileWriter<'a> {
    inner: MutexGuard<'a, Inner>,
}

impl Write for RotatingFileWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.should_rotate(buf.len()) {
            self.inner.rotate()?;
        }
        let written = self.inner.file.write(buf)?;
        self.inner.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingFileWriter { inner: self.lock() }
    }
}
