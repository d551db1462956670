//! Filesystem seam for tree generation.
//!
//! Generators take a `&dyn DocFs` instead of touching `std::fs` directly, so
//! tests can run whole tree generations against `MemFs`.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Operations the generators need from a filesystem.
pub trait DocFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    /// Create or truncate `path` and return a writer for it.
    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>>;
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl DocFs for OsFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let file = fs::File::create(path)?;
        Ok(Box::new(io::BufWriter::new(file)))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[derive(Debug, Default)]
struct MemState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

/// In-memory filesystem; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    state: Arc<Mutex<MemState>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, MemState>> {
        self.state
            .lock()
            .map_err(|_| io::Error::other("memory filesystem lock poisoned"))
    }

    pub fn read(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().ok()?.files.get(path).cloned()
    }

    pub fn read_to_string(&self, path: &Path) -> Option<String> {
        self.read(path)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Paths of every file created so far, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock()
            .map(|state| state.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

impl DocFs for MemFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut state = self.lock()?;
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        for ancestor in path.ancestors().filter(|p| !is_root(p)) {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn create(&self, path: &Path) -> io::Result<Box<dyn Write>> {
        let mut state = self.lock()?;
        if let Some(parent) = path.parent().filter(|p| !is_root(p)) {
            if !state.dirs.contains(parent) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} does not exist", parent.display()),
                ));
            }
        }
        if state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", path.display()),
            ));
        }
        state.files.insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MemFile {
            fs: self.clone(),
            path: path.to_path_buf(),
        }))
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock()
            .map(|state| state.dirs.contains(path) || state.files.contains_key(path))
            .unwrap_or(false)
    }
}

/// Writer appending straight into the shared map.
struct MemFile {
    fs: MemFs,
    path: PathBuf,
}

impl Write for MemFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.fs.lock()?;
        let file = state
            .files
            .get_mut(&self.path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file removed"))?;
        file.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_fs_creates_dirs_and_files() {
        let fs = MemFs::new();
        fs.create_dir_all(Path::new("/__cmddoc-tests/manpages"))
            .expect("mkdir");
        let mut file = fs
            .create(Path::new("/__cmddoc-tests/manpages/page.3"))
            .expect("create page");
        let written = file.write(b"manpage content").expect("write");
        assert_eq!(written, "manpage content".len());

        assert!(fs.exists(Path::new("/__cmddoc-tests/manpages")));
        assert!(fs.exists(Path::new("/__cmddoc-tests")));
        assert_eq!(
            fs.read_to_string(Path::new("/__cmddoc-tests/manpages/page.3"))
                .as_deref(),
            Some("manpage content")
        );
    }

    #[test]
    fn fresh_mem_fs_is_isolated() {
        let fs = MemFs::new();
        fs.create_dir_all(Path::new("/__cmddoc-tests/manpages"))
            .expect("mkdir");
        let other = MemFs::new();
        assert!(!other.exists(Path::new("/__cmddoc-tests/manpages")));
        assert!(fs.clone().exists(Path::new("/__cmddoc-tests/manpages")));
    }

    #[test]
    fn create_requires_parent_directory() {
        let fs = MemFs::new();
        let err = fs
            .create(Path::new("/missing/page.1"))
            .err()
            .expect("missing parent must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(fs.create(Path::new("top.1")).is_ok());
    }

    #[test]
    fn os_fs_round_trips_through_a_temp_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a/b");
        OsFs.create_dir_all(&nested).expect("mkdir");
        {
            let mut file = OsFs.create(&nested.join("x.1")).expect("create");
            file.write_all(b"hi").expect("write");
            file.flush().expect("flush");
        }
        assert!(OsFs.exists(&nested.join("x.1")));
        assert_eq!(std::fs::read_to_string(nested.join("x.1")).expect("read"), "hi");
    }
}
