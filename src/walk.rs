//! Depth-first traversal shared by the tree generators.

use crate::fs::DocFs;
use crate::tree::CommandRef;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Visit `cmd` and then every available descendant, root first.
///
/// Hidden and deprecated commands are skipped together with their subtrees.
/// The first error stops the walk.
pub fn visit<'a, F>(cmd: CommandRef<'a>, f: &mut F) -> Result<()>
where
    F: FnMut(CommandRef<'a>) -> Result<()>,
{
    f(cmd)?;
    for child in cmd.available_children() {
        visit(child, f)?;
    }
    Ok(())
}

/// Command path with spaces replaced by `separator`, e.g. `root-echo-times`.
pub fn basename(cmd: CommandRef<'_>, separator: &str) -> String {
    cmd.command_path().replace(' ', separator)
}

/// Create `path` through `fs`, run `render` into it and flush.
///
/// Returns the number of bytes written.
pub(crate) fn write_page<F>(fs: &dyn DocFs, path: &Path, render: F) -> Result<usize>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let file = fs
        .create(path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut counted = CountingWriter { inner: file, bytes: 0 };
    render(&mut counted).with_context(|| format!("render {}", path.display()))?;
    counted
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = counted.bytes, "wrote page");
    Ok(counted.bytes)
}

/// Ensure the output directory exists before the first page is written.
pub(crate) fn prepare_dir(fs: &dyn DocFs, dir: &Path) -> Result<()> {
    fs.create_dir_all(dir)
        .with_context(|| format!("create {}", dir.display()))
}

struct CountingWriter<W> {
    inner: W,
    bytes: usize,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.bytes += written;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
