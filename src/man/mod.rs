//! Man page generation for a command tree.
//!
//! A page is assembled as markdown section by section (see `format`) and
//! then converted to roff. Headers are filled on a private copy per page, so
//! callers can reuse one `ManHeader` across a whole tree.

use crate::fs::DocFs;
use crate::tree::CommandRef;
use crate::walk::{self, basename};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

mod format;
mod header;
pub mod roff;

use format::{
    append_commands_section, append_description_section, append_example_section,
    append_history_section, append_name_section, append_options_sections,
    append_see_also_section, append_synopsis_section, append_title_block,
};
pub use format::print_flags;
pub(crate) use header::history_date;
pub use header::{resolve_date, ManHeader, AUTO_GEN_SOURCE, SOURCE_DATE_EPOCH};

/// Options for `gen_man_tree_from_opts`.
#[derive(Debug, Clone, Default)]
pub struct ManTreeOptions {
    pub header: ManHeader,
    /// Output directory.
    pub path: PathBuf,
    /// Joins command path segments in file names; `_` when empty.
    pub command_separator: String,
}

/// Render the man page of `cmd` into `w`.
pub fn gen_man<W: Write + ?Sized>(cmd: CommandRef<'_>, header: &ManHeader, w: &mut W) -> Result<()> {
    let page = render_page(cmd, header)?;
    w.write_all(page.as_bytes())
        .with_context(|| format!("write man page for {}", cmd.command_path()))?;
    Ok(())
}

/// Render the man page of `cmd` as roff source.
pub fn render_page(cmd: CommandRef<'_>, header: &ManHeader) -> Result<String> {
    Ok(roff::render(&render_markdown(cmd, header)?))
}

/// Markdown source of the page, before roff conversion.
pub fn render_markdown(cmd: CommandRef<'_>, header: &ManHeader) -> Result<String> {
    let header = header.fill(cmd)?;
    let dashed = cmd.command_path().replace(' ', "-");

    let mut out = String::new();
    append_title_block(&mut out, &header);
    append_name_section(&mut out, &dashed, cmd.short());
    append_synopsis_section(&mut out, &cmd.use_line());
    append_description_section(&mut out, cmd.long(), cmd.short());
    append_options_sections(&mut out, cmd);
    append_example_section(&mut out, cmd.example());
    append_commands_section(&mut out, cmd, &header.section);
    append_see_also_section(&mut out, cmd, &header.section);
    append_history_section(&mut out, &header);
    Ok(out)
}

/// Write one `<root-sub-...>.<section>` page per available command into `dir`.
///
/// Returns the number of pages written.
pub fn gen_man_tree(
    cmd: CommandRef<'_>,
    header: &ManHeader,
    dir: &Path,
    fs: &dyn DocFs,
) -> Result<usize> {
    let opts = ManTreeOptions {
        header: header.clone(),
        path: dir.to_path_buf(),
        command_separator: "-".to_string(),
    };
    gen_man_tree_from_opts(cmd, &opts, fs)
}

pub fn gen_man_tree_from_opts(
    cmd: CommandRef<'_>,
    opts: &ManTreeOptions,
    fs: &dyn DocFs,
) -> Result<usize> {
    let separator = if opts.command_separator.is_empty() {
        "_"
    } else {
        opts.command_separator.as_str()
    };
    let section = if opts.header.section.is_empty() {
        "1"
    } else {
        opts.header.section.as_str()
    };

    // Every page of one run carries the same date.
    let mut header = opts.header.clone();
    if header.date.is_none() {
        header.date = Some(resolve_date(None)?);
    }

    walk::prepare_dir(fs, &opts.path)?;
    let mut pages = 0;
    walk::visit(cmd, &mut |cmd| {
        let filename = opts
            .path
            .join(format!("{}.{section}", basename(cmd, separator)));
        walk::write_page(fs, &filename, |w| gen_man(cmd, &header, w))?;
        pages += 1;
        Ok(())
    })?;
    tracing::info!(pages, dir = %opts.path.display(), "generated man pages");
    Ok(pages)
}
