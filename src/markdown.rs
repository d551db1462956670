//! Markdown reference pages, one file per command.

use crate::flag::{self, usages};
use crate::fs::DocFs;
use crate::man::{history_date, resolve_date, AUTO_GEN_SOURCE};
use crate::tree::CommandRef;
use crate::walk::{self, basename};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

pub const MARKDOWN_EXTENSION: &str = ".md";

/// Render `cmd` with link targets left unchanged.
pub fn gen_markdown<W: Write + ?Sized>(cmd: CommandRef<'_>, w: &mut W) -> Result<()> {
    gen_markdown_custom(cmd, w, &|link| link.to_string())
}

/// Render `cmd`, passing every link target through `link_handler`.
pub fn gen_markdown_custom<W: Write + ?Sized>(
    cmd: CommandRef<'_>,
    w: &mut W,
    link_handler: &dyn Fn(&str) -> String,
) -> Result<()> {
    let date = resolve_date(None)?;
    let page = render_markdown(cmd, &date, link_handler);
    w.write_all(page.as_bytes())
        .with_context(|| format!("write markdown for {}", cmd.command_path()))?;
    Ok(())
}

fn render_markdown(
    cmd: CommandRef<'_>,
    date: &DateTime<Utc>,
    link_handler: &dyn Fn(&str) -> String,
) -> String {
    let name = cmd.command_path();
    let mut out = String::new();

    out.push_str(&format!("## {name}\n\n"));
    out.push_str(&format!("{}\n\n", cmd.short()));
    if !cmd.long().is_empty() {
        out.push_str("### Synopsis\n\n");
        out.push_str(&format!("{}\n\n", cmd.long()));
    }
    out.push_str(&format!("```\n{}\n```\n\n", cmd.use_line()));

    if !cmd.example().is_empty() {
        out.push_str("### Examples\n\n");
        out.push_str(&format!("```\n{}\n```\n\n", cmd.example()));
    }

    let local = cmd.local_flags();
    if flag::has_visible(&local) {
        out.push_str("### Options\n\n```\n");
        out.push_str(&usages(&local));
        out.push_str("```\n\n");
    }
    let inherited = cmd.inherited_flags();
    if flag::has_visible(&inherited) {
        out.push_str("### Options inherited from parent commands\n\n```\n");
        out.push_str(&usages(&inherited));
        out.push_str("```\n\n");
    }

    let parent = cmd.parent().filter(|parent| parent.is_available());
    let children = cmd.available_children();
    if parent.is_some() || !children.is_empty() {
        out.push_str("### SEE ALSO\n\n");
        if let Some(parent) = parent {
            let link = format!("{}{MARKDOWN_EXTENSION}", basename(parent, "_"));
            out.push_str(&format!(
                "* [{}]({})\t - {}\n",
                parent.command_path(),
                link_handler(&link),
                parent.short()
            ));
        }
        for child in children {
            let link = format!("{}{MARKDOWN_EXTENSION}", basename(child, "_"));
            out.push_str(&format!(
                "* [{}]({})\t - {}\n",
                child.command_path(),
                link_handler(&link),
                child.short()
            ));
        }
        out.push('\n');
    }

    if !cmd.auto_gen_tag_disabled() {
        out.push_str(&format!(
            "###### {AUTO_GEN_SOURCE} on {}\n",
            history_date(date)
        ));
    }
    out
}

/// Write one `<root_sub_...>.md` page per available command into `dir`.
pub fn gen_markdown_tree(cmd: CommandRef<'_>, dir: &Path, fs: &dyn DocFs) -> Result<usize> {
    gen_markdown_tree_custom(cmd, dir, fs, &|_| String::new(), &|link| link.to_string())
}

/// Like `gen_markdown_tree`, with text prepended to each file (given its
/// path) and every link target passed through `link_handler`.
pub fn gen_markdown_tree_custom(
    cmd: CommandRef<'_>,
    dir: &Path,
    fs: &dyn DocFs,
    file_prepender: &dyn Fn(&Path) -> String,
    link_handler: &dyn Fn(&str) -> String,
) -> Result<usize> {
    let date = resolve_date(None)?;
    walk::prepare_dir(fs, dir)?;
    let mut pages = 0;
    walk::visit(cmd, &mut |cmd| {
        let filename = dir.join(format!("{}{MARKDOWN_EXTENSION}", basename(cmd, "_")));
        walk::write_page(fs, &filename, |w| {
            w.write_all(file_prepender(&filename).as_bytes())?;
            w.write_all(render_markdown(cmd, &date, link_handler).as_bytes())?;
            Ok(())
        })?;
        pages += 1;
        Ok(())
    })?;
    tracing::info!(pages, dir = %dir.display(), "generated markdown pages");
    Ok(pages)
}
