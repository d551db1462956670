use anyhow::{anyhow, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::Parser;
use cmddoc::load::load_tree;
use cmddoc::{man, markdown, CommandTree, ManHeader, ManTreeOptions, OsFs};
use std::io::Write;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Command, ManArgs, MarkdownArgs, PageArgs, PageFormat, RootArgs};

fn main() -> Result<()> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Man(args) => cmd_man(args),
        Command::Markdown(args) => cmd_markdown(args),
        Command::Page(args) => cmd_page(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_man(args: ManArgs) -> Result<()> {
    let tree = load_tree(&args.tree)?;
    let opts = ManTreeOptions {
        header: ManHeader {
            title: args.title,
            section: args.section,
            date: args.date.map(midnight_utc).transpose()?,
            source: args.source,
            manual: args.manual,
        },
        path: args.out_dir,
        command_separator: args.separator,
    };
    let pages = man::gen_man_tree_from_opts(tree.root(), &opts, &OsFs)?;
    println!("Wrote {pages} man pages to {}", opts.path.display());
    Ok(())
}

fn cmd_markdown(args: MarkdownArgs) -> Result<()> {
    let tree = load_tree(&args.tree)?;
    let prefix = args.link_prefix;
    let pages = markdown::gen_markdown_tree_custom(
        tree.root(),
        &args.out_dir,
        &OsFs,
        &|_| String::new(),
        &|link| format!("{prefix}{link}"),
    )?;
    println!(
        "Wrote {pages} markdown pages to {}",
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_page(args: PageArgs) -> Result<()> {
    let tree = load_tree(&args.tree)?;
    let cmd = select_command(&tree, args.command.as_deref())?;
    let mut stdout = std::io::stdout().lock();
    match args.format {
        PageFormat::Man => {
            let header = ManHeader {
                section: args.section,
                ..ManHeader::default()
            };
            man::gen_man(cmd, &header, &mut stdout)?;
        }
        PageFormat::Markdown => markdown::gen_markdown(cmd, &mut stdout)?,
    }
    stdout.flush()?;
    Ok(())
}

/// Resolve a space separated path; a leading root name is optional.
fn select_command<'a>(tree: &'a CommandTree, path: Option<&str>) -> Result<cmddoc::CommandRef<'a>> {
    let Some(path) = path else {
        return Ok(tree.root());
    };
    let mut names: Vec<&str> = path.split_whitespace().collect();
    if names.first() == Some(&tree.root().name()) {
        names.remove(0);
    }
    tree.find(&names)
        .map(|id| tree.get(id))
        .ok_or_else(|| anyhow!("no command {path:?} in tree"))
}

fn midnight_utc(date: NaiveDate) -> Result<chrono::DateTime<Utc>> {
    let naive = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid date {date}"))?;
    Ok(Utc.from_utc_datetime(&naive))
}
