//! CLI argument parsing for the `cmddoc` binary.
//!
//! The binary only maps arguments onto the library's options; all rendering
//! lives in `man` and `markdown`.
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "cmddoc",
    version,
    about = "Generate man pages and markdown references from a command tree",
    after_help = "Examples:\n  cmddoc man --tree cli.json --out-dir man/ --section 1\n  cmddoc markdown --tree cli.json --out-dir docs/\n  cmddoc page --tree cli.json --command \"root echo\"",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log each written file
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Man(ManArgs),
    Markdown(MarkdownArgs),
    Page(PageArgs),
}

/// Man tree generation inputs.
#[derive(Parser, Debug)]
#[command(about = "Write one man page per command")]
pub struct ManArgs {
    /// JSON command tree
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// Output directory (created when missing)
    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Manual section, also used as the file suffix
    #[arg(long, default_value = "1")]
    pub section: String,

    /// Page title; defaults to the upper-cased command path
    #[arg(long, default_value = "")]
    pub title: String,

    /// Source field of the page header; defaults to the auto-generated tag
    #[arg(long, default_value = "")]
    pub source: String,

    /// Manual name shown in the page header
    #[arg(long, default_value = "")]
    pub manual: String,

    /// Generation date (YYYY-MM-DD); SOURCE_DATE_EPOCH or today otherwise
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Joins command path segments in file names
    #[arg(long, default_value = "-")]
    pub separator: String,
}

#[derive(Parser, Debug)]
#[command(about = "Write one markdown page per command")]
pub struct MarkdownArgs {
    /// JSON command tree
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    #[arg(long, value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Prefix added to every cross-reference link
    #[arg(long, default_value = "")]
    pub link_prefix: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PageFormat {
    Man,
    Markdown,
}

/// Single page printed to stdout.
#[derive(Parser, Debug)]
#[command(about = "Print the page of one command")]
pub struct PageArgs {
    /// JSON command tree
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// Space separated command path, e.g. "root echo"; the root when omitted
    #[arg(long)]
    pub command: Option<String>,

    #[arg(long, value_enum, default_value_t = PageFormat::Man)]
    pub format: PageFormat,

    #[arg(long, default_value = "1")]
    pub section: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        RootArgs::command().debug_assert();
    }

    #[test]
    fn man_args_parse_date_and_defaults() {
        let args = RootArgs::try_parse_from([
            "cmddoc", "man", "--tree", "cli.json", "--out-dir", "man", "--date", "2016-01-02",
        ])
        .expect("parse");
        let Command::Man(man) = args.command else {
            panic!("expected man subcommand");
        };
        assert_eq!(man.section, "1");
        assert_eq!(man.separator, "-");
        assert_eq!(man.date, NaiveDate::from_ymd_opt(2016, 1, 2));
    }

    #[test]
    fn page_format_defaults_to_man() {
        let args = RootArgs::try_parse_from(["cmddoc", "page", "--tree", "cli.json", "--verbose"])
            .expect("parse");
        assert!(args.verbose);
        let Command::Page(page) = args.command else {
            panic!("expected page subcommand");
        };
        assert_eq!(page.format, PageFormat::Man);
        assert!(page.command.is_none());
    }

    #[test]
    fn man_help_describes_header_fields() {
        let err = RootArgs::try_parse_from(["cmddoc", "man", "--help"]).expect_err("help exits");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let help = err.to_string();
        assert!(help.contains("Source field of the page header"));
        assert!(help.contains("Manual name shown in the page header"));
    }
}
