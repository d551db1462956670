//! Markdown source for a man page, one `append_*` helper per section.
//!
//! The text produced here is the input of `roff::render`; it only uses the
//! constructs that backend understands (title block, `#` headings,
//! paragraphs, `**bold**`, fenced blocks).

use super::header::{history_date, title_date, FilledHeader, AUTO_GEN_SOURCE};
use crate::flag::{self, Flag, ValueKind};
use crate::tree::CommandRef;

pub(super) fn append_title_block(out: &mut String, header: &FilledHeader) {
    let date = title_date(&header.date);
    let fields: [&str; 5] = [
        &header.title,
        &header.section,
        &date,
        &header.source,
        &header.manual,
    ];
    let quoted: Vec<String> = fields.into_iter().map(quote_field).collect();
    out.push_str(&format!("% {}\n", quoted.join(" ")));
}

pub(super) fn append_name_section(out: &mut String, dashed_name: &str, short: &str) {
    out.push_str("# NAME\n");
    out.push_str(&format!("{dashed_name} \\- {short}\n\n"));
}

pub(super) fn append_synopsis_section(out: &mut String, use_line: &str) {
    out.push_str("# SYNOPSIS\n");
    out.push_str(&format!("**{use_line}**\n\n"));
}

/// Long description, falling back to the short one; an empty body is kept.
pub(super) fn append_description_section(out: &mut String, long: &str, short: &str) {
    let description = if long.is_empty() { short } else { long };
    out.push_str("# DESCRIPTION\n");
    out.push_str(description);
    out.push_str("\n\n");
}

pub(super) fn append_options_sections(out: &mut String, cmd: CommandRef<'_>) {
    let local = cmd.local_flags();
    if flag::has_visible(&local) {
        out.push_str("# OPTIONS\n");
        print_flags(out, &local);
        out.push('\n');
    }
    let inherited = cmd.inherited_flags();
    if flag::has_visible(&inherited) {
        out.push_str("# OPTIONS INHERITED FROM PARENT COMMANDS\n");
        print_flags(out, &inherited);
        out.push('\n');
    }
}

pub(super) fn append_example_section(out: &mut String, example: &str) {
    if example.is_empty() {
        return;
    }
    out.push_str("# EXAMPLE\n");
    out.push_str(&format!("```\n{example}\n```\n\n"));
}

pub(super) fn append_commands_section(out: &mut String, cmd: CommandRef<'_>, section: &str) {
    let children = cmd.available_children();
    if children.is_empty() {
        return;
    }
    let dashed = dashed_path(cmd);
    out.push_str("# COMMANDS\n");
    for child in children {
        out.push_str(&format!("**{}**\n", child.name()));
        out.push_str(&format!("\t{}\n", child.short()));
        out.push_str(&format!(
            "\tSee **{dashed}-{}({section})**.\n\n",
            child.name()
        ));
    }
}

/// Parent, siblings and children, each as `**dash-path(section)**`.
pub(super) fn append_see_also_section(out: &mut String, cmd: CommandRef<'_>, section: &str) {
    let mut entries = Vec::new();
    if let Some(parent) = cmd.parent() {
        if parent.is_available() {
            entries.push(format!("**{}({section})**", dashed_path(parent)));
        }
        let parent_dashed = dashed_path(parent);
        for sibling in parent.available_children() {
            if sibling.id() == cmd.id() {
                continue;
            }
            entries.push(format!(
                "**{parent_dashed}-{}({section})**",
                sibling.name()
            ));
        }
    }
    let dashed = dashed_path(cmd);
    for child in cmd.available_children() {
        entries.push(format!("**{dashed}-{}({section})**", child.name()));
    }
    if entries.is_empty() {
        return;
    }
    out.push_str("# SEE ALSO\n");
    out.push_str(&entries.join(", "));
    out.push_str("\n\n");
}

pub(super) fn append_history_section(out: &mut String, header: &FilledHeader) {
    if !header.auto_gen_tag {
        return;
    }
    out.push_str("# HISTORY\n");
    out.push_str(&format!(
        "{} {AUTO_GEN_SOURCE}\n",
        history_date(&header.date)
    ));
}

/// Write one signature line and one indented help line per visible flag.
///
/// `**-s**, **--name**="value"` for string flags, bare values otherwise;
/// a flag usable without an argument wraps the value in brackets.
pub fn print_flags(out: &mut String, flags: &[&Flag]) {
    for flag in flags.iter().filter(|flag| flag.is_visible()) {
        let mut line = match flag.visible_shorthand() {
            Some(short) => format!("**-{short}**, **--{}**", flag.name),
            None => format!("**--{}**", flag.name),
        };
        let bracketed = flag.no_opt_default.as_deref().is_some_and(|v| !v.is_empty());
        if bracketed {
            line.push('[');
        }
        if flag.kind == ValueKind::String {
            line.push_str(&format!("={:?}", flag.default_value));
        } else {
            line.push_str(&format!("={}", flag.default_value));
        }
        if bracketed {
            line.push(']');
        }
        out.push_str(&line);
        out.push_str(&format!("\n\t{}\n\n", flag.usage));
    }
}

fn dashed_path(cmd: CommandRef<'_>) -> String {
    cmd.command_path().replace(' ', "-")
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Command, CommandTree};

    #[test]
    fn shorthand_deprecated_flag_prints_long_form_only() {
        let cmd = Command::new("c").flag(
            Flag::string("foo", "default", "Foo flag")
                .with_shorthand("f")
                .shorthand_deprecated("don't use it no more"),
        );
        let tree = CommandTree::new(cmd);
        let mut out = String::new();
        print_flags(&mut out, &tree.root().local_flags());
        assert_eq!(out, "**--foo**=\"default\"\n\tFoo flag\n\n");
    }

    #[test]
    fn bool_and_int_flags_print_bare_values() {
        let tree = CommandTree::new(
            Command::new("c")
                .flag(Flag::bool("boolone", true, "help message for flag boolone").with_shorthand("b"))
                .flag(Flag::int("intone", 123, "help message for flag intone").with_shorthand("i")),
        );
        let mut out = String::new();
        print_flags(&mut out, &tree.root().local_flags());
        assert_eq!(
            out,
            "**-b**, **--boolone**[=true]\n\thelp message for flag boolone\n\n\
             **-i**, **--intone**=123\n\thelp message for flag intone\n\n"
        );
    }

    #[test]
    fn hidden_flags_are_not_printed() {
        let tree = CommandTree::new(Command::new("c").flag(Flag::string("secret", "", "").hidden()));
        let mut out = String::new();
        print_flags(&mut out, &tree.root().local_flags());
        assert!(out.is_empty());
    }

    #[test]
    fn empty_descriptions_keep_the_section() {
        let mut out = String::new();
        append_description_section(&mut out, "", "");
        assert_eq!(out, "# DESCRIPTION\n\n\n");
    }

    #[test]
    fn see_also_lists_parent_siblings_and_children() {
        let mut tree = CommandTree::new(Command::new("root"));
        let root = tree.root_id();
        let echo = tree.add_child(root, Command::new("echo"));
        tree.add_child(root, Command::new("print").hidden());
        tree.add_child(root, Command::new("dummy"));
        tree.add_child(echo, Command::new("times"));
        tree.add_child(echo, Command::new("deprecated").deprecated("use echo"));

        let mut out = String::new();
        append_see_also_section(&mut out, tree.get(echo), "2");
        assert_eq!(
            out,
            "# SEE ALSO\n**root(2)**, **root-dummy(2)**, **root-echo-times(2)**\n\n"
        );
    }
}
