//! Shared fixture tree for integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use cmddoc::{Command, CommandTree, Flag, ManHeader};

/// Hierarchy used across the man and markdown tests:
///
/// ```text
/// root
/// ├── dummy
/// ├── echo
/// │   ├── deprecated   (deprecated)
/// │   ├── echosub
/// │   └── times
/// └── print            (hidden)
/// ```
pub fn fixture_tree() -> CommandTree {
    let mut tree = CommandTree::new(
        Command::new("root")
            .short("Root short description")
            .long("Root long description")
            .persistent_flag(Flag::string("rootflag", "two", "").with_shorthand("r"))
            .persistent_flag(
                Flag::string("strtwo", "two", "help message for parent flag strtwo")
                    .with_shorthand("t"),
            ),
    );
    let root = tree.root_id();

    tree.add_child(
        root,
        Command::new("print [string to print]")
            .short("Print anything to the screen")
            .long("an absolutely utterly useless command for testing.")
            .hidden()
            .persistent_flag(
                Flag::string("strthree", "three", "help message for flag strthree")
                    .with_shorthand("s"),
            )
            .flag(Flag::int("intthree", 345, "help message for flag intthree").with_shorthand("i"))
            .flag(Flag::bool("boolthree", true, "help message for flag boolthree").with_shorthand("b")),
    );

    let echo = tree.add_child(
        root,
        Command::new("echo [string to echo]")
            .short("Echo anything to the screen")
            .long("an utterly useless command for testing")
            .example("Just run root echo")
            .persistent_flag(
                Flag::string("strone", "one", "help message for flag strone").with_shorthand("s"),
            )
            .persistent_flag(
                Flag::bool("persistentbool", false, "help message for flag persistentbool")
                    .with_shorthand("p"),
            )
            .flag(Flag::int("intone", 123, "help message for flag intone").with_shorthand("i"))
            .flag(Flag::bool("boolone", true, "help message for flag boolone").with_shorthand("b")),
    );

    tree.add_child(root, Command::new("dummy [action]").short("Performs a dummy action"));

    tree.add_child(
        echo,
        Command::new("times [# times] [string to echo]")
            .short("Echo anything to the screen more times")
            .long("a slightly useless command for testing.")
            .persistent_flag(
                Flag::string("strtwo", "2", "help message for child flag strtwo").with_shorthand("t"),
            )
            .flag(Flag::int("inttwo", 234, "help message for flag inttwo").with_shorthand("j"))
            .flag(Flag::bool("booltwo", false, "help message for flag booltwo").with_shorthand("c")),
    );
    tree.add_child(
        echo,
        Command::new("echosub [string to print]")
            .short("second sub command for echo")
            .long("an absolutely utterly useless command for testing gendocs!."),
    );
    tree.add_child(
        echo,
        Command::new("deprecated [can't do anything here]")
            .short("A command which is deprecated")
            .long("an absolutely utterly useless command for testing deprecation!.")
            .deprecated("Please use echo instead"),
    );
    tree
}

/// `Project` header, section 2, pinned date.
pub fn project_header() -> ManHeader {
    ManHeader {
        title: "Project".to_string(),
        section: "2".to_string(),
        date: Utc.with_ymd_and_hms(2016, 1, 2, 0, 0, 0).single(),
        ..ManHeader::default()
    }
}

/// Man-page escaping of a plain name.
pub fn translate(text: &str) -> String {
    text.replace('-', "\\-")
}

/// Advance `lines` until `expected` is found.
pub fn assert_line_found<'a>(lines: &mut impl Iterator<Item = &'a str>, expected: &str) {
    assert!(
        lines.any(|line| line == expected),
        "hit end of output before finding {expected:?}"
    );
}

/// The very next line must equal `expected`.
pub fn assert_next_line_equals<'a>(lines: &mut impl Iterator<Item = &'a str>, expected: &str) {
    match lines.next() {
        Some(line) => assert_eq!(line, expected),
        None => panic!("hit end of output before finding {expected:?}"),
    }
}
