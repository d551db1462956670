//! Load a command tree from a JSON description.
//!
//! The document mirrors `tree::Command` with nested `commands`:
//!
//! ```json
//! { "use": "root", "short": "Root command",
//!   "persistent_flags": [{ "name": "verbose", "kind": "bool", "default": "false" }],
//!   "commands": [{ "use": "echo [string]", "short": "Echo anything" }] }
//! ```

use crate::tree::{Command, CommandId, CommandTree};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CommandSpec {
    #[serde(flatten)]
    command: Command,
    #[serde(default)]
    commands: Vec<CommandSpec>,
}

/// Read and parse a tree file.
pub fn load_tree(path: &Path) -> Result<CommandTree> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_tree(&text).with_context(|| format!("parse {}", path.display()))
}

/// Parse a tree from JSON text.
pub fn parse_tree(text: &str) -> Result<CommandTree> {
    let spec: CommandSpec = serde_json::from_str(text).context("decode command tree JSON")?;
    validate(&spec, &spec.command.use_line)?;
    let CommandSpec { command, commands } = spec;
    let mut tree = CommandTree::new(command);
    let root = tree.root_id();
    attach(&mut tree, root, commands);
    Ok(tree)
}

fn validate(spec: &CommandSpec, path: &str) -> Result<()> {
    if spec.command.name().is_empty() {
        return Err(anyhow!("command under {path:?} has an empty use line"));
    }
    for flag in spec
        .command
        .flags
        .iter()
        .chain(&spec.command.persistent_flags)
    {
        if flag.name.is_empty() {
            return Err(anyhow!("command {:?} has a flag without a name", spec.command.name()));
        }
    }
    for child in &spec.commands {
        validate(child, spec.command.name())?;
    }
    Ok(())
}

fn attach(tree: &mut CommandTree, parent: CommandId, specs: Vec<CommandSpec>) {
    for spec in specs {
        let id = tree.add_child(parent, spec.command);
        attach(tree, id, spec.commands);
    }
}
