//! Command tree arena and read-only accessors.
//!
//! The host CLI builds a `CommandTree` once; renderers only ever see
//! `CommandRef` views into it. Parent links are plain ids, so the arena owns
//! every node and no node owns another.

use crate::flag::Flag;
use serde::Deserialize;

/// Index of a command inside its `CommandTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

/// One command as registered by the host CLI.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Command {
    /// One-line usage; the first word is the command name.
    #[serde(rename = "use")]
    pub use_line: String,
    pub short: String,
    pub long: String,
    pub example: String,
    /// Flags that apply only to this command.
    pub flags: Vec<Flag>,
    /// Flags that apply to this command and every descendant.
    pub persistent_flags: Vec<Flag>,
    pub hidden: bool,
    pub deprecated: Option<String>,
    pub disable_auto_gen_tag: bool,
    pub disable_flags_in_use_line: bool,
}

impl Command {
    pub fn new(use_line: &str) -> Self {
        Self {
            use_line: use_line.to_string(),
            ..Self::default()
        }
    }

    pub fn short(mut self, short: &str) -> Self {
        self.short = short.to_string();
        self
    }

    pub fn long(mut self, long: &str) -> Self {
        self.long = long.to_string();
        self
    }

    pub fn example(mut self, example: &str) -> Self {
        self.example = example.to_string();
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn persistent_flag(mut self, flag: Flag) -> Self {
        self.persistent_flags.push(flag);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn deprecated(mut self, message: &str) -> Self {
        self.deprecated = Some(message.to_string());
        self
    }

    pub fn disable_auto_gen_tag(mut self) -> Self {
        self.disable_auto_gen_tag = true;
        self
    }

    pub fn disable_flags_in_use_line(mut self) -> Self {
        self.disable_flags_in_use_line = true;
        self
    }

    pub fn name(&self) -> &str {
        self.use_line.split_whitespace().next().unwrap_or_default()
    }

    pub fn flag_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.flags.iter_mut().find(|flag| flag.name == name)
    }

    pub fn persistent_flag_mut(&mut self, name: &str) -> Option<&mut Flag> {
        self.persistent_flags.iter_mut().find(|flag| flag.name == name)
    }
}

#[derive(Debug, Clone)]
struct Node {
    command: Command,
    parent: Option<CommandId>,
    children: Vec<CommandId>,
}

/// Arena holding a whole command hierarchy.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<Node>,
}

impl CommandTree {
    pub fn new(root: Command) -> Self {
        Self {
            nodes: vec![Node {
                command: root,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root_id(&self) -> CommandId {
        CommandId(0)
    }

    pub fn root(&self) -> CommandRef<'_> {
        self.get(self.root_id())
    }

    /// Attach `command` under `parent` and return its id.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: CommandId, command: Command) -> CommandId {
        let id = CommandId(self.nodes.len());
        self.nodes[parent.0].children.push(id);
        self.nodes.push(Node {
            command,
            parent: Some(parent),
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: CommandId) -> CommandRef<'_> {
        CommandRef { tree: self, id }
    }

    pub fn command_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.nodes[id.0].command
    }

    /// Look a command up by its path of names below the root, e.g. `["echo", "times"]`.
    pub fn find(&self, path: &[&str]) -> Option<CommandId> {
        let mut current = self.root();
        for name in path {
            current = current.children().find(|child| child.name() == *name)?;
        }
        Some(current.id())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Read-only view of one command together with its position in the tree.
#[derive(Debug, Clone, Copy)]
pub struct CommandRef<'a> {
    tree: &'a CommandTree,
    id: CommandId,
}

impl<'a> CommandRef<'a> {
    fn node(&self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> CommandId {
        self.id
    }

    pub fn command(&self) -> &'a Command {
        &self.node().command
    }

    pub fn name(&self) -> &'a str {
        self.command().name()
    }

    pub fn short(&self) -> &'a str {
        &self.command().short
    }

    pub fn long(&self) -> &'a str {
        &self.command().long
    }

    pub fn example(&self) -> &'a str {
        &self.command().example
    }

    pub fn is_hidden(&self) -> bool {
        self.command().hidden
    }

    pub fn is_deprecated(&self) -> bool {
        self.command()
            .deprecated
            .as_deref()
            .is_some_and(|message| !message.is_empty())
    }

    /// Visible and not deprecated: documented and linked to.
    pub fn is_available(&self) -> bool {
        !self.is_hidden() && !self.is_deprecated()
    }

    pub fn parent(&self) -> Option<CommandRef<'a>> {
        self.node().parent.map(|id| self.tree.get(id))
    }

    /// Direct children in registration order.
    pub fn children(&self) -> impl Iterator<Item = CommandRef<'a>> + 'a {
        let tree = self.tree;
        self.node().children.iter().map(move |id| tree.get(*id))
    }

    /// Available direct children sorted by name.
    pub fn available_children(&self) -> Vec<CommandRef<'a>> {
        let mut children: Vec<_> = self.children().filter(|c| c.is_available()).collect();
        children.sort_by(|a, b| a.name().cmp(b.name()));
        children
    }

    /// Ancestors from the nearest parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = CommandRef<'a>> + 'a {
        std::iter::successors(self.parent(), |cmd| cmd.parent())
    }

    /// Space-joined names from the root down to this command.
    pub fn command_path(&self) -> String {
        match self.parent() {
            Some(parent) => format!("{} {}", parent.command_path(), self.name()),
            None => self.name().to_string(),
        }
    }

    /// Full invocation line as shown in a synopsis.
    pub fn use_line(&self) -> String {
        let mut line = match self.parent() {
            Some(parent) => format!("{} {}", parent.command_path(), self.command().use_line),
            None => self.command().use_line.clone(),
        };
        if self.command().disable_flags_in_use_line {
            return line;
        }
        let has_flags = crate::flag::has_visible(&self.local_flags())
            || crate::flag::has_visible(&self.inherited_flags());
        if has_flags && !line.contains("[flags]") {
            line.push_str(" [flags]");
        }
        line
    }

    /// The auto tag is suppressed when this command or any ancestor asks for it.
    pub fn auto_gen_tag_disabled(&self) -> bool {
        self.command().disable_auto_gen_tag
            || self.ancestors().any(|cmd| cmd.command().disable_auto_gen_tag)
    }

    /// Flags defined on this command (local and persistent), sorted by name.
    pub fn local_flags(&self) -> Vec<&'a Flag> {
        let command = self.command();
        let mut flags: Vec<&Flag> = command.flags.iter().collect();
        for flag in &command.persistent_flags {
            if !flags.iter().any(|existing| existing.name == flag.name) {
                flags.push(flag);
            }
        }
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        flags
    }

    /// Persistent flags reaching this command from its non-hidden ancestors.
    ///
    /// The nearest ancestor wins on name clashes and flags shadowed by a
    /// local definition are dropped. Sorted by name.
    pub fn inherited_flags(&self) -> Vec<&'a Flag> {
        let local = self.local_flags();
        let mut flags: Vec<&Flag> = Vec::new();
        for ancestor in self.ancestors().filter(|cmd| !cmd.is_hidden()) {
            for flag in &ancestor.command().persistent_flags {
                let shadowed = local.iter().any(|existing| existing.name == flag.name)
                    || flags.iter().any(|existing| existing.name == flag.name);
                if !shadowed {
                    flags.push(flag);
                }
            }
        }
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        flags
    }
}
