//! Reference documentation generator for command trees.
//!
//! The host application describes its commands as a [`tree::CommandTree`];
//! [`man`] and [`markdown`] render one page per command, and the tree
//! generators write those pages through a [`fs::DocFs`].

pub mod flag;
pub mod fs;
pub mod load;
pub mod man;
pub mod markdown;
pub mod tree;
pub mod walk;

pub use flag::{Flag, ValueKind};
pub use fs::{DocFs, MemFs, OsFs};
pub use man::{gen_man, gen_man_tree, gen_man_tree_from_opts, ManHeader, ManTreeOptions};
pub use markdown::{gen_markdown, gen_markdown_tree};
pub use tree::{Command, CommandId, CommandRef, CommandTree};
