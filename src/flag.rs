//! Flag descriptors and the plain-text usage listing.
//!
//! A `Flag` is the read-only view of one option as the host CLI registered
//! it. Defaults are kept stringified so renderers never need to know the
//! concrete value type beyond `ValueKind`.

use serde::Deserialize;

/// Value type of a flag, used to decide quoting and zero values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    Uint,
    Float,
    Duration,
    StringSlice,
}

impl ValueKind {
    /// Type label shown next to the flag in usage listings.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Uint => "uint",
            ValueKind::Float => "float",
            ValueKind::Duration => "duration",
            ValueKind::StringSlice => "strings",
        }
    }

    fn is_zero(self, value: &str) -> bool {
        match self {
            ValueKind::String => value.is_empty(),
            ValueKind::Bool => value == "false",
            ValueKind::Int | ValueKind::Uint => value == "0",
            ValueKind::Float => value == "0" || value == "0.0",
            ValueKind::Duration => value == "0s",
            ValueKind::StringSlice => value == "[]" || value.is_empty(),
        }
    }
}

/// One command-line option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Flag {
    pub name: String,
    #[serde(default)]
    pub shorthand: Option<String>,
    #[serde(default, rename = "default")]
    pub default_value: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub kind: ValueKind,
    /// Value assumed when the flag is given without an argument.
    #[serde(default)]
    pub no_opt_default: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub deprecated: Option<String>,
    #[serde(default)]
    pub shorthand_deprecated: Option<String>,
}

impl Flag {
    /// String flag; its default is shown quoted.
    pub fn string(name: &str, default_value: &str, usage: &str) -> Self {
        Self {
            name: name.to_string(),
            shorthand: None,
            default_value: default_value.to_string(),
            usage: usage.to_string(),
            kind: ValueKind::String,
            no_opt_default: None,
            hidden: false,
            deprecated: None,
            shorthand_deprecated: None,
        }
    }

    /// Bool flag; `--name` alone means `true`.
    pub fn bool(name: &str, default_value: bool, usage: &str) -> Self {
        let mut flag = Self::string(name, &default_value.to_string(), usage);
        flag.kind = ValueKind::Bool;
        flag.no_opt_default = Some("true".to_string());
        flag
    }

    pub fn int(name: &str, default_value: i64, usage: &str) -> Self {
        let mut flag = Self::string(name, &default_value.to_string(), usage);
        flag.kind = ValueKind::Int;
        flag
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_shorthand(mut self, shorthand: &str) -> Self {
        self.shorthand = Some(shorthand.to_string());
        self
    }

    pub fn with_no_opt_default(mut self, value: &str) -> Self {
        self.no_opt_default = Some(value.to_string());
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

    pub fn shorthand_deprecated(mut self, message: &str) -> Self {
        self.shorthand_deprecated = Some(message.to_string());
        self
    }

    /// Hidden and deprecated flags are never documented.
    pub fn is_visible(&self) -> bool {
        !self.hidden && !self.deprecated.as_deref().is_some_and(|m| !m.is_empty())
    }

    /// Shorthand to document, if any.
    pub fn visible_shorthand(&self) -> Option<&str> {
        let deprecated = self
            .shorthand_deprecated
            .as_deref()
            .is_some_and(|m| !m.is_empty());
        match self.shorthand.as_deref() {
            Some(short) if !short.is_empty() && !deprecated => Some(short),
            _ => None,
        }
    }
}

/// Whether any flag in the set would be documented.
pub fn has_visible(flags: &[&Flag]) -> bool {
    flags.iter().any(|flag| flag.is_visible())
}

/// Render the aligned usage listing used by markdown pages.
///
/// Each visible flag becomes one line:
/// `  -s, --strone string   help message (default "one")`.
pub fn usages(flags: &[&Flag]) -> String {
    let mut lines = Vec::new();
    let mut max_len = 0;
    for flag in flags.iter().filter(|flag| flag.is_visible()) {
        let mut left = match flag.visible_shorthand() {
            Some(short) => format!("  -{short}, --{}", flag.name),
            None => format!("      --{}", flag.name),
        };
        if flag.kind != ValueKind::Bool {
            left.push(' ');
            left.push_str(flag.kind.type_name());
        }
        if let Some(no_opt) = flag.no_opt_default.as_deref() {
            match flag.kind {
                ValueKind::String => left.push_str(&format!("[=\"{no_opt}\"]")),
                ValueKind::Bool if no_opt == "true" => {}
                _ => left.push_str(&format!("[={no_opt}]")),
            }
        }
        max_len = max_len.max(left.chars().count());

        let mut right = flag.usage.clone();
        if !flag.kind.is_zero(&flag.default_value) {
            if flag.kind == ValueKind::String {
                right.push_str(&format!(" (default {:?})", flag.default_value));
            } else {
                right.push_str(&format!(" (default {})", flag.default_value));
            }
        }
        lines.push((left, right));
    }

    let continuation = format!("\n{}", " ".repeat(max_len + 3));
    let mut out = String::new();
    for (left, right) in lines {
        let pad = max_len - left.chars().count();
        out.push_str(&left);
        out.push_str(&" ".repeat(pad + 3));
        out.push_str(&right.replace('\n', &continuation));
        out.push('\n');
    }
    out
}
