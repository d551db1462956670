//! Markdown-to-roff conversion for generated man pages.
//!
//! Only the subset written by `format` is recognised: a leading `%` title
//! block, `#`/`##` headings, blank-line separated paragraphs, `**bold**`
//! spans, backslash escapes and fenced literal blocks. Anything else is
//! paragraph text.

const FENCE: &str = "```";

/// Convert generated markdown into roff man-page source.
pub fn render(markdown: &str) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = markdown.lines().peekable();

    if let Some(title) = lines.peek().and_then(|line| line.strip_prefix("% ")) {
        append_title(&mut out, title);
        lines.next();
    }

    while let Some(line) = lines.next() {
        if line.trim_end() == FENCE {
            flush_paragraph(&mut out, &mut paragraph);
            let mut block = Vec::new();
            for code in lines.by_ref() {
                if code.trim_end() == FENCE {
                    break;
                }
                block.push(code);
            }
            append_literal_block(&mut out, &block);
        } else if let Some(heading) = line.strip_prefix("# ") {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!(".SH {}\n", render_inline(heading.trim())));
        } else if let Some(heading) = line.strip_prefix("## ") {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!(".SS {}\n", render_inline(heading.trim())));
        } else if line.trim().is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
        } else {
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut out, &mut paragraph);
    out
}

fn append_title(out: &mut String, title: &str) {
    let fields: Vec<String> = split_quoted(title)
        .iter()
        .map(|field| format!("\"{}\"", escape_text(field).replace('"', "\\(dq")))
        .collect();
    out.push_str(".nh\n");
    out.push_str(&format!(".TH {}\n", fields.join(" ")));
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str(".PP\n");
    for line in paragraph.drain(..) {
        out.push_str(&render_inline(line));
        out.push('\n');
    }
}

fn append_literal_block(out: &mut String, block: &[&str]) {
    out.push_str(".PP\n.RS\n.nf\n");
    for line in block {
        let escaped = escape_text(line);
        if escaped.starts_with('.') || escaped.starts_with('\'') {
            out.push_str("\\&");
        }
        out.push_str(&escaped);
        out.push('\n');
    }
    out.push_str(".fi\n.RE\n");
}

/// Render one line of paragraph text.
///
/// Every text run that starts with `.` or `'` is guarded with `\&` so roff
/// never reads it as a request, including runs right after a font change.
fn render_inline(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut out = String::new();
    let mut bold = false;
    let mut run_start = true;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let marker = ch == '*' && chars.get(i + 1) == Some(&'*');
        if marker && (bold || has_closing_marker(&chars, i + 2)) {
            out.push_str(if bold { "\\fP" } else { "\\fB" });
            bold = !bold;
            run_start = true;
            i += 2;
            continue;
        }
        let literal = match (ch, chars.get(i + 1)) {
            ('\\', Some(next)) if next.is_ascii_punctuation() => {
                i += 1;
                *next
            }
            _ => ch,
        };
        if run_start && (literal == '.' || literal == '\'') {
            out.push_str("\\&");
        }
        run_start = false;
        push_escaped(&mut out, literal);
        i += 1;
    }
    if bold {
        out.push_str("\\fP");
    }
    out
}

fn has_closing_marker(chars: &[char], from: usize) -> bool {
    chars
        .get(from..)
        .map(|rest| rest.windows(2).any(|pair| pair[0] == '*' && pair[1] == '*'))
        .unwrap_or(false)
}

/// Escape characters roff would otherwise interpret.
pub(crate) fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '-' => out.push_str("\\-"),
        '\\' => out.push_str("\\e"),
        _ => out.push(ch),
    }
}

/// Split `"a" "b c" ""` into its fields, resolving backslash escapes.
fn split_quoted(text: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '"' {
            continue;
        }
        let mut field = String::new();
        while let Some(inner) = chars.next() {
            match inner {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        field.push(escaped);
                    }
                }
                _ => field.push(inner),
            }
        }
        fields.push(field);
    }
    fields
}
