//! Structural dump of message parts that aren't plain scalars.
//!
//! Nesting depth is unbounded. Shared values already being printed higher
//! up the tree are printed as `[Circular]` instead of being entered again.

use crate::data::{format_float, DataValue};
use crate::utils::{is_identifier, visible_width};
use colored::Colorize;

/// Containers that fit in this many columns are printed on one line.
const BREAK_LENGTH: usize = 72;
const INDENT: &str = "  ";

pub fn inspect(value: &DataValue) -> String {
    let mut ancestors = vec![];
    render(value, 0, &mut ancestors)
}

fn render(value: &DataValue, depth: usize, ancestors: &mut Vec<usize>) -> String {
    match value {
        DataValue::String(s) => quote(s).green().to_string(),
        DataValue::Int(i) => i.to_string().yellow().to_string(),
        DataValue::Float(f) => format_float(*f).yellow().to_string(),
        DataValue::Bool(b) => b.to_string().yellow().to_string(),
        DataValue::None => "undefined".dimmed().to_string(),
        DataValue::Null => "null".bold().to_string(),
        DataValue::List(items) => {
            let rendered = items
                .iter()
                .map(|item| render(item, depth + 1, ancestors))
                .collect();
            wrap("[", "]", rendered, depth)
        }
        DataValue::Object(entries) => {
            let rendered = entries
                .iter()
                .map(|(key, value)| {
                    format!("{}: {}", render_key(key), render(value, depth + 1, ancestors))
                })
                .collect();
            wrap("{", "}", rendered, depth)
        }
        DataValue::Shared(shared) => {
            let id = shared.id();
            // Must be checked before locking, an ancestor holds this lock.
            if ancestors.contains(&id) {
                return "[Circular]".cyan().to_string();
            }
            ancestors.push(id);
            let inner = shared.lock();
            let result = render(&inner, depth, ancestors);
            drop(inner);
            ancestors.pop();
            result
        }
    }
}

fn wrap(open: &str, close: &str, items: Vec<String>, depth: usize) -> String {
    if items.is_empty() {
        return format!("{}{}", open, close);
    }

    let single_line = format!("{} {} {}", open, items.join(", "), close);
    if !single_line.contains('\n')
        && visible_width(&single_line) + INDENT.len() * depth <= BREAK_LENGTH
    {
        return single_line;
    }

    let inner_indent = INDENT.repeat(depth + 1);
    let separator = format!(",\n{}", inner_indent);
    format!(
        "{}\n{}{}\n{}{}",
        open,
        inner_indent,
        items.join(&separator),
        INDENT.repeat(depth),
        close
    )
}

fn render_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn quote(s: &str) -> String {
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n");
    format!("'{}'", escaped)
}
