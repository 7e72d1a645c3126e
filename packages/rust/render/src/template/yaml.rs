//! Minimal emitter for the email builder's YAML-like document format.
//!
//! Every string value is written single-quoted with embedded quotes doubled,
//! so escaping happens in exactly one place. Plain scalars (`null`, numbers,
//! booleans, bare words) are written as-is.

/// A node of the template document tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Quoted(String),
    Plain(String),
    Map(Vec<(String, Node)>),
    List(Vec<Node>),
}

/// Single-quoted string value.
pub(crate) fn q(value: impl Into<String>) -> Node {
    Node::Quoted(value.into())
}

/// Plain scalar written verbatim.
pub(crate) fn plain(value: impl Into<String>) -> Node {
    Node::Plain(value.into())
}

pub(crate) fn null() -> Node {
    plain("null")
}

pub(crate) fn map<'a>(entries: impl IntoIterator<Item = (&'a str, Node)>) -> Node {
    Node::Map(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}

pub(crate) fn list(items: impl IntoIterator<Item = Node>) -> Node {
    Node::List(items.into_iter().collect())
}

/// Double every single quote so the value can sit inside a single-quoted field.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "''")
}

/// Serialize a document. The root is expected to be a map.
pub(crate) fn to_string(root: &Node) -> String {
    let mut out = String::new();
    match root {
        Node::Map(entries) => write_map(entries, 0, &mut out),
        other => write_scalar_line(other, &mut out),
    }
    out
}

fn write_map(entries: &[(String, Node)], indent: usize, out: &mut String) {
    for (key, value) in entries {
        pad(indent, out);
        out.push_str(key);
        out.push(':');
        write_value(value, indent, out);
    }
}

fn write_list(items: &[Node], indent: usize, out: &mut String) {
    for item in items {
        pad(indent, out);
        out.push('-');
        write_value(item, indent, out);
    }
}

/// Write whatever follows a `key:` or `-` marker at `indent`.
fn write_value(value: &Node, indent: usize, out: &mut String) {
    match value {
        Node::Map(entries) if entries.is_empty() => out.push_str(" {}\n"),
        Node::List(items) if items.is_empty() => out.push_str(" []\n"),
        Node::Map(entries) => {
            out.push('\n');
            write_map(entries, indent + 2, out);
        }
        Node::List(items) => {
            out.push('\n');
            write_list(items, indent + 2, out);
        }
        scalar => {
            out.push(' ');
            write_scalar_line(scalar, out);
        }
    }
}

fn write_scalar_line(value: &Node, out: &mut String) {
    match value {
        Node::Quoted(s) => {
            out.push('\'');
            out.push_str(&escape_single_quotes(s));
            out.push('\'');
        }
        Node::Plain(s) => out.push_str(s),
        Node::Map(_) | Node::List(_) => {}
    }
    out.push('\n');
}

fn pad(indent: usize, out: &mut String) {
    out.extend(std::iter::repeat_n(' ', indent));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_single_quotes("it's"), "it''s");
        assert_eq!(escape_single_quotes("no quotes"), "no quotes");
        assert_eq!(to_string(&map([("body", q("it's"))])), "body: 'it''s'\n");
    }

    #[test]
    fn nested_layout() {
        let doc = map([
            ("version", plain("3.0.1")),
            ("fields", Node::Map(Vec::new())),
            ("history", Node::List(Vec::new())),
            (
                "content",
                list([map([("type", plain("text")), ("thumbnail", null())])]),
            ),
        ]);
        let expected = "\
version: 3.0.1
fields: {}
history: []
content:
  -
    type: text
    thumbnail: null
";
        assert_eq!(to_string(&doc), expected);
    }

    #[test]
    fn scalar_list_items_stay_inline() {
        let doc = map([("fonts", list([q("https://fonts.example.com")]))]);
        assert_eq!(to_string(&doc), "fonts:\n  - 'https://fonts.example.com'\n");
    }
}
