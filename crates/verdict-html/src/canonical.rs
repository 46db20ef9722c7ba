use scraper::{ElementRef, Html, Node};

/// Render markup as canonical text.
///
/// The input is parsed with full HTML5 error recovery, so this never fails;
/// two fragments that parse to the same tree produce byte-identical output.
/// Each element contributes an open-tag line (attributes sorted by name,
/// values whitespace-collapsed) and a close-tag line, each text node one
/// line of whitespace-collapsed text, all indented two spaces per depth.
/// Comments, doctypes, and processing instructions are discarded.
pub fn canonicalize(input: &str) -> String {
    let fragment = Html::parse_fragment(input);
    let mut lines = Vec::new();
    write_children(&mut lines, fragment.root_element(), 0);
    lines.join("\n")
}

fn write_children(lines: &mut Vec<String>, parent: ElementRef<'_>, depth: usize) {
    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            write_element(lines, element, depth);
        } else if let Node::Text(text) = child.value() {
            let collapsed = collapse_whitespace(text);
            if !collapsed.is_empty() {
                lines.push(format!("{}{}", indent(depth), collapsed));
            }
        }
    }
}

fn write_element(lines: &mut Vec<String>, element: ElementRef<'_>, depth: usize) {
    let name = element.value().name();
    let mut attributes: Vec<(&str, &str)> = element.value().attrs().collect();
    attributes.sort_by_key(|&(attr_name, _)| attr_name);

    let mut open = format!("{}<{}", indent(depth), name);
    for (attr_name, attr_value) in attributes {
        open.push(' ');
        open.push_str(attr_name);
        open.push_str("=\"");
        open.push_str(&collapse_whitespace(attr_value));
        open.push('"');
    }
    open.push('>');
    lines.push(open);

    write_children(lines, element, depth + 1);

    lines.push(format!("{}</{}>", indent(depth), name));
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatting_noise_is_erased() {
        let tight = canonicalize("<div><p>Hello</p></div>");
        let airy = canonicalize("<div>\n    <p>\n        Hello\n    </p>\n</div>");
        assert_eq!(tight, airy);
    }

    #[test]
    fn attribute_order_is_normalized() {
        let one = canonicalize(r#"<a href="/x" id="home" class="nav">Go</a>"#);
        let two = canonicalize(r#"<a class="nav" id="home" href="/x">Go</a>"#);
        assert_eq!(one, two);
    }

    #[test]
    fn attribute_values_are_whitespace_collapsed() {
        let messy = canonicalize(r#"<div class="a    b  c"></div>"#);
        let clean = canonicalize(r#"<div class="a b c"></div>"#);
        assert_eq!(messy, clean);
    }

    #[test]
    fn text_differences_survive() {
        let hello = canonicalize("<p>Hello</p>");
        let goodbye = canonicalize("<p>Goodbye</p>");
        assert_ne!(hello, goodbye);
    }

    #[test]
    fn output_shape() {
        let text = canonicalize("<ul><li>One</li><li>Two</li></ul>");
        let expected = "<ul>\n  <li>\n    One\n  </li>\n  <li>\n    Two\n  </li>\n</ul>";
        assert_eq!(text, expected);
    }

    #[test]
    fn comments_are_discarded() {
        let with = canonicalize("<div><!-- note --><p>x</p></div>");
        let without = canonicalize("<div><p>x</p></div>");
        assert_eq!(with, without);
    }

    #[test]
    fn top_level_text_is_kept() {
        let text = canonicalize("Hello <b>world</b>");
        assert_eq!(text, "Hello\n<b>\n  world\n</b>");
    }

    #[test]
    fn entities_are_decoded_consistently() {
        assert_eq!(canonicalize("<p>&amp;</p>"), canonicalize("<p>&</p>"));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   \n  "), "");
    }

    #[test]
    fn unclosed_tags_are_recovered() {
        let sloppy = canonicalize("<ul><li>One<li>Two</ul>");
        let strict = canonicalize("<ul><li>One</li><li>Two</li></ul>");
        assert_eq!(sloppy, strict);
    }
}
