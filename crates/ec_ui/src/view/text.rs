use super::{Element, Node};

const BLOCK_ELEMENTS: &[&str] = &[
    "body", "div", "form", "h1", "h2", "h3", "header", "html", "li", "main", "ol", "p", "section",
    "ul",
];

const HIDDEN_ELEMENTS: &[&str] = &["head", "script", "style", "svg", "input", "button"];

impl Node {
    /// Terminal rendering of the same tree. Block elements start new lines,
    /// blank lines are dropped and each line is trimmed. Control characters
    /// other than newline and tab are stripped from text so server content
    /// cannot emit terminal escape sequences.
    pub fn to_plain_text(&self) -> String {
        let mut raw = String::new();
        self.write_text(&mut raw);
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.extend(
                text.chars()
                    .filter(|c| !c.is_control() || matches!(c, '\n' | '\t')),
            ),
            Node::Element(element) => element.write_text(out),
        }
    }
}

impl Element {
    fn write_text(&self, out: &mut String) {
        if HIDDEN_ELEMENTS.contains(&self.tag) {
            return;
        }
        let block = BLOCK_ELEMENTS.contains(&self.tag);
        if block {
            out.push('\n');
        }
        for child in &self.children {
            child.write_text(out);
        }
        if block {
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_lines() {
        let node: Node = Element::new("div")
            .child(Element::new("h2").text("노출됨!"))
            .child(Element::new("p").child(Element::new("span").text("3")).text("위"))
            .child(Element::new("svg").text("ignored"))
            .into();
        assert_eq!(node.to_plain_text(), "노출됨!\n3위");
    }

    #[test]
    fn test_text_is_not_escaped() {
        let node: Node = Element::new("p").text("a < b & c").into();
        assert_eq!(node.to_plain_text(), "a < b & c");
    }

    #[test]
    fn test_control_characters_are_stripped() {
        let node: Node = Element::new("p")
            .text("title\u{1b}[2J\u{1b}]0;pwned\u{7}\r\u{9b}end")
            .into();
        let out = node.to_plain_text();
        assert!(!out.contains('\u{1b}'));
        assert!(!out.contains('\u{7}'));
        assert!(!out.contains('\r'));
        assert!(!out.contains('\u{9b}'));
        assert_eq!(out, "title[2J]0;pwnedend");
    }
}
