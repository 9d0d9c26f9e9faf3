use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use super::{Element, Node};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl Node {
    /// Serialize to HTML. Every text node and attribute value is escaped
    /// here; tag and attribute names are static and trusted.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => {
                encode_text_to_string(text, out);
            }
            Node::Element(element) => element.write_html(out),
        }
    }
}

impl Element {
    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                encode_double_quoted_attribute_to_string(value, out);
                out.push('"');
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// A full HTML document with doctype.
pub fn render_document(root: &Node) -> String {
    let mut out = String::from("<!DOCTYPE html>");
    root.write_html(&mut out);
    out
}
