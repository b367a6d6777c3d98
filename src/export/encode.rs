//! Text encodings of a [`Tree`].
//!
//! XML is the wire format read by IDE integrations. JSON mirrors the tree
//! one-to-one and exists for inspection and tooling.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::export::tree::{Node, Tree};

/// Turns a finished tree into text.
pub trait Encoder {
    fn encode(&self, tree: &Tree) -> Result<String>;
}

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    /// Build the encoder for this format.
    ///
    /// `indent` is the indentation width for pretty output, `None` for compact.
    pub fn encoder(self, indent: Option<usize>) -> Box<dyn Encoder + Send + Sync> {
        match self {
            OutputFormat::Xml => Box::new(XmlEncoder { indent }),
            OutputFormat::Json => Box::new(JsonEncoder {
                pretty: indent.is_some(),
            }),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xml" => Ok(OutputFormat::Xml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "invalid output format '{}'; expected 'xml' or 'json'",
                s
            )),
        }
    }
}

/// XML encoder.
#[derive(Debug, Clone, Default)]
pub struct XmlEncoder {
    /// Indentation width; `None` writes everything on one line
    pub indent: Option<usize>,
}

impl XmlEncoder {
    pub fn pretty(indent: usize) -> Self {
        XmlEncoder {
            indent: Some(indent),
        }
    }

    pub fn compact() -> Self {
        XmlEncoder { indent: None }
    }

    fn write_tree(&self, out: &mut String, tree: &Tree, depth: usize) -> Result<()> {
        self.write_indent(out, depth);
        out.push('<');
        out.push_str(&tree.name);
        for (name, value) in &tree.attributes {
            if let Some(value) = value {
                check_chars(value)
                    .with_context(|| format!("in attribute `{}` of <{}>", name, tree.name))?;
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attribute(value));
                out.push('"');
            }
        }

        if tree.children.is_empty() {
            out.push_str("/>");
            return Ok(());
        }
        out.push('>');

        // Text or mixed content is written inline so whitespace never leaks
        // into text values.
        let inline = self.indent.is_none()
            || tree.children.iter().any(|c| matches!(c, Node::Text(_)));

        for child in &tree.children {
            match child {
                Node::Text(text) => {
                    check_chars(text).with_context(|| format!("in <{}>", tree.name))?;
                    out.push_str(&escape_text(text));
                }
                Node::Element(element) if inline => {
                    XmlEncoder::compact().write_tree(out, element, 0)?
                }
                Node::Element(element) => {
                    out.push('\n');
                    self.write_tree(out, element, depth + 1)?;
                }
            }
        }

        if !inline {
            out.push('\n');
            self.write_indent(out, depth);
        }
        out.push_str("</");
        out.push_str(&tree.name);
        out.push('>');
        Ok(())
    }

    fn write_indent(&self, out: &mut String, depth: usize) {
        if let Some(width) = self.indent {
            out.extend(std::iter::repeat(' ').take(width * depth));
        }
    }
}

impl Encoder for XmlEncoder {
    fn encode(&self, tree: &Tree) -> Result<String> {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        if self.indent.is_some() {
            out.push('\n');
        }
        self.write_tree(&mut out, tree, 0)
            .context("structure cannot be written as XML 1.0")?;
        out.push('\n');
        Ok(out)
    }
}

/// JSON encoder.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    pub pretty: bool,
}

impl Encoder for JsonEncoder {
    fn encode(&self, tree: &Tree) -> Result<String> {
        let mut out = if self.pretty {
            serde_json::to_string_pretty(tree)
        } else {
            serde_json::to_string(tree)
        }
        .context("failed to encode structure as JSON")?;
        out.push('\n');
        Ok(out)
    }
}

/// Reject characters that XML 1.0 has no representation for, escaped or not.
fn check_chars(value: &str) -> Result<()> {
    let allowed = |c: char| {
        matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}')
            || c >= '\u{10000}'
    };
    if let Some(c) = value.chars().find(|&c| !allowed(c)) {
        bail!(
            "character U+{:04X} is not allowed in XML: {:?}",
            c as u32,
            value
        );
    }
    Ok(())
}

/// Escape text content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// Escape an attribute value written between double quotes.
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::new("structure")
            .attr("sbt", "1.9.7")
            .child(
                Tree::new("project")
                    .child(Tree::leaf("id", "core"))
                    .child(Tree::new("dependencies")),
            )
            .child(Tree::leaf("localCachePath", "~/.cache"))
    }

    #[test]
    fn test_pretty_xml() {
        let xml = XmlEncoder::pretty(2).encode(&sample()).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                        <structure sbt=\"1.9.7\">\n\
                        \x20 <project>\n\
                        \x20   <id>core</id>\n\
                        \x20   <dependencies/>\n\
                        \x20 </project>\n\
                        \x20 <localCachePath>~/.cache</localCachePath>\n\
                        </structure>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_compact_xml() {
        let xml = XmlEncoder::compact().encode(&sample()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><structure sbt=\"1.9.7\"><project><id>core</id>\
             <dependencies/></project><localCachePath>~/.cache</localCachePath></structure>\n"
        );
    }

    #[test]
    fn test_omitted_attributes() {
        let tree = Tree::new("sources").flag("managed", false).text("./src");
        let xml = XmlEncoder::compact().encode(&tree).unwrap();
        assert!(xml.ends_with("<sources>./src</sources>\n"));
    }

    #[test]
    fn test_escaping() {
        let tree = Tree::new("option")
            .attr("value", "a\"b'<c>&")
            .text("-Xplugin:<x> & y");
        let xml = XmlEncoder::compact().encode(&tree).unwrap();
        assert!(xml.contains("value=\"a&quot;b&apos;&lt;c&gt;&amp;\""));
        assert!(xml.contains(">-Xplugin:&lt;x&gt; &amp; y</option>"));
    }

    #[test]
    fn test_json_encoding() {
        let json = JsonEncoder { pretty: false }.encode(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "structure");
        assert_eq!(value["attributes"][0][0], "sbt");
        assert_eq!(value["children"][1]["children"][0], "~/.cache");
    }

    #[test]
    fn test_control_characters_rejected() {
        let err = XmlEncoder::compact()
            .encode(&Tree::leaf("option", "-Dsep=\u{1}x"))
            .unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("U+0001"));
        assert!(message.contains("in <option>"));

        let tree = Tree::new("module").attr("name", "lib\u{FFFF}");
        let err = XmlEncoder::pretty(2).encode(&tree).unwrap_err();
        assert!(format!("{:#}", err).contains("in attribute `name` of <module>"));
    }

    #[test]
    fn test_whitespace_and_astral_characters_allowed() {
        let tree = Tree::new("option").attr("value", "a\tb\nc").text("x\r\ny \u{1F600}");
        let xml = XmlEncoder::compact().encode(&tree).unwrap();
        assert!(xml.contains("value=\"a&#9;b&#10;c\""));
        assert!(xml.contains(">x\r\ny \u{1F600}</option>"));
    }

    #[test]
    fn test_json_omits_unset_attributes() {
        let tree = Tree::new("android")
            .attr("version", "android-21")
            .flag("isLibrary", false)
            .attr_opt("configuration", None);
        let json = JsonEncoder { pretty: false }.encode(&tree).unwrap();

        assert!(!json.contains("isLibrary"));
        assert!(!json.contains("configuration"));
        assert!(!json.contains("null"));
        assert_eq!(
            json,
            "{\"name\":\"android\",\"attributes\":[[\"version\",\"android-21\"]],\"children\":[]}\n"
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("XML".parse::<OutputFormat>(), Ok(OutputFormat::Xml));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
