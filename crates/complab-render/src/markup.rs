//! Long-form description markup.
//!
//! The only convention interpreted in datasheet text: blank lines separate
//! paragraphs, and `**text**` marks an emphasized span. Everything else is
//! treated as plain text and escaped on output.
//!
//! ```
//! use complab_render::markup::render_paragraphs;
//! use complab_render::view::Fragment;
//!
//! let frag: Fragment = render_paragraphs("**T300** is a standard-modulus fiber.\n\nSizing: <none>")
//!     .into_iter()
//!     .collect();
//! assert_eq!(
//!     frag.to_html(),
//!     "<p><strong>T300</strong> is a standard-modulus fiber.</p><p>Sizing: &lt;none&gt;</p>"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::view::{Element, Node};

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid emphasis regex"));

/// Split text into paragraphs on blank-line boundaries.
///
/// Line endings are normalized to `\n` first; paragraphs that are empty
/// after trimming are dropped.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert one paragraph into inline nodes, turning `**text**` into
/// `<strong>` elements. Unpaired markers stay literal.
pub fn render_inline(paragraph: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;
    for caps in EMPHASIS_RE.captures_iter(paragraph) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            nodes.push(Node::text(&paragraph[last..whole.start()]));
        }
        nodes.push(Element::new("strong").text(inner.as_str()).into());
        last = whole.end();
    }
    if last < paragraph.len() {
        nodes.push(Node::text(&paragraph[last..]));
    }
    nodes
}

/// Render long-form text as a sequence of `<p>` elements.
pub fn render_paragraphs(text: &str) -> Vec<Node> {
    split_paragraphs(text)
        .iter()
        .map(|p| Element::new("p").children(render_inline(p)).into())
        .collect()
}
