//! Builds a [`ContentNode`] tree from HTML markup.

use super::{ContentNode, FragmentId, TextFragment};
use scraper::{ElementRef, Html, Node};

/// Elements whose text never renders as readable content.
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "template"];

impl ContentNode {
    /// Parses an HTML fragment into a content tree.
    ///
    /// Fragment ids are assigned in document order starting at zero. Comments
    /// are dropped, as is everything inside `script`, `style` and `template`.
    pub fn from_html(markup: &str) -> ContentNode {
        let document = Html::parse_fragment(markup);
        let mut next_id = 0usize;
        build_element(document.root_element(), &mut next_id)
    }
}

fn build_element(element: ElementRef<'_>, next_id: &mut usize) -> ContentNode {
    let mut children = Vec::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if SKIPPED_TAGS.contains(&child_element.value().name()) {
                continue;
            }
            children.push(build_element(child_element, next_id));
            continue;
        }
        if let Node::Text(text) = child.value() {
            children.push(ContentNode::Text(TextFragment {
                id: FragmentId(*next_id),
                text: String::from(&**text),
            }));
            *next_id += 1;
        }
    }
    ContentNode::Container {
        tag: element.value().name().to_string(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{count_words, normalize_text};

    #[test]
    fn builds_tree_with_text_in_document_order() {
        let root = ContentNode::from_html(
            "<article><h1>Title here</h1><p>First <b>bold</b> para.</p><!-- note --></article>",
        );
        let texts: Vec<String> = root
            .fragments()
            .iter()
            .map(|f| normalize_text(&f.text))
            .collect();
        assert_eq!(texts, vec!["Title here", "First", "bold", "para."]);
        let ids: Vec<usize> = root.fragments().iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn script_and_style_text_is_skipped() {
        let root = ContentNode::from_html(
            "<div><style>p { color: red }</style><p>Two words</p><script>var a = 1;</script></div>",
        );
        let words: u64 = root
            .fragments()
            .iter()
            .map(|f| count_words(&normalize_text(&f.text)))
            .sum();
        assert_eq!(words, 2);
    }
}
