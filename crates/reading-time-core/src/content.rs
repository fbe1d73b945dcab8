//! Content tree and the scanner that turns it into measurable text units.

mod html;

use crate::host::GeometryProvider;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n|\r").unwrap());
static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+\s*").unwrap());

/// Stable handle for a text fragment, used by hosts to look up geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub usize);

/// An indivisible run of text, as the page renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub id: FragmentId,
    pub text: String,
}

/// A node of the tracked element's subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Text(TextFragment),
    Container {
        tag: String,
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    pub fn container(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        ContentNode::Container {
            tag: tag.into(),
            children,
        }
    }

    pub fn text(id: usize, text: impl Into<String>) -> Self {
        ContentNode::Text(TextFragment {
            id: FragmentId(id),
            text: text.into(),
        })
    }

    /// Text fragments below this node, in document order.
    pub fn fragments(&self) -> Vec<&TextFragment> {
        let mut out = Vec::new();
        collect_fragments(self, &mut out);
        out
    }
}

fn collect_fragments<'a>(node: &'a ContentNode, out: &mut Vec<&'a TextFragment>) {
    match node {
        ContentNode::Text(fragment) => out.push(fragment),
        ContentNode::Container { children, .. } => {
            for child in children {
                collect_fragments(child, out);
            }
        }
    }
}

/// Vertical extent and word count of one text fragment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextUnit {
    pub top: f64,
    pub bottom: f64,
    pub words: u64,
}

/// Walks `root` and measures every non-blank text fragment.
///
/// Always returns a complete list in document order; callers replace their
/// previous list wholesale.
pub fn scan<G: GeometryProvider + ?Sized>(
    root: &ContentNode,
    geometry: &G,
    scroll_offset: f64,
) -> Vec<TextUnit> {
    let mut units = Vec::new();
    scan_node(root, geometry, scroll_offset, &mut units);
    debug!(
        units = units.len(),
        words = units.iter().map(|u| u.words).sum::<u64>(),
        "Scanned content"
    );
    units
}

fn scan_node<G: GeometryProvider + ?Sized>(
    node: &ContentNode,
    geometry: &G,
    scroll_offset: f64,
    units: &mut Vec<TextUnit>,
) {
    match node {
        ContentNode::Text(fragment) => {
            let normalized = normalize_text(&fragment.text);
            if normalized.is_empty() {
                return;
            }
            let extent = geometry.extent_of(fragment, scroll_offset);
            units.push(TextUnit {
                top: extent.top,
                bottom: extent.bottom,
                words: count_words(&normalized),
            });
        }
        ContentNode::Container { children, .. } => {
            for child in children {
                scan_node(child, geometry, scroll_offset, units);
            }
        }
    }
}

/// Deletes line breaks and trims the result. Words split only by a line
/// break run together.
pub fn normalize_text(text: &str) -> String {
    RE_LINE_BREAK.replace_all(text, "").trim().to_string()
}

/// Number of whitespace-delimited tokens in `text`.
pub fn count_words(text: &str) -> u64 {
    RE_WORD.find_iter(text).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Extent;
    use std::collections::HashMap;

    /// Fixed extents keyed by fragment id.
    struct TableGeometry(HashMap<FragmentId, (f64, f64)>);

    impl GeometryProvider for TableGeometry {
        fn extent_of(&self, fragment: &TextFragment, scroll_offset: f64) -> Extent {
            let (top, bottom) = self.0[&fragment.id];
            Extent::from_viewport_rect(top - scroll_offset, bottom - scroll_offset, scroll_offset)
        }
    }

    fn sample_tree() -> ContentNode {
        ContentNode::container(
            "article",
            vec![
                ContentNode::container(
                    "p",
                    vec![
                        ContentNode::text(0, "The quick brown fox"),
                        ContentNode::container("em", vec![ContentNode::text(1, " jumps ")]),
                    ],
                ),
                ContentNode::text(2, "\n   \r\n"),
                ContentNode::container("p", vec![ContentNode::text(3, "over the\nlazy dog.")]),
            ],
        )
    }

    fn sample_geometry() -> TableGeometry {
        TableGeometry(HashMap::from([
            (FragmentId(0), (100.0, 120.0)),
            (FragmentId(1), (100.0, 120.0)),
            (FragmentId(2), (120.0, 121.0)),
            (FragmentId(3), (140.0, 180.0)),
        ]))
    }

    #[test]
    fn counts_whitespace_delimited_tokens() {
        assert_eq!(count_words("one two  three"), 3);
        assert_eq!(count_words("single"), 1);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("trailing space "), 2);
    }

    #[test]
    fn normalizing_deletes_line_breaks_and_trims() {
        assert_eq!(normalize_text("  over the\nlazy dog.\r\n"), "over thelazy dog.");
        assert_eq!(normalize_text("\n\r\n  "), "");
        assert_eq!(count_words(&normalize_text("over the\nlazy dog.")), 3);
        assert_eq!(count_words(&normalize_text("over the \n lazy dog.")), 4);
    }

    #[test]
    fn scan_measures_every_non_blank_fragment_in_order() {
        let units = scan(&sample_tree(), &sample_geometry(), 50.0);
        assert_eq!(
            units,
            vec![
                TextUnit {
                    top: 100.0,
                    bottom: 120.0,
                    words: 4
                },
                TextUnit {
                    top: 100.0,
                    bottom: 120.0,
                    words: 1
                },
                TextUnit {
                    top: 140.0,
                    bottom: 180.0,
                    words: 3
                },
            ]
        );
    }

    #[test]
    fn blank_fragments_are_never_measured() {
        struct Panicking;
        impl GeometryProvider for Panicking {
            fn extent_of(&self, fragment: &TextFragment, _: f64) -> Extent {
                panic!("measured blank fragment {:?}", fragment.id);
            }
        }
        let tree = ContentNode::container("div", vec![ContentNode::text(0, " \n ")]);
        assert!(scan(&tree, &Panicking, 0.0).is_empty());
    }

    #[test]
    fn fragments_are_listed_in_document_order() {
        let tree = sample_tree();
        let ids: Vec<usize> = tree.fragments().iter().map(|f| f.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
