//! Rich text flattening.
//!
//! The content store authors long-form fields as Portable Text: an ordered
//! list of blocks, each holding an ordered list of inline spans. The site only
//! renders plain paragraphs, so each block collapses to one string.

use serde::Deserialize;

/// One block node. Non-text blocks (images, embeds) have no `children`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub children: Option<Vec<Span>>,
}

/// One inline child of a block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: Option<String>,
}

impl Block {
    /// Concatenated span text, no separator. Spans without text contribute nothing.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .flatten()
            .filter_map(|span| span.text.as_deref())
            .collect()
    }
}

/// Flatten blocks into paragraphs.
///
/// One string per block, in order; blocks whose text is empty are dropped.
/// An absent block list yields no paragraphs.
pub fn to_paragraphs(blocks: Option<&[Block]>) -> Vec<String> {
    blocks
        .unwrap_or_default()
        .iter()
        .map(Block::plain_text)
        .filter(|text| !text.is_empty())
        .collect()
}
