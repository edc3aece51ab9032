//! The remote content source contract.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::SyncError;

/// Remote document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    SavingsAccount,
    CreditCard,
    NewsArticle,
    FaqEdition,
    FaqQuestion,
    Answer,
}

impl ContentKind {
    /// The `_type` of the remote document.
    pub fn doc_type(self) -> &'static str {
        match self {
            ContentKind::SavingsAccount => "savingsAccount",
            ContentKind::CreditCard => "creditCard",
            ContentKind::NewsArticle => "newsArticle",
            ContentKind::FaqEdition => "faqEdition",
            ContentKind::FaqQuestion => "faqQuestion",
            ContentKind::Answer => "answer",
        }
    }

    /// Plural, human-readable name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::SavingsAccount => "savings accounts",
            ContentKind::CreditCard => "credit cards",
            ContentKind::NewsArticle => "news articles",
            ContentKind::FaqEdition => "FAQ editions",
            ContentKind::FaqQuestion => "FAQ questions",
            ContentKind::Answer => "answers",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.doc_type())
    }
}

/// What to fetch of a kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    All,
    Slug(String),
    Category(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentQuery {
    pub kind: ContentKind,
    pub selector: Selector,
}

impl ContentQuery {
    pub fn all(kind: ContentKind) -> Self {
        Self {
            kind,
            selector: Selector::All,
        }
    }

    pub fn slug(kind: ContentKind, slug: impl Into<String>) -> Self {
        Self {
            kind,
            selector: Selector::Slug(slug.into()),
        }
    }

    pub fn category(kind: ContentKind, category: impl Into<String>) -> Self {
        Self {
            kind,
            selector: Selector::Category(category.into()),
        }
    }
}

impl fmt::Display for ContentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.selector {
            Selector::All => write!(f, "{} (all)", self.kind),
            Selector::Slug(slug) => write!(f, "{} slug={slug}", self.kind),
            Selector::Category(category) => write!(f, "{} category={category}", self.kind),
        }
    }
}

/// A headless document store answering content queries.
///
/// Reads are idempotent. The result is the raw query result: a document, an
/// array of documents, or `null`. `null` and `[]` both mean "nothing there";
/// callers cannot tell an unpopulated store from a confirmed empty one.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, query: &ContentQuery) -> Result<Value, SyncError>;
}

#[async_trait]
impl<T: ContentSource + ?Sized> ContentSource for Arc<T> {
    async fn fetch(&self, query: &ContentQuery) -> Result<Value, SyncError> {
        (**self).fetch(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_display() {
        assert_eq!(
            ContentQuery::slug(ContentKind::NewsArticle, "boc-holds").to_string(),
            "newsArticle slug=boc-holds"
        );
        assert_eq!(
            ContentQuery::all(ContentKind::FaqEdition).to_string(),
            "faqEdition (all)"
        );
    }
}
