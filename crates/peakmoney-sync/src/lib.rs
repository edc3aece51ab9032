//! Remote content resolution with static fallback.
//!
//! A [`ContentSource`] answers GROQ-backed queries; the typed queries in
//! [`content`] transform what comes back and fall back to the bundled
//! [`Snapshot`](peakmoney_store::Snapshot) whenever the remote store is empty
//! or unreachable. [`Library`] holds one query per collection.

mod error;
pub use error::SyncError;

pub mod content;
pub mod groq;
#[cfg(feature = "http")]
pub mod http;
pub mod library;
pub mod memory;
pub mod query;
pub mod source;

pub use content::{
    AllQuery, Answers, CategoryQuery, ContentType, Context, CreditCards, FaqEditions,
    FaqQuestions, NewsArticles, SavingsAccounts, SlugQuery,
};
#[cfg(feature = "http")]
pub use http::SanityClient;
pub use library::{Library, LoadReport};
pub use memory::MemorySource;
pub use query::{Outcome, Phase, Query, QueryState};
pub use source::{ContentKind, ContentQuery, ContentSource, Selector};
