//! Canonical Peak Money content: entities, remote document shapes, and the
//! transforms between them.

pub mod config;
pub mod dates;
pub mod image;
pub mod model;
pub mod portable_text;
pub mod raw;
pub mod transform;

pub use config::SanityConfig;
pub use image::ImageUrlBuilder;
pub use model::{
    Answer, AnswerCategory, CreditCard, EditionQuestion, EditionSummary, FaqEdition, Identified,
    NewsArticle, Pick, ProductCategory, Question, SavingsAccount,
};
pub use portable_text::to_paragraphs;
pub use transform::{Transform, Transformer};
