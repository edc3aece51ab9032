//! Remote document shapes, as returned by the content store's query API.
//!
//! These mirror the authoring schema rather than the site's entities: system
//! fields carry a leading underscore, slugs are objects, long-form text is
//! Portable Text and references come back expanded. Required scalar fields
//! are plain `String`s, so a document missing one fails to deserialize.

use serde::Deserialize;

use crate::portable_text::Block;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slug {
    pub current: String,
}

/// An expanded reference (`field[]->{_id, ...}`); only the id is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefStub {
    #[serde(rename = "_id")]
    pub id: String,
}

/// An expanded reference array. Dereferencing a missing or unpublished
/// target yields `null` in place of the stub.
pub type RefList = Option<Vec<Option<RefStub>>>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageField {
    #[serde(default)]
    pub asset: Option<AssetRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSavingsAccount {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: Slug,
    pub institution: String,
    pub product_name: String,
    pub interest_rate: String,
    pub monthly_fees: String,
    pub min_balance: String,
    #[serde(default)]
    pub cdic: Option<bool>,
    #[serde(default)]
    pub e_transfer_limit: Option<String>,
    #[serde(default)]
    pub withdrawal_limit: Option<String>,
    pub peak_verdict: String,
    pub detailed_review: String,
    #[serde(default)]
    pub full_review: Option<Vec<Block>>,
    pub best_for: String,
    #[serde(default)]
    pub pros: Option<Vec<String>>,
    #[serde(default)]
    pub cons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCreditCard {
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: Slug,
    pub institution: String,
    pub product_name: String,
    pub annual_fee: String,
    pub rewards_rate: String,
    #[serde(default)]
    pub welcome_bonus: Option<String>,
    pub interest_rate: String,
    #[serde(default)]
    pub foreign_transaction_fee: Option<String>,
    #[serde(default)]
    pub insurance_benefits: Option<Vec<String>>,
    pub peak_verdict: String,
    pub detailed_review: String,
    #[serde(default)]
    pub full_review: Option<Vec<Block>>,
    pub best_for: String,
    #[serde(default)]
    pub pros: Option<Vec<String>>,
    #[serde(default)]
    pub cons: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNewsArticle {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub summary: String,
    /// Absent from list projections; only the by-slug query fetches bodies.
    #[serde(default)]
    pub content: Option<Vec<Block>>,
    pub category: String,
    pub author: String,
    #[serde(default)]
    pub author_title: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub image: Option<ImageField>,
    #[serde(default)]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub related_articles: RefList,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFaqEdition {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub questions: Option<Vec<RawFaqQuestion>>,
}

/// The edition a question points back to, expanded as `edition->{_id, title, slug}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEditionRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: Slug,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFaqQuestion {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub slug: Slug,
    pub answer: String,
    #[serde(default)]
    pub full_answer: Option<Vec<Block>>,
    #[serde(default)]
    pub related_questions: RefList,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub sort_order: Option<f64>,
    #[serde(default)]
    pub edition: Option<RawEditionRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPick {
    pub product_id: String,
    pub reasoning: String,
}

/// Runner-up fields are optional at authoring time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRunnerUp {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    #[serde(rename = "_id")]
    pub id: String,
    pub question: String,
    pub slug: Slug,
    #[serde(default)]
    pub category: Option<String>,
    pub short_answer: String,
    pub recommendation: RawPick,
    #[serde(default)]
    pub runner_up: Option<RawRunnerUp>,
    #[serde(default)]
    pub considerations: Option<Vec<String>>,
    #[serde(default)]
    pub full_answer: Option<Vec<Block>>,
    pub last_updated: String,
    #[serde(default)]
    pub related_answers: RefList,
}
