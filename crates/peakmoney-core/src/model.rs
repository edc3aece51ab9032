//! Canonical content entities, as the rendering layer sees them.
//!
//! Every entity is immutable once built: either deserialized from the static
//! snapshot or produced by a [`Transform`](crate::Transform) from a remote
//! document. Cross-references are carried as ids and resolved later against
//! whichever dataset is active.

use serde::{Deserialize, Serialize};

/// Lookup keys shared by every entity.
pub trait Identified {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Identified for $ty {
                fn id(&self) -> &str {
                    &self.id
                }

                fn slug(&self) -> &str {
                    &self.slug
                }
            }
        )+
    };
}

identified!(
    SavingsAccount,
    CreditCard,
    NewsArticle,
    FaqEdition,
    Question,
    Answer,
    ProductCategory,
    AnswerCategory,
);

/// A reviewed high-interest savings account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsAccount {
    pub id: String,
    pub slug: String,
    pub institution: String,
    pub product_name: String,
    /// Display-formatted, e.g. `"4.00%"`.
    pub interest_rate: String,
    pub monthly_fees: String,
    pub min_balance: String,
    pub cdic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_transfer_limit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawal_limit: Option<String>,
    pub peak_verdict: String,
    pub detailed_review: String,
    /// Paragraphs, in display order.
    #[serde(default)]
    pub full_review: Vec<String>,
    pub best_for: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

/// A reviewed credit card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub slug: String,
    pub institution: String,
    pub product_name: String,
    pub annual_fee: String,
    pub rewards_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_bonus: Option<String>,
    /// Purchase APR, display-formatted.
    pub interest_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_transaction_fee: Option<String>,
    #[serde(default)]
    pub insurance_benefits: Vec<String>,
    pub peak_verdict: String,
    pub detailed_review: String,
    #[serde(default)]
    pub full_review: Vec<String>,
    pub best_for: String,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub content: Vec<String>,
    pub category: String,
    /// Display date, e.g. `"October 24, 2025"`.
    pub date: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub featured: bool,
    /// Ids of other news articles.
    #[serde(default)]
    pub related_articles: Vec<String>,
}

/// A dated collection of FAQ questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEdition {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Month and year, e.g. `"October 2025"`.
    pub date: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl FaqEdition {
    pub fn summary(&self) -> EditionSummary {
        EditionSummary {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub slug: String,
    pub question: String,
    /// Short form, shown in accordions.
    pub answer: String,
    #[serde(default)]
    pub full_answer: Vec<String>,
    /// Ids of questions in any edition.
    #[serde(default)]
    pub related_questions: Vec<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// The identity of an edition, enough to build a question link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionSummary {
    pub id: String,
    pub slug: String,
    pub title: String,
}

/// A question looked up on its own, with the edition it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionQuestion {
    pub question: Question,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<EditionSummary>,
}

impl Identified for EditionQuestion {
    fn id(&self) -> &str {
        &self.question.id
    }

    fn slug(&self) -> &str {
        &self.question.slug
    }
}

/// A product pick inside an expert answer.
///
/// `product_id` names either a savings account or a credit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub product_id: String,
    pub reasoning: String,
}

/// An expert recommendation answering one reader question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub slug: String,
    pub question: String,
    pub short_answer: String,
    pub recommendation: Pick,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_up: Option<Pick>,
    #[serde(default)]
    pub considerations: Vec<String>,
    #[serde(default)]
    pub full_answer: Vec<String>,
    pub last_updated: String,
    /// Ids of other answers, possibly in another category.
    #[serde(default)]
    pub related_answers: Vec<String>,
    /// Answer category slug (`savings`, `credit-cards`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A product vertical shown in navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerCategory {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn savings_account_uses_camel_case_fields() {
        let json = r#"{
            "id": "01",
            "slug": "wealthsimple-cash",
            "institution": "WealthSimple",
            "productName": "Cash Account",
            "interestRate": "4.00%",
            "monthlyFees": "$0.00",
            "minBalance": "$0",
            "cdic": true,
            "eTransferLimit": "Unlimited free",
            "peakVerdict": "The Modern Default",
            "detailedReview": "Review",
            "bestFor": "Everyone",
            "pros": ["High rate"],
            "cons": ["No branches"]
        }"#;
        let account: SavingsAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.product_name, "Cash Account");
        assert_eq!(account.e_transfer_limit.as_deref(), Some("Unlimited free"));
        assert!(account.withdrawal_limit.is_none());
        assert!(account.full_review.is_empty());

        let back = serde_json::to_value(&account).unwrap();
        assert_eq!(back["eTransferLimit"], "Unlimited free");
        assert!(back.get("withdrawalLimit").is_none());
    }

    #[test]
    fn news_article_defaults_optional_lists() {
        let json = r#"{
            "id": "n9",
            "slug": "s",
            "title": "T",
            "summary": "S",
            "category": "News",
            "date": "Oct 1, 2025",
            "author": "A"
        }"#;
        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert!(!article.featured);
        assert!(article.related_articles.is_empty());
        assert!(article.content.is_empty());
    }

    #[test]
    fn edition_summary_copies_identity() {
        let edition = FaqEdition {
            id: "e1".into(),
            slug: "high-yield-savings".into(),
            title: "The High-Yield Savings Briefing".into(),
            description: String::new(),
            date: "October 2025".into(),
            questions: Vec::new(),
        };
        let summary = edition.summary();
        assert_eq!(summary.id, "e1");
        assert_eq!(summary.slug, "high-yield-savings");
    }
}
