//! Remote document → canonical entity.
//!
//! Transforms are total over well-formed documents: optional lists default to
//! empty, rich text is flattened, dates are formatted and image references are
//! resolved. Expanded references are reduced to ids so they resolve against the
//! live dataset later rather than the copy embedded at fetch time.

use serde::de::DeserializeOwned;

use crate::config::SanityConfig;
use crate::dates::{format_long_date, format_month_year};
use crate::image::ImageUrlBuilder;
use crate::model::{
    Answer, CreditCard, EditionQuestion, EditionSummary, FaqEdition, NewsArticle, Pick, Question,
    SavingsAccount,
};
use crate::portable_text::to_paragraphs;
use crate::raw::{
    RawAnswer, RawCreditCard, RawFaqEdition, RawFaqQuestion, RawNewsArticle, RawSavingsAccount,
    RefList,
};

/// Sort key assigned by the authoring schema when none is set.
pub const DEFAULT_SORT_ORDER: f64 = 100.0;

/// Settings the transforms need beyond the document itself.
#[derive(Debug, Clone)]
pub struct Transformer {
    images: ImageUrlBuilder,
    image_width: u32,
}

impl Transformer {
    pub fn new(images: ImageUrlBuilder, image_width: u32) -> Self {
        Self {
            images,
            image_width,
        }
    }

    pub fn from_config(config: &SanityConfig) -> Self {
        Self::new(config.image_builder(), config.image_width)
    }

    pub fn transform<R: Transform>(&self, raw: R) -> R::Entity {
        raw.transform(self)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::from_config(&SanityConfig::default())
    }
}

/// A remote document shape with a canonical counterpart.
pub trait Transform: DeserializeOwned {
    type Entity;

    fn transform(self, t: &Transformer) -> Self::Entity;
}

/// Ids of the references that resolved; dangling entries are dropped.
fn ref_ids(refs: RefList) -> Vec<String> {
    refs.unwrap_or_default()
        .into_iter()
        .flatten()
        .map(|r| r.id)
        .collect()
}

impl Transform for RawSavingsAccount {
    type Entity = SavingsAccount;

    fn transform(self, _: &Transformer) -> SavingsAccount {
        SavingsAccount {
            id: self.id,
            slug: self.slug.current,
            institution: self.institution,
            product_name: self.product_name,
            interest_rate: self.interest_rate,
            monthly_fees: self.monthly_fees,
            min_balance: self.min_balance,
            cdic: self.cdic.unwrap_or(true),
            e_transfer_limit: self.e_transfer_limit,
            withdrawal_limit: self.withdrawal_limit,
            peak_verdict: self.peak_verdict,
            detailed_review: self.detailed_review,
            full_review: to_paragraphs(self.full_review.as_deref()),
            best_for: self.best_for,
            pros: self.pros.unwrap_or_default(),
            cons: self.cons.unwrap_or_default(),
        }
    }
}

impl Transform for RawCreditCard {
    type Entity = CreditCard;

    fn transform(self, _: &Transformer) -> CreditCard {
        CreditCard {
            id: self.id,
            slug: self.slug.current,
            institution: self.institution,
            product_name: self.product_name,
            annual_fee: self.annual_fee,
            rewards_rate: self.rewards_rate,
            welcome_bonus: self.welcome_bonus,
            interest_rate: self.interest_rate,
            foreign_transaction_fee: self.foreign_transaction_fee,
            insurance_benefits: self.insurance_benefits.unwrap_or_default(),
            peak_verdict: self.peak_verdict,
            detailed_review: self.detailed_review,
            full_review: to_paragraphs(self.full_review.as_deref()),
            best_for: self.best_for,
            pros: self.pros.unwrap_or_default(),
            cons: self.cons.unwrap_or_default(),
        }
    }
}

impl Transform for RawNewsArticle {
    type Entity = NewsArticle;

    fn transform(self, t: &Transformer) -> NewsArticle {
        let image_url = self
            .image
            .and_then(|image| image.asset)
            .and_then(|asset| t.images.url(&asset.reference, t.image_width));

        NewsArticle {
            id: self.id,
            slug: self.slug.current,
            title: self.title,
            summary: self.summary,
            content: to_paragraphs(self.content.as_deref()),
            category: self.category,
            date: format_long_date(&self.published_at),
            author: self.author,
            author_title: self.author_title,
            image_url,
            image_caption: self.image_caption,
            featured: self.featured.unwrap_or(false),
            related_articles: ref_ids(self.related_articles),
        }
    }
}

impl Transform for RawFaqQuestion {
    type Entity = EditionQuestion;

    fn transform(self, _: &Transformer) -> EditionQuestion {
        let edition = self.edition.map(|e| EditionSummary {
            id: e.id,
            slug: e.slug.current,
            title: e.title,
        });
        let question = Question {
            id: self.id,
            slug: self.slug.current,
            question: self.question,
            answer: self.answer,
            full_answer: to_paragraphs(self.full_answer.as_deref()),
            related_questions: ref_ids(self.related_questions),
            sources: self.sources.unwrap_or_default(),
        };
        EditionQuestion { question, edition }
    }
}

impl Transform for RawFaqEdition {
    type Entity = FaqEdition;

    fn transform(self, t: &Transformer) -> FaqEdition {
        let mut questions = self.questions.unwrap_or_default();
        // Stable: ties keep authored order.
        questions.sort_by(|a, b| {
            let a = a.sort_order.unwrap_or(DEFAULT_SORT_ORDER);
            let b = b.sort_order.unwrap_or(DEFAULT_SORT_ORDER);
            a.total_cmp(&b)
        });

        FaqEdition {
            id: self.id,
            slug: self.slug.current,
            title: self.title,
            description: self.description,
            date: format_month_year(&self.date),
            questions: questions
                .into_iter()
                .map(|q| q.transform(t).question)
                .collect(),
        }
    }
}

impl Transform for RawAnswer {
    type Entity = Answer;

    fn transform(self, _: &Transformer) -> Answer {
        let runner_up = self.runner_up.and_then(|r| {
            r.product_id.map(|product_id| Pick {
                product_id,
                reasoning: r.reasoning.unwrap_or_default(),
            })
        });

        Answer {
            id: self.id,
            slug: self.slug.current,
            question: self.question,
            short_answer: self.short_answer,
            recommendation: Pick {
                product_id: self.recommendation.product_id,
                reasoning: self.recommendation.reasoning,
            },
            runner_up,
            considerations: self.considerations.unwrap_or_default(),
            full_answer: to_paragraphs(self.full_answer.as_deref()),
            last_updated: self.last_updated,
            related_answers: ref_ids(self.related_answers),
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw<R: DeserializeOwned>(value: serde_json::Value) -> R {
        serde_json::from_value(value).unwrap()
    }

    fn savings_doc() -> serde_json::Value {
        json!({
            "_id": "sa-1",
            "_type": "savingsAccount",
            "slug": {"current": "eq-bank-savings-plus"},
            "institution": "EQ Bank",
            "productName": "Savings Plus",
            "interestRate": "2.50%",
            "monthlyFees": "$0.00",
            "minBalance": "$0",
            "peakVerdict": "The Reliable Runner-Up",
            "detailedReview": "Stable.",
            "fullReview": [
                {"children": [{"text": "A"}]},
                {"children": []},
                {"children": [{"text": "B"}, {"text": "C"}]}
            ],
            "bestFor": "Conservative savers"
        })
    }

    #[test]
    fn savings_account_flattens_review_and_defaults_lists() {
        let t = Transformer::default();
        let account = t.transform(raw::<RawSavingsAccount>(savings_doc()));
        assert_eq!(account.id, "sa-1");
        assert_eq!(account.slug, "eq-bank-savings-plus");
        assert_eq!(account.full_review, vec!["A", "BC"]);
        assert!(account.pros.is_empty());
        assert!(account.cons.is_empty());
        assert!(account.cdic);
    }

    #[test]
    fn missing_required_scalar_fails_to_decode() {
        let mut doc = savings_doc();
        doc.as_object_mut().unwrap().remove("institution");
        assert!(serde_json::from_value::<RawSavingsAccount>(doc).is_err());
    }

    #[test]
    fn credit_card_keeps_optional_fields() {
        let t = Transformer::default();
        let card = t.transform(raw::<RawCreditCard>(json!({
            "_id": "cc-9",
            "slug": {"current": "amex-cobalt"},
            "institution": "American Express",
            "productName": "Cobalt Card",
            "annualFee": "$155.88",
            "rewardsRate": "5x food",
            "interestRate": "21.99%",
            "foreignTransactionFee": "2.5%",
            "peakVerdict": "The Points Maximizer",
            "detailedReview": "Points.",
            "bestFor": "Foodies",
            "pros": ["5x on food"],
            "cons": ["Amex acceptance"]
        })));
        assert_eq!(card.foreign_transaction_fee.as_deref(), Some("2.5%"));
        assert!(card.welcome_bonus.is_none());
        assert!(card.insurance_benefits.is_empty());
        assert!(card.full_review.is_empty());
        assert_eq!(card.pros, vec!["5x on food"]);
    }

    #[test]
    fn news_article_formats_date_image_and_refs() {
        let t = Transformer::default();
        let article = t.transform(raw::<RawNewsArticle>(json!({
            "_id": "art-1",
            "title": "Bank of Canada Holds",
            "slug": {"current": "boc-holds"},
            "summary": "Rates unchanged.",
            "content": [{"children": [{"text": "Para one."}]}],
            "category": "News",
            "author": "Sarah Jenkins",
            "publishedAt": "2025-10-24T14:30:00Z",
            "image": {"asset": {"_ref": "image-abc123-1600x900-jpg"}},
            "featured": true,
            "relatedArticles": [
                {"_id": "art-2", "title": "Other", "slug": {"current": "other"}},
                {"_id": "art-3", "title": "Third", "slug": {"current": "third"}}
            ]
        })));
        assert_eq!(article.date, "October 24, 2025");
        assert_eq!(
            article.image_url.as_deref(),
            Some("https://cdn.sanity.io/images/37uuhcx4/production/abc123-1600x900.jpg?w=1200")
        );
        assert!(article.featured);
        assert_eq!(article.content, vec!["Para one."]);
        assert_eq!(article.related_articles, vec!["art-2", "art-3"]);
    }

    #[test]
    fn dangling_references_are_dropped() {
        let t = Transformer::default();
        let article = t.transform(raw::<RawNewsArticle>(json!({
            "_id": "art-5",
            "title": "T",
            "slug": {"current": "t"},
            "summary": "S",
            "category": "Investing",
            "author": "A",
            "publishedAt": "2025-01-02T00:00:00Z",
            "relatedArticles": [{"_id": "art-2"}, null, {"_id": "art-3"}]
        })));
        assert_eq!(article.related_articles, vec!["art-2", "art-3"]);

        let answer = t.transform(raw::<RawAnswer>(json!({
            "_id": "ans-9",
            "question": "Q?",
            "slug": {"current": "q"},
            "shortAnswer": "A.",
            "recommendation": {"productId": "01", "reasoning": "R"},
            "lastUpdated": "2025-10-20",
            "relatedAnswers": [null]
        })));
        assert!(answer.related_answers.is_empty());

        let hit = t.transform(raw::<RawFaqQuestion>(json!({
            "_id": "fq-1",
            "question": "Q?",
            "slug": {"current": "q"},
            "answer": "A.",
            "relatedQuestions": [null, {"_id": "fq-2"}]
        })));
        assert_eq!(hit.question.related_questions, vec!["fq-2"]);
    }

    #[test]
    fn news_article_without_image_has_no_url() {
        let t = Transformer::default();
        let article = t.transform(raw::<RawNewsArticle>(json!({
            "_id": "art-4",
            "title": "T",
            "slug": {"current": "t"},
            "summary": "S",
            "category": "Guide",
            "author": "A",
            "publishedAt": "2025-01-02T00:00:00Z"
        })));
        assert!(article.image_url.is_none());
        assert!(article.content.is_empty());
        assert!(article.related_articles.is_empty());
        assert!(!article.featured);
    }

    #[test]
    fn edition_orders_questions_by_sort_key() {
        let t = Transformer::default();
        let edition = t.transform(raw::<RawFaqEdition>(json!({
            "_id": "ed-1",
            "title": "Briefing",
            "slug": {"current": "briefing"},
            "description": "D",
            "date": "2025-10-01",
            "questions": [
                {"_id": "q-c", "question": "C?", "slug": {"current": "c"}, "answer": "c"},
                {"_id": "q-a", "question": "A?", "slug": {"current": "a"}, "answer": "a", "sortOrder": 1},
                {"_id": "q-b", "question": "B?", "slug": {"current": "b"}, "answer": "b", "sortOrder": 2},
                {"_id": "q-d", "question": "D?", "slug": {"current": "d"}, "answer": "d", "sortOrder": 100}
            ]
        })));
        assert_eq!(edition.date, "October 2025");
        let ids: Vec<&str> = edition.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q-a", "q-b", "q-c", "q-d"]);
    }

    #[test]
    fn question_carries_edition_identity() {
        let t = Transformer::default();
        let found = t.transform(raw::<RawFaqQuestion>(json!({
            "_id": "q-1",
            "question": "Is my money safe?",
            "slug": {"current": "is-my-money-safe"},
            "answer": "Yes.",
            "relatedQuestions": [{"_id": "q-2", "question": "Other?"}],
            "edition": {"_id": "ed-1", "title": "Briefing", "slug": {"current": "briefing"}}
        })));
        assert_eq!(found.question.related_questions, vec!["q-2"]);
        assert!(found.question.sources.is_empty());
        let edition = found.edition.unwrap();
        assert_eq!(edition.slug, "briefing");
        assert_eq!(edition.title, "Briefing");
    }

    #[test]
    fn answer_drops_runner_up_without_product() {
        let t = Transformer::default();
        let answer = t.transform(raw::<RawAnswer>(json!({
            "_id": "ans-1",
            "question": "Best savings account?",
            "slug": {"current": "best-savings"},
            "category": "savings",
            "shortAnswer": "WealthSimple.",
            "recommendation": {"productId": "01", "reasoning": "Rate."},
            "runnerUp": {"reasoning": "No product set"},
            "lastUpdated": "2025-10-20",
            "relatedAnswers": [{"_id": "ans-2"}]
        })));
        assert_eq!(answer.recommendation.product_id, "01");
        assert!(answer.runner_up.is_none());
        assert!(answer.considerations.is_empty());
        assert_eq!(answer.related_answers, vec!["ans-2"]);
        assert_eq!(answer.category.as_deref(), Some("savings"));
        assert_eq!(answer.last_updated, "2025-10-20");
    }

    #[test]
    fn answer_runner_up_reasoning_defaults_empty() {
        let t = Transformer::default();
        let answer = t.transform(raw::<RawAnswer>(json!({
            "_id": "ans-3",
            "question": "Q",
            "slug": {"current": "q"},
            "shortAnswer": "S",
            "recommendation": {"productId": "cc01", "reasoning": "R"},
            "runnerUp": {"productId": "cc02"},
            "lastUpdated": "2025-10-20"
        })));
        let runner_up = answer.runner_up.unwrap();
        assert_eq!(runner_up.product_id, "cc02");
        assert_eq!(runner_up.reasoning, "");
    }
}
