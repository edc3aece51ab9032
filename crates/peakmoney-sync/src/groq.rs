//! GROQ query catalogue.
//!
//! One query per kind and selector. Projections expand references with `->`
//! so a single round trip returns everything the transforms need.

use crate::SyncError;
use crate::source::{ContentKind, ContentQuery, Selector};

macro_rules! savings_projection {
    () => {
        "{
    _id, slug, institution, productName, interestRate, monthlyFees, minBalance, cdic,
    eTransferLimit, withdrawalLimit, peakVerdict, detailedReview, fullReview, bestFor,
    pros, cons
  }"
    };
}

macro_rules! card_projection {
    () => {
        "{
    _id, slug, institution, productName, annualFee, rewardsRate, welcomeBonus,
    interestRate, foreignTransactionFee, insuranceBenefits, peakVerdict, detailedReview,
    fullReview, bestFor, pros, cons
  }"
    };
}

macro_rules! article_list_projection {
    () => {
        "{
    _id, title, slug, summary, category, author, authorTitle, publishedAt, image,
    imageCaption, featured
  }"
    };
}

macro_rules! question_fields {
    () => {
        "_id, question, slug, answer, fullAnswer, sources, sortOrder,
    \"relatedQuestions\": relatedQuestions[]-> { _id, question, slug }"
    };
}

macro_rules! answer_projection {
    () => {
        "{
    _id, question, slug, category, shortAnswer, recommendation, runnerUp, considerations,
    fullAnswer, lastUpdated,
    \"relatedAnswers\": relatedAnswers[]-> { _id, question, slug, category }
  }"
    };
}

pub const ALL_SAVINGS_ACCOUNTS: &str = concat!(
    "*[_type == \"savingsAccount\"] | order(sortOrder asc) ",
    savings_projection!()
);

pub const SAVINGS_ACCOUNT_BY_SLUG: &str = concat!(
    "*[_type == \"savingsAccount\" && slug.current == $slug][0] ",
    savings_projection!()
);

pub const ALL_CREDIT_CARDS: &str = concat!(
    "*[_type == \"creditCard\"] | order(sortOrder asc) ",
    card_projection!()
);

pub const CREDIT_CARD_BY_SLUG: &str = concat!(
    "*[_type == \"creditCard\" && slug.current == $slug][0] ",
    card_projection!()
);

pub const ALL_NEWS_ARTICLES: &str = concat!(
    "*[_type == \"newsArticle\"] | order(publishedAt desc) ",
    article_list_projection!()
);

pub const NEWS_ARTICLES_BY_CATEGORY: &str = concat!(
    "*[_type == \"newsArticle\" && category == $category] | order(publishedAt desc) ",
    article_list_projection!()
);

pub const NEWS_ARTICLE_BY_SLUG: &str = "*[_type == \"newsArticle\" && slug.current == $slug][0] {
    _id, title, slug, summary, content, category, author, authorTitle, publishedAt, image,
    imageCaption, featured,
    \"relatedArticles\": relatedArticles[]-> { _id, title, slug, summary, category }
  }";

pub const ALL_FAQ_EDITIONS: &str = concat!(
    "*[_type == \"faqEdition\"] | order(sortOrder asc, date desc) {
    _id, title, slug, description, date,
    \"questions\": *[_type == \"faqQuestion\" && references(^._id)] | order(sortOrder asc) {
    ",
    question_fields!(),
    "
    }
  }"
);

pub const FAQ_EDITION_BY_SLUG: &str = concat!(
    "*[_type == \"faqEdition\" && slug.current == $slug][0] {
    _id, title, slug, description, date,
    \"questions\": *[_type == \"faqQuestion\" && references(^._id)] | order(sortOrder asc) {
    ",
    question_fields!(),
    "
    }
  }"
);

pub const ALL_FAQ_QUESTIONS: &str = concat!(
    "*[_type == \"faqQuestion\"] | order(sortOrder asc) {
    ",
    question_fields!(),
    ",
    \"edition\": edition-> { _id, title, slug }
  }"
);

pub const FAQ_QUESTION_BY_SLUG: &str = concat!(
    "*[_type == \"faqQuestion\" && slug.current == $slug][0] {
    ",
    question_fields!(),
    ",
    \"edition\": edition-> { _id, title, slug }
  }"
);

pub const ALL_ANSWERS: &str = concat!(
    "*[_type == \"answer\"] | order(sortOrder asc) ",
    answer_projection!()
);

pub const ANSWERS_BY_CATEGORY: &str = concat!(
    "*[_type == \"answer\" && category == $category] | order(sortOrder asc) ",
    answer_projection!()
);

pub const ANSWER_BY_SLUG: &str = concat!(
    "*[_type == \"answer\" && slug.current == $slug][0] ",
    answer_projection!()
);

/// A GROQ query with its parameters (names without the `$`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Groq {
    pub query: &'static str,
    pub params: Vec<(&'static str, String)>,
}

/// The GROQ query answering a content query.
pub fn query_for(q: &ContentQuery) -> Result<Groq, SyncError> {
    use ContentKind as K;

    let (query, params) = match (&q.selector, q.kind) {
        (Selector::All, K::SavingsAccount) => (ALL_SAVINGS_ACCOUNTS, vec![]),
        (Selector::All, K::CreditCard) => (ALL_CREDIT_CARDS, vec![]),
        (Selector::All, K::NewsArticle) => (ALL_NEWS_ARTICLES, vec![]),
        (Selector::All, K::FaqEdition) => (ALL_FAQ_EDITIONS, vec![]),
        (Selector::All, K::FaqQuestion) => (ALL_FAQ_QUESTIONS, vec![]),
        (Selector::All, K::Answer) => (ALL_ANSWERS, vec![]),
        (Selector::Slug(slug), kind) => {
            let query = match kind {
                K::SavingsAccount => SAVINGS_ACCOUNT_BY_SLUG,
                K::CreditCard => CREDIT_CARD_BY_SLUG,
                K::NewsArticle => NEWS_ARTICLE_BY_SLUG,
                K::FaqEdition => FAQ_EDITION_BY_SLUG,
                K::FaqQuestion => FAQ_QUESTION_BY_SLUG,
                K::Answer => ANSWER_BY_SLUG,
            };
            (query, vec![("slug", slug.clone())])
        }
        (Selector::Category(category), K::NewsArticle) => {
            (NEWS_ARTICLES_BY_CATEGORY, vec![("category", category.clone())])
        }
        (Selector::Category(category), K::Answer) => {
            (ANSWERS_BY_CATEGORY, vec![("category", category.clone())])
        }
        (Selector::Category(_), _) => return Err(SyncError::Unsupported(q.to_string())),
    };
    Ok(Groq { query, params })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_queries_bind_slug() {
        let groq = query_for(&ContentQuery::slug(ContentKind::CreditCard, "amex-cobalt")).unwrap();
        assert_eq!(groq.query, CREDIT_CARD_BY_SLUG);
        assert_eq!(groq.params, vec![("slug", "amex-cobalt".to_string())]);
        assert!(groq.query.contains("$slug][0]"));
    }

    #[test]
    fn category_queries_bind_category() {
        let groq = query_for(&ContentQuery::category(ContentKind::Answer, "savings")).unwrap();
        assert_eq!(groq.query, ANSWERS_BY_CATEGORY);
        assert_eq!(groq.params, vec![("category", "savings".to_string())]);
    }

    #[test]
    fn category_unsupported_for_products() {
        let err = query_for(&ContentQuery::category(ContentKind::SavingsAccount, "x")).unwrap_err();
        assert!(matches!(err, SyncError::Unsupported(_)));
    }

    #[test]
    fn list_queries_take_no_params() {
        let groq = query_for(&ContentQuery::all(ContentKind::FaqEdition)).unwrap();
        assert!(groq.params.is_empty());
        assert!(groq.query.contains("references(^._id)"));
        assert!(groq.query.contains("relatedQuestions[]->"));
    }

    #[test]
    fn question_lookup_expands_edition() {
        let groq = query_for(&ContentQuery::slug(ContentKind::FaqQuestion, "q")).unwrap();
        assert!(groq.query.contains("edition->"));
    }
}
