//! Static content snapshot.
//!
//! The bundled snapshot is compiled into the binary from `data/snapshot.json`
//! and parsed once on first use. It is the seed dataset every query starts
//! from and the fallback whenever the remote store is empty or unreachable.

use std::path::Path;
use std::sync::{Arc, LazyLock};

use peakmoney_core::{
    Answer, AnswerCategory, CreditCard, EditionQuestion, FaqEdition, Identified, NewsArticle,
    ProductCategory, SavingsAccount,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::StoreError;
use crate::dataset::Dataset;

const BUNDLED_JSON: &str = include_str!("../data/snapshot.json");

static BUNDLED: LazyLock<Arc<Snapshot>> = LazyLock::new(|| {
    let snapshot =
        Snapshot::from_json(BUNDLED_JSON).expect("bundled data/snapshot.json must parse");
    Arc::new(snapshot)
});

/// Every static content collection, in canonical entity shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub product_categories: Vec<ProductCategory>,
    pub savings_accounts: Vec<SavingsAccount>,
    pub credit_cards: Vec<CreditCard>,
    pub news_articles: Vec<NewsArticle>,
    pub faq_editions: Vec<FaqEdition>,
    pub answer_categories: Vec<AnswerCategory>,
}

impl Snapshot {
    /// The compiled-in snapshot, shared process-wide.
    pub fn bundled() -> Arc<Snapshot> {
        Arc::clone(&BUNDLED)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot file with the same layout as the bundled one.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::SnapshotNotFound(path.to_path_buf()));
        }
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            savings_accounts = snapshot.savings_accounts.len(),
            credit_cards = snapshot.credit_cards.len(),
            news_articles = snapshot.news_articles.len(),
            faq_editions = snapshot.faq_editions.len(),
            "loaded static snapshot"
        );
        Ok(snapshot)
    }

    /// All answers across categories, each tagged with its category slug.
    pub fn answers(&self) -> Vec<Answer> {
        self.answer_categories
            .iter()
            .flat_map(|category| {
                category
                    .answers
                    .iter()
                    .cloned()
                    .map(|answer| with_category(answer, &category.slug))
            })
            .collect()
    }

    /// Answers of one category; unknown categories have none.
    pub fn answers_in_category(&self, category_slug: &str) -> Vec<Answer> {
        self.answer_categories
            .iter()
            .find(|c| c.slug == category_slug)
            .map(|category| {
                category
                    .answers
                    .iter()
                    .cloned()
                    .map(|answer| with_category(answer, &category.slug))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn news_in_category(&self, category: &str) -> Vec<NewsArticle> {
        self.news_articles
            .iter()
            .filter(|a| a.category == category)
            .cloned()
            .collect()
    }

    /// A question by slug, searched across every edition.
    pub fn find_question(&self, slug: &str) -> Option<EditionQuestion> {
        self.faq_editions.iter().find_map(|edition| {
            edition
                .questions
                .iter()
                .find(|q| q.slug == slug)
                .map(|q| EditionQuestion {
                    question: q.clone(),
                    edition: Some(edition.summary()),
                })
        })
    }

    /// The static collections as an active dataset.
    pub fn dataset(&self) -> Dataset {
        Dataset::new(
            self.savings_accounts.clone(),
            self.credit_cards.clone(),
            self.news_articles.clone(),
            self.faq_editions.clone(),
            self.answers(),
        )
    }
}

fn with_category(mut answer: Answer, category: &str) -> Answer {
    if answer.category.is_none() {
        answer.category = Some(category.to_string());
    }
    answer
}

/// Find an entity by slug in a static collection.
pub fn by_slug<T: Identified + Clone>(items: &[T], slug: &str) -> Option<T> {
    items.iter().find(|item| item.slug() == slug).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn bundled_snapshot_parses_and_is_seeded() {
        let snapshot = Snapshot::bundled();
        assert_eq!(snapshot.savings_accounts.len(), 4);
        assert_eq!(snapshot.credit_cards.len(), 4);
        assert_eq!(snapshot.news_articles.len(), 4);
        assert_eq!(snapshot.faq_editions.len(), 3);
        assert_eq!(snapshot.product_categories.len(), 2);
        assert!(!snapshot.answers().is_empty());
    }

    #[test]
    fn bundled_snapshot_is_shared() {
        assert!(Arc::ptr_eq(&Snapshot::bundled(), &Snapshot::bundled()));
    }

    #[test]
    fn bundled_products_have_pros_and_cons() {
        let snapshot = Snapshot::bundled();
        for account in &snapshot.savings_accounts {
            assert!(!account.pros.is_empty(), "{} has no pros", account.id);
            assert!(!account.cons.is_empty(), "{} has no cons", account.id);
        }
        for card in &snapshot.credit_cards {
            assert!(!card.pros.is_empty(), "{} has no pros", card.id);
            assert!(!card.cons.is_empty(), "{} has no cons", card.id);
        }
    }

    #[test]
    fn product_ids_are_unique_across_domains() {
        let snapshot = Snapshot::bundled();
        let mut seen = HashSet::new();
        let ids = snapshot
            .savings_accounts
            .iter()
            .map(|a| a.id.as_str())
            .chain(snapshot.credit_cards.iter().map(|c| c.id.as_str()));
        for id in ids {
            assert!(seen.insert(id), "duplicate product id {id}");
        }
    }

    #[test]
    fn bundled_answer_picks_resolve_to_products() {
        let snapshot = Snapshot::bundled();
        let dataset = snapshot.dataset();
        for answer in snapshot.answers() {
            assert!(
                dataset.product(&answer.recommendation.product_id).is_some(),
                "{} recommends unknown product",
                answer.id
            );
        }
    }

    #[test]
    fn answers_are_tagged_with_category() {
        let snapshot = Snapshot::bundled();
        let savings = snapshot.answers_in_category("savings");
        assert!(!savings.is_empty());
        assert!(
            savings
                .iter()
                .all(|a| a.category.as_deref() == Some("savings"))
        );
        assert!(snapshot.answers_in_category("mortgages").is_empty());
    }

    #[test]
    fn find_question_reports_edition() {
        let snapshot = Snapshot::bundled();
        let found = snapshot.find_question("mortgage-stress-test-rate").unwrap();
        assert_eq!(found.question.id, "q7");
        assert_eq!(found.edition.unwrap().slug, "mortgage-renewal");
        assert!(snapshot.find_question("nonexistent").is_none());
    }

    #[test]
    fn news_in_category_filters() {
        let snapshot = Snapshot::bundled();
        let investing = snapshot.news_in_category("Investing");
        assert_eq!(investing.len(), 1);
        assert_eq!(investing[0].id, "n2");
    }

    #[test]
    fn by_slug_finds_static_entity() {
        let snapshot = Snapshot::bundled();
        let account = by_slug(&snapshot.savings_accounts, "wealthsimple-cash").unwrap();
        assert_eq!(account.id, "01");
        assert!(by_slug(&snapshot.savings_accounts, "nonexistent").is_none());
    }

    #[test]
    fn load_reads_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"newsArticles": [{{
                "id": "x1", "slug": "x", "title": "X", "summary": "S",
                "category": "News", "date": "Jan 1, 2026", "author": "A"
            }}]}}"#
        )
        .unwrap();
        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.news_articles.len(), 1);
        assert!(snapshot.savings_accounts.is_empty());
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, StoreError::SnapshotNotFound(_)));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = Snapshot::load(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Json(_)));
    }
}
