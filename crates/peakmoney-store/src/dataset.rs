//! The active dataset: one collection per content type.
//!
//! A dataset is whatever each collection currently resolves to, remote or
//! static. Collections are shared behind `Arc`, so taking a dataset from a
//! live library is cheap and never observes a half-replaced collection.

use std::sync::Arc;

use peakmoney_core::{Answer, CreditCard, FaqEdition, NewsArticle, Question, SavingsAccount};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub savings_accounts: Arc<Vec<SavingsAccount>>,
    pub credit_cards: Arc<Vec<CreditCard>>,
    pub news_articles: Arc<Vec<NewsArticle>>,
    pub faq_editions: Arc<Vec<FaqEdition>>,
    pub answers: Arc<Vec<Answer>>,
}

/// A question together with the edition that contains it.
#[derive(Debug, Clone, Copy)]
pub struct QuestionHit<'a> {
    pub question: &'a Question,
    pub edition: &'a FaqEdition,
}

impl Dataset {
    pub fn new(
        savings_accounts: Vec<SavingsAccount>,
        credit_cards: Vec<CreditCard>,
        news_articles: Vec<NewsArticle>,
        faq_editions: Vec<FaqEdition>,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            savings_accounts: Arc::new(savings_accounts),
            credit_cards: Arc::new(credit_cards),
            news_articles: Arc::new(news_articles),
            faq_editions: Arc::new(faq_editions),
            answers: Arc::new(answers),
        }
    }

    /// Every question of every edition, in edition order.
    pub fn questions(&self) -> impl Iterator<Item = QuestionHit<'_>> {
        self.faq_editions.iter().flat_map(|edition| {
            edition
                .questions
                .iter()
                .map(move |question| QuestionHit { question, edition })
        })
    }

    pub fn answers_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Answer> {
        self.answers
            .iter()
            .filter(move |a| a.category.as_deref() == Some(category))
    }
}

#[cfg(test)]
mod tests {
    use crate::Snapshot;

    #[test]
    fn questions_are_flattened_with_their_edition() {
        let dataset = Snapshot::bundled().dataset();
        let hits: Vec<_> = dataset.questions().collect();
        assert_eq!(hits.len(), 15);
        assert_eq!(hits[0].question.id, "q1");
        assert_eq!(hits[0].edition.id, "e1");
        assert_eq!(hits[14].question.id, "q15");
        assert_eq!(hits[14].edition.id, "e3");
    }

    #[test]
    fn answers_filtered_by_category() {
        let dataset = Snapshot::bundled().dataset();
        let cards: Vec<_> = dataset.answers_in_category("credit-cards").collect();
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|a| a.category.as_deref() == Some("credit-cards")));
    }
}
