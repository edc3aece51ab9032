//! Cross-reference resolution against the active dataset.
//!
//! References are opaque ids. Resolution is best-effort and order-preserving:
//! results follow the input id order, and ids with no target are dropped
//! without error.
//!
//! Answer picks are the one polymorphic reference. A product id is looked up
//! among savings accounts first, then credit cards; the first match wins. This
//! relies on product ids being unique across both collections.

use peakmoney_core::{Answer, CreditCard, NewsArticle, Question, SavingsAccount};
use serde::Serialize;

use crate::dataset::{Dataset, QuestionHit};

/// Which collection(s) to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Savings accounts, then credit cards.
    Product,
    News,
    Faq,
    Answer,
}

impl Domain {
    /// Search order when no domain is given.
    pub const ALL: [Domain; 4] = [Domain::Product, Domain::News, Domain::Faq, Domain::Answer];
}

/// A savings account or a credit card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "product", rename_all = "kebab-case")]
pub enum Product<'a> {
    Savings(&'a SavingsAccount),
    CreditCard(&'a CreditCard),
}

impl<'a> Product<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Product::Savings(a) => &a.id,
            Product::CreditCard(c) => &c.id,
        }
    }

    pub fn slug(&self) -> &'a str {
        match self {
            Product::Savings(a) => &a.slug,
            Product::CreditCard(c) => &c.slug,
        }
    }

    pub fn institution(&self) -> &'a str {
        match self {
            Product::Savings(a) => &a.institution,
            Product::CreditCard(c) => &c.institution,
        }
    }

    pub fn product_name(&self) -> &'a str {
        match self {
            Product::Savings(a) => &a.product_name,
            Product::CreditCard(c) => &c.product_name,
        }
    }

    pub fn peak_verdict(&self) -> &'a str {
        match self {
            Product::Savings(a) => &a.peak_verdict,
            Product::CreditCard(c) => &c.peak_verdict,
        }
    }

    pub fn pros(&self) -> &'a [String] {
        match self {
            Product::Savings(a) => &a.pros,
            Product::CreditCard(c) => &c.pros,
        }
    }

    pub fn cons(&self) -> &'a [String] {
        match self {
            Product::Savings(a) => &a.cons,
            Product::CreditCard(c) => &c.cons,
        }
    }

    /// Path segment of the product's review page.
    pub fn review_section(&self) -> &'static str {
        match self {
            Product::Savings(_) => "savings",
            Product::CreditCard(_) => "credit-cards",
        }
    }
}

/// One resolved reference.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Product(Product<'a>),
    NewsArticle(&'a NewsArticle),
    Question(QuestionHit<'a>),
    Answer(&'a Answer),
}

impl<'a> Resolved<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            Resolved::Product(p) => p.id(),
            Resolved::NewsArticle(a) => &a.id,
            Resolved::Question(hit) => &hit.question.id,
            Resolved::Answer(a) => &a.id,
        }
    }
}

impl Dataset {
    /// Resolve ids in input order, dropping any that match nothing.
    ///
    /// With no domain, each id is tried against every domain in
    /// [`Domain::ALL`] order.
    pub fn resolve_refs<S: AsRef<str>>(&self, ids: &[S], domain: Option<Domain>) -> Vec<Resolved<'_>> {
        ids.iter()
            .filter_map(|id| {
                let id = id.as_ref();
                match domain {
                    Some(d) => self.resolve_in(d, id),
                    None => Domain::ALL.iter().find_map(|&d| self.resolve_in(d, id)),
                }
            })
            .collect()
    }

    fn resolve_in(&self, domain: Domain, id: &str) -> Option<Resolved<'_>> {
        match domain {
            Domain::Product => self.product(id).map(Resolved::Product),
            Domain::News => self.news_article(id).map(Resolved::NewsArticle),
            Domain::Faq => self.question(id).map(Resolved::Question),
            Domain::Answer => self.answer(id).map(Resolved::Answer),
        }
    }

    /// A product by id: savings accounts first, then credit cards.
    pub fn product(&self, id: &str) -> Option<Product<'_>> {
        if let Some(account) = self.savings_accounts.iter().find(|a| a.id == id) {
            return Some(Product::Savings(account));
        }
        self.credit_cards
            .iter()
            .find(|c| c.id == id)
            .map(Product::CreditCard)
    }

    pub fn news_article(&self, id: &str) -> Option<&NewsArticle> {
        self.news_articles.iter().find(|a| a.id == id)
    }

    /// A question by id in any edition.
    pub fn question(&self, id: &str) -> Option<QuestionHit<'_>> {
        self.questions().find(|hit| hit.question.id == id)
    }

    pub fn answer(&self, id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    pub fn recommendation(&self, answer: &Answer) -> Option<Product<'_>> {
        self.product(&answer.recommendation.product_id)
    }

    pub fn runner_up(&self, answer: &Answer) -> Option<Product<'_>> {
        answer
            .runner_up
            .as_ref()
            .and_then(|pick| self.product(&pick.product_id))
    }

    pub fn related_articles(&self, article: &NewsArticle) -> Vec<&NewsArticle> {
        article
            .related_articles
            .iter()
            .filter_map(|id| self.news_article(id))
            .collect()
    }

    /// Related questions from any edition, each with its own edition.
    pub fn related_questions(&self, question: &Question) -> Vec<QuestionHit<'_>> {
        question
            .related_questions
            .iter()
            .filter_map(|id| self.question(id))
            .collect()
    }

    pub fn related_answers(&self, answer: &Answer) -> Vec<&Answer> {
        answer
            .related_answers
            .iter()
            .filter_map(|id| self.answer(id))
            .collect()
    }
}
