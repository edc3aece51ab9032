//! The full set of collection queries behind one handle.

use std::sync::Arc;

use futures::join;
use peakmoney_core::Transformer;
use peakmoney_store::{Dataset, Domain, Resolved, Snapshot};
use tracing::info;

use crate::content::{
    AllQuery, Answers, CategoryQuery, ContentType, Context, CreditCards, FaqEditions,
    NewsArticles, SavingsAccounts, SlugQuery,
};
use crate::query::Phase;
use crate::source::ContentSource;

/// Where each collection's visible content came from after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub savings_accounts: Phase,
    pub credit_cards: Phase,
    pub news_articles: Phase,
    pub faq_editions: Phase,
    pub answers: Phase,
}

impl LoadReport {
    pub fn remote_count(&self) -> usize {
        [
            self.savings_accounts,
            self.credit_cards,
            self.news_articles,
            self.faq_editions,
            self.answers,
        ]
        .into_iter()
        .filter(|phase| *phase == Phase::Remote)
        .count()
    }
}

/// Every collection, each resolving independently against the same source.
#[derive(Clone)]
pub struct Library {
    cx: Context,
    savings_accounts: AllQuery<SavingsAccounts>,
    credit_cards: AllQuery<CreditCards>,
    news_articles: AllQuery<NewsArticles>,
    faq_editions: AllQuery<FaqEditions>,
    answers: AllQuery<Answers>,
}

impl Library {
    pub fn new(
        source: Arc<dyn ContentSource>,
        snapshot: Arc<Snapshot>,
        transformer: Arc<Transformer>,
    ) -> Self {
        let cx = Context::new(source, snapshot, transformer);
        Self {
            savings_accounts: AllQuery::new(cx.clone()),
            credit_cards: AllQuery::new(cx.clone()),
            news_articles: AllQuery::new(cx.clone()),
            faq_editions: AllQuery::new(cx.clone()),
            answers: AllQuery::new(cx.clone()),
            cx,
        }
    }

    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn savings_accounts(&self) -> &AllQuery<SavingsAccounts> {
        &self.savings_accounts
    }

    pub fn credit_cards(&self) -> &AllQuery<CreditCards> {
        &self.credit_cards
    }

    pub fn news_articles(&self) -> &AllQuery<NewsArticles> {
        &self.news_articles
    }

    pub fn faq_editions(&self) -> &AllQuery<FaqEditions> {
        &self.faq_editions
    }

    pub fn answers(&self) -> &AllQuery<Answers> {
        &self.answers
    }

    /// Fetch every collection concurrently and wait for all to settle.
    pub async fn load(&self) -> LoadReport {
        let (savings, cards, news, editions, answers) = join!(
            self.savings_accounts.load(),
            self.credit_cards.load(),
            self.news_articles.load(),
            self.faq_editions.load(),
            self.answers.load(),
        );
        let report = LoadReport {
            savings_accounts: savings.phase,
            credit_cards: cards.phase,
            news_articles: news.phase,
            faq_editions: editions.phase,
            answers: answers.phase,
        };
        info!(remote = report.remote_count(), "library loaded");
        report
    }

    /// The collections as currently resolved, remote or static.
    pub fn dataset(&self) -> Dataset {
        Dataset::new(
            self.savings_accounts.data(),
            self.credit_cards.data(),
            self.news_articles.data(),
            self.faq_editions.data(),
            self.answers.data(),
        )
    }

    pub fn by_slug<C: ContentType>(&self, slug: impl Into<String>) -> SlugQuery<C> {
        SlugQuery::new(self.cx.clone(), slug)
    }

    pub fn by_category<C: ContentType>(&self, category: impl Into<String>) -> CategoryQuery<C> {
        CategoryQuery::new(self.cx.clone(), category)
    }

    /// Resolve ids against the current dataset and hand the matches to `f`.
    /// Ids that match nothing are dropped.
    pub fn resolve_refs<S, R>(
        &self,
        ids: &[S],
        domain: Option<Domain>,
        f: impl FnOnce(Vec<Resolved<'_>>) -> R,
    ) -> R
    where
        S: AsRef<str>,
    {
        let dataset = self.dataset();
        f(dataset.resolve_refs(ids, domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySource;
    use crate::source::{ContentKind, ContentQuery};
    use serde_json::json;

    fn ids(resolved: Vec<Resolved<'_>>) -> Vec<String> {
        resolved.iter().map(|r| r.id().to_string()).collect()
    }

    fn library(source: MemorySource) -> Library {
        Library::new(
            Arc::new(source),
            Snapshot::bundled(),
            Arc::new(Transformer::default()),
        )
    }

    #[test]
    fn dataset_starts_static() {
        let library = library(MemorySource::new());
        let dataset = library.dataset();
        let snapshot = Snapshot::bundled();
        assert_eq!(*dataset.savings_accounts, snapshot.savings_accounts);
        assert_eq!(*dataset.answers, snapshot.answers());
    }

    #[tokio::test]
    async fn load_settles_every_collection() {
        let source = MemorySource::new()
            .with_failure(ContentQuery::all(ContentKind::NewsArticle), "503")
            .with_result(ContentQuery::all(ContentKind::Answer), json!([]));
        let library = library(source);
        let report = library.load().await;

        assert_eq!(report.news_articles, Phase::Error);
        assert_eq!(report.answers, Phase::StaticFallback);
        assert_eq!(report.remote_count(), 0);
        assert!(!library.news_articles().state().loading());
        assert!(library.news_articles().state().error.is_some());
        assert_eq!(library.dataset().news_articles.len(), 4);
    }

    #[tokio::test]
    async fn remote_collection_flows_into_dataset() {
        let source = MemorySource::new().with_result(
            ContentQuery::all(ContentKind::NewsArticle),
            json!([{
                "_id": "remote-news",
                "title": "Remote",
                "slug": {"current": "remote"},
                "summary": "From the store.",
                "category": "Investing",
                "author": "Desk",
                "authorTitle": "Editor",
                "publishedAt": "2025-10-24T12:00:00Z",
                "featured": true
            }]),
        );
        let library = library(source);
        let report = library.load().await;
        assert_eq!(report.news_articles, Phase::Remote);
        assert_eq!(report.remote_count(), 1);

        let dataset = library.dataset();
        assert_eq!(dataset.news_articles.len(), 1);
        assert_eq!(dataset.news_articles[0].date, "October 24, 2025");
        assert_eq!(
            library.resolve_refs(&["remote-news", "n1"], None, ids),
            vec!["remote-news"]
        );
    }

    #[tokio::test]
    async fn answer_refs_resolve_across_product_domains() {
        let library = library(MemorySource::new());
        library.load().await;
        let resolved = library.resolve_refs(&["01", "cc01", "missing"], Some(Domain::Product), ids);
        assert_eq!(resolved, vec!["01", "cc01"]);
    }

    #[tokio::test]
    async fn keyed_queries_share_the_source() {
        let library = library(MemorySource::new());
        let query = library.by_slug::<SavingsAccounts>("nonexistent");
        query.load().await;
        assert!(query.data().is_none());

        let news = library.by_category::<NewsArticles>("Investing");
        assert!(news.data().iter().all(|a| a.category == "Investing"));
    }
}
