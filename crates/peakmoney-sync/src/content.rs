//! Typed content queries: fetch, transform, and fall back to static content.
//!
//! Each content type binds a remote document shape to its entity and to the
//! static snapshot slices it falls back to. The three query shapes
//! ([`AllQuery`], [`SlugQuery`], [`CategoryQuery`]) drive a [`Query`] state
//! machine with the outcome of one fetch at a time.

use std::marker::PhantomData;
use std::sync::Arc;

use peakmoney_core::raw::{
    RawAnswer, RawCreditCard, RawFaqEdition, RawFaqQuestion, RawNewsArticle, RawSavingsAccount,
};
use peakmoney_core::{
    Answer, CreditCard, EditionQuestion, FaqEdition, Identified, NewsArticle, SavingsAccount,
    Transform, Transformer,
};
use peakmoney_store::Snapshot;
use peakmoney_store::snapshot::by_slug;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::SyncError;
use crate::query::{Outcome, Query, QueryState};
use crate::source::{ContentKind, ContentQuery, ContentSource, Selector};

/// A content type the orchestrator can resolve.
pub trait ContentType: Send + Sync + 'static {
    type Raw: Transform<Entity = Self::Entity>;
    type Entity: Identified + Clone + Send + Sync + 'static;

    const KIND: ContentKind;

    /// The whole static collection.
    fn statics(snapshot: &Snapshot) -> Vec<Self::Entity>;

    fn static_by_slug(snapshot: &Snapshot, slug: &str) -> Option<Self::Entity> {
        by_slug(&Self::statics(snapshot), slug)
    }

    /// Static entities in a category. Types without categories have none.
    fn static_by_category(_snapshot: &Snapshot, _category: &str) -> Vec<Self::Entity> {
        Vec::new()
    }
}

pub struct SavingsAccounts;
pub struct CreditCards;
pub struct NewsArticles;
pub struct FaqEditions;
pub struct FaqQuestions;
pub struct Answers;

impl ContentType for SavingsAccounts {
    type Raw = RawSavingsAccount;
    type Entity = SavingsAccount;
    const KIND: ContentKind = ContentKind::SavingsAccount;

    fn statics(snapshot: &Snapshot) -> Vec<SavingsAccount> {
        snapshot.savings_accounts.clone()
    }
}

impl ContentType for CreditCards {
    type Raw = RawCreditCard;
    type Entity = CreditCard;
    const KIND: ContentKind = ContentKind::CreditCard;

    fn statics(snapshot: &Snapshot) -> Vec<CreditCard> {
        snapshot.credit_cards.clone()
    }
}

impl ContentType for NewsArticles {
    type Raw = RawNewsArticle;
    type Entity = NewsArticle;
    const KIND: ContentKind = ContentKind::NewsArticle;

    fn statics(snapshot: &Snapshot) -> Vec<NewsArticle> {
        snapshot.news_articles.clone()
    }

    fn static_by_category(snapshot: &Snapshot, category: &str) -> Vec<NewsArticle> {
        snapshot.news_in_category(category)
    }
}

impl ContentType for FaqEditions {
    type Raw = RawFaqEdition;
    type Entity = FaqEdition;
    const KIND: ContentKind = ContentKind::FaqEdition;

    fn statics(snapshot: &Snapshot) -> Vec<FaqEdition> {
        snapshot.faq_editions.clone()
    }
}

impl ContentType for FaqQuestions {
    type Raw = RawFaqQuestion;
    type Entity = EditionQuestion;
    const KIND: ContentKind = ContentKind::FaqQuestion;

    fn statics(snapshot: &Snapshot) -> Vec<EditionQuestion> {
        snapshot
            .faq_editions
            .iter()
            .flat_map(|edition| {
                edition.questions.iter().map(|question| EditionQuestion {
                    question: question.clone(),
                    edition: Some(edition.summary()),
                })
            })
            .collect()
    }

    fn static_by_slug(snapshot: &Snapshot, slug: &str) -> Option<EditionQuestion> {
        snapshot.find_question(slug)
    }
}

impl ContentType for Answers {
    type Raw = RawAnswer;
    type Entity = Answer;
    const KIND: ContentKind = ContentKind::Answer;

    fn statics(snapshot: &Snapshot) -> Vec<Answer> {
        snapshot.answers()
    }

    fn static_by_category(snapshot: &Snapshot, category: &str) -> Vec<Answer> {
        snapshot.answers_in_category(category)
    }
}

// ── Context ──

/// Everything a query needs: where to fetch, what to fall back to, and how
/// to transform.
#[derive(Clone)]
pub struct Context {
    pub source: Arc<dyn ContentSource>,
    pub snapshot: Arc<Snapshot>,
    pub transformer: Arc<Transformer>,
}

impl Context {
    pub fn new(
        source: Arc<dyn ContentSource>,
        snapshot: Arc<Snapshot>,
        transformer: Arc<Transformer>,
    ) -> Self {
        Self {
            source,
            snapshot,
            transformer,
        }
    }
}

// ── Fetch and decode ──

fn decode<C: ContentType>(t: &Transformer, value: Value) -> Result<C::Entity, SyncError> {
    let raw: C::Raw = serde_json::from_value(value).map_err(|source| SyncError::Decode {
        kind: C::KIND,
        source,
    })?;
    Ok(t.transform(raw))
}

/// Decode a list result. `None` when there is nothing there.
fn decode_many<C: ContentType>(
    t: &Transformer,
    value: Value,
) -> Result<Option<Vec<C::Entity>>, SyncError> {
    match value {
        Value::Null => Ok(None),
        Value::Array(docs) if docs.is_empty() => Ok(None),
        Value::Array(docs) => docs
            .into_iter()
            .map(|doc| decode::<C>(t, doc))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        doc => decode::<C>(t, doc).map(|entity| Some(vec![entity])),
    }
}

/// Decode a single-document result. `None` when there is nothing there.
fn decode_one<C: ContentType>(
    t: &Transformer,
    value: Value,
) -> Result<Option<C::Entity>, SyncError> {
    match value {
        Value::Null => Ok(None),
        Value::Array(docs) => match docs.into_iter().next() {
            Some(doc) => decode::<C>(t, doc).map(Some),
            None => Ok(None),
        },
        doc => decode::<C>(t, doc).map(Some),
    }
}

/// Static entities answering a list query.
fn static_many<C: ContentType>(snapshot: &Snapshot, query: &ContentQuery) -> Vec<C::Entity> {
    match &query.selector {
        Selector::All => C::statics(snapshot),
        Selector::Category(category) => C::static_by_category(snapshot, category),
        Selector::Slug(slug) => C::static_by_slug(snapshot, slug).into_iter().collect(),
    }
}

/// The static entity answering a single-document query.
fn static_one<C: ContentType>(snapshot: &Snapshot, query: &ContentQuery) -> Option<C::Entity> {
    match &query.selector {
        Selector::Slug(slug) => C::static_by_slug(snapshot, slug),
        Selector::All | Selector::Category(_) => None,
    }
}

fn failed<C: ContentType, T>(query: &ContentQuery, err: SyncError) -> Outcome<T> {
    warn!(%query, error = %err, "fetch failed, keeping current content");
    Outcome::Failed(format!("failed to fetch {}: {err}", C::KIND.label()))
}

async fn fetch_many<C: ContentType>(cx: &Context, query: &ContentQuery) -> Outcome<Vec<C::Entity>> {
    let value = match cx.source.fetch(query).await {
        Ok(value) => value,
        Err(err) => return failed::<C, _>(query, err),
    };
    match decode_many::<C>(&cx.transformer, value) {
        Ok(Some(items)) => {
            info!(%query, count = items.len(), "adopting remote content");
            Outcome::Remote(items)
        }
        Ok(None) => {
            info!(%query, "remote store empty, using static content");
            Outcome::Fallback(static_many::<C>(&cx.snapshot, query))
        }
        Err(err) => failed::<C, _>(query, err),
    }
}

async fn fetch_one<C: ContentType>(
    cx: &Context,
    query: &ContentQuery,
) -> Outcome<Option<C::Entity>> {
    let value = match cx.source.fetch(query).await {
        Ok(value) => value,
        Err(err) => return failed::<C, _>(query, err),
    };
    match decode_one::<C>(&cx.transformer, value) {
        Ok(Some(entity)) => {
            info!(%query, id = entity.id(), "adopting remote content");
            Outcome::Remote(Some(entity))
        }
        Ok(None) => {
            debug!(%query, "not found remotely, using static lookup");
            Outcome::Fallback(static_one::<C>(&cx.snapshot, query))
        }
        Err(err) => failed::<C, _>(query, err),
    }
}

// ── Queries ──

/// Every entity of a type.
pub struct AllQuery<C: ContentType> {
    cx: Context,
    query: Query<Vec<C::Entity>>,
    _type: PhantomData<C>,
}

impl<C: ContentType> Clone for AllQuery<C> {
    fn clone(&self) -> Self {
        Self {
            cx: self.cx.clone(),
            query: self.query.clone(),
            _type: PhantomData,
        }
    }
}

impl<C: ContentType> AllQuery<C> {
    /// Seeded with the static collection, before any fetch.
    pub fn new(cx: Context) -> Self {
        let query = Query::new(C::statics(&cx.snapshot));
        Self {
            cx,
            query,
            _type: PhantomData,
        }
    }

    pub fn state(&self) -> QueryState<Vec<C::Entity>> {
        self.query.state()
    }

    pub fn data(&self) -> Vec<C::Entity> {
        self.query.state().data
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<QueryState<Vec<C::Entity>>> {
        self.query.subscribe()
    }

    /// Fetch once and settle.
    pub async fn load(&self) -> QueryState<Vec<C::Entity>> {
        let ticket = self.query.begin();
        let outcome = fetch_many::<C>(&self.cx, &ContentQuery::all(C::KIND)).await;
        self.query.commit(ticket, outcome);
        self.query.state()
    }
}

/// One entity by slug. `data` is `None` when neither the remote store nor
/// the static snapshot has it.
pub struct SlugQuery<C: ContentType> {
    cx: Context,
    query: Query<Option<C::Entity>>,
    _type: PhantomData<C>,
}

impl<C: ContentType> Clone for SlugQuery<C> {
    fn clone(&self) -> Self {
        Self {
            cx: self.cx.clone(),
            query: self.query.clone(),
            _type: PhantomData,
        }
    }
}

impl<C: ContentType> SlugQuery<C> {
    pub fn new(cx: Context, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let query = Query::keyed(C::static_by_slug(&cx.snapshot, &slug), Some(slug));
        Self {
            cx,
            query,
            _type: PhantomData,
        }
    }

    pub fn slug(&self) -> String {
        self.query.state().key.unwrap_or_default()
    }

    pub fn state(&self) -> QueryState<Option<C::Entity>> {
        self.query.state()
    }

    pub fn data(&self) -> Option<C::Entity> {
        self.query.state().data
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<QueryState<Option<C::Entity>>> {
        self.query.subscribe()
    }

    /// Fetch the current slug. Returns false if the slug changed while the
    /// fetch was in flight and its result was dropped.
    pub async fn load(&self) -> bool {
        let ticket = self.query.begin();
        let query = ContentQuery::slug(C::KIND, self.slug());
        let outcome = fetch_one::<C>(&self.cx, &query).await;
        self.query.commit(ticket, outcome)
    }

    /// Switch to another slug and fetch it, superseding any fetch in flight.
    pub async fn select(&self, slug: impl Into<String>) -> bool {
        let slug = slug.into();
        let ticket = self
            .query
            .restart(C::static_by_slug(&self.cx.snapshot, &slug), Some(slug.clone()));
        let outcome = fetch_one::<C>(&self.cx, &ContentQuery::slug(C::KIND, slug)).await;
        self.query.commit(ticket, outcome)
    }
}

/// The entities of one category, for types that have categories.
pub struct CategoryQuery<C: ContentType> {
    cx: Context,
    query: Query<Vec<C::Entity>>,
    _type: PhantomData<C>,
}

impl<C: ContentType> Clone for CategoryQuery<C> {
    fn clone(&self) -> Self {
        Self {
            cx: self.cx.clone(),
            query: self.query.clone(),
            _type: PhantomData,
        }
    }
}

impl<C: ContentType> CategoryQuery<C> {
    pub fn new(cx: Context, category: impl Into<String>) -> Self {
        let category = category.into();
        let query = Query::keyed(
            C::static_by_category(&cx.snapshot, &category),
            Some(category),
        );
        Self {
            cx,
            query,
            _type: PhantomData,
        }
    }

    pub fn category(&self) -> String {
        self.query.state().key.unwrap_or_default()
    }

    pub fn state(&self) -> QueryState<Vec<C::Entity>> {
        self.query.state()
    }

    pub fn data(&self) -> Vec<C::Entity> {
        self.query.state().data
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<QueryState<Vec<C::Entity>>> {
        self.query.subscribe()
    }

    pub async fn load(&self) -> bool {
        let ticket = self.query.begin();
        let query = ContentQuery::category(C::KIND, self.category());
        let outcome = fetch_many::<C>(&self.cx, &query).await;
        self.query.commit(ticket, outcome)
    }

    pub async fn select(&self, category: impl Into<String>) -> bool {
        let category = category.into();
        let ticket = self.query.restart(
            C::static_by_category(&self.cx.snapshot, &category),
            Some(category.clone()),
        );
        let outcome = fetch_many::<C>(&self.cx, &ContentQuery::category(C::KIND, category)).await;
        self.query.commit(ticket, outcome)
    }
}
