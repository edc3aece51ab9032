mod display;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use peakmoney_core::{Answer, FaqEdition, Identified, NewsArticle, SanityConfig, Transformer};
use peakmoney_store::{Domain, Snapshot, curate};
use peakmoney_sync::{
    AllQuery, Answers, ContentSource, ContentType, CreditCards, FaqEditions, FaqQuestions,
    Library, MemorySource, NewsArticles, QueryState, SanityClient, SavingsAccounts,
};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peakmoney", version)]
#[command(about = "Peak Money content: remote first, static snapshot fallback")]
struct Cli {
    /// Sanity project id
    #[arg(long, env = "PEAKMONEY_PROJECT_ID", default_value = "37uuhcx4")]
    project_id: String,

    /// Sanity dataset
    #[arg(long, env = "PEAKMONEY_DATASET", default_value = "production")]
    dataset: String,

    /// Dated query API version
    #[arg(long, env = "PEAKMONEY_API_VERSION", default_value = "2024-01-01")]
    api_version: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PEAKMONEY_TIMEOUT_SECS", default_value_t = 10)]
    timeout_secs: u64,

    /// Query the live API instead of the edge cache
    #[arg(long)]
    no_cdn: bool,

    /// Skip the remote store; everything resolves from the static snapshot
    #[arg(long)]
    offline: bool,

    /// Static snapshot file to use instead of the bundled one
    #[arg(long, env = "PEAKMONEY_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Print entities as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a collection
    List {
        #[arg(value_enum)]
        collection: Collection,
        /// Restrict to one category (news and answers only)
        #[arg(long)]
        category: Option<String>,
    },

    /// Show one entity by slug
    Show {
        #[arg(value_enum)]
        collection: Collection,
        slug: String,
    },

    /// Show a FAQ question with its edition and related questions
    Question { slug: String },

    /// Show an expert answer with its resolved product picks
    Answer { slug: String },

    /// Resolve reference ids against the loaded content
    Refs {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(long, value_enum)]
        domain: Option<RefDomain>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Collection {
    Savings,
    CreditCards,
    News,
    Faq,
    Answers,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RefDomain {
    Product,
    News,
    Faq,
    Answers,
}

impl From<RefDomain> for Domain {
    fn from(domain: RefDomain) -> Self {
        match domain {
            RefDomain::Product => Domain::Product,
            RefDomain::News => Domain::News,
            RefDomain::Faq => Domain::Faq,
            RefDomain::Answers => Domain::Answer,
        }
    }
}

impl Cli {
    fn sanity_config(&self) -> SanityConfig {
        SanityConfig {
            project_id: self.project_id.clone(),
            dataset: self.dataset.clone(),
            api_version: self.api_version.clone(),
            use_cdn: !self.no_cdn,
            timeout: Duration::from_secs(self.timeout_secs),
            ..SanityConfig::default()
        }
    }
}

fn build_library(cli: &Cli) -> anyhow::Result<Library> {
    let config = cli.sanity_config();

    let snapshot = match &cli.snapshot {
        Some(path) => Arc::new(
            Snapshot::load(path).with_context(|| format!("loading snapshot {}", path.display()))?,
        ),
        None => Snapshot::bundled(),
    };

    let source: Arc<dyn ContentSource> = if cli.offline {
        tracing::info!("offline: resolving from the static snapshot");
        Arc::new(MemorySource::new())
    } else {
        tracing::debug!(url = %config.query_url(), "using remote content store");
        Arc::new(SanityClient::new(&config).context("building HTTP client")?)
    };

    Ok(Library::new(
        source,
        snapshot,
        Arc::new(Transformer::from_config(&config)),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("peakmoney v{}", env!("CARGO_PKG_VERSION"));

    let library = build_library(&cli)?;
    let json = cli.json;

    match cli.command {
        Command::List {
            collection,
            category,
        } => list(&library, collection, category, json).await,
        Command::Show { collection, slug } => show(&library, collection, slug, json).await,
        Command::Question { slug } => question(&library, slug, json).await,
        Command::Answer { slug } => answer(&library, slug, json).await,
        Command::Refs { ids, domain } => refs(&library, ids, domain.map(Domain::from), json).await,
    }
}

// ── list ──

const FEATURED_PER_CATEGORY: usize = 1;
const OTHERS_LIMIT: usize = 3;

/// Rows in display order, each flagged for the row marker.
type Listing<'a, T> = Vec<(&'a T, bool)>;

fn in_order<T>(items: &[T]) -> Listing<'_, T> {
    items.iter().map(|item| (item, false)).collect()
}

/// The headline article first, then the rest in collection order.
fn news_listing(articles: &[NewsArticle]) -> Listing<'_, NewsArticle> {
    let Some((hero, rest)) = curate::headline(articles) else {
        return Vec::new();
    };
    std::iter::once((hero, true))
        .chain(rest.into_iter().map(|article| (article, false)))
        .collect()
}

fn edition_listing(editions: &[FaqEdition]) -> Listing<'_, FaqEdition> {
    let Some((current, past)) = curate::current_and_past(editions) else {
        return Vec::new();
    };
    std::iter::once((current, true))
        .chain(past.iter().map(|edition| (edition, false)))
        .collect()
}

fn answer_listing(answers: &[Answer]) -> Listing<'_, Answer> {
    let featured = curate::featured_answers(answers, FEATURED_PER_CATEGORY);
    answers
        .iter()
        .map(|answer| (answer, featured.iter().any(|f| f.id == answer.id)))
        .collect()
}

fn emit_list<T: Serialize>(
    label: &str,
    state: &QueryState<Vec<T>>,
    json: bool,
    listing: fn(&[T]) -> Listing<'_, T>,
    row: fn(&T, bool),
) -> anyhow::Result<ExitCode> {
    display::print_provenance(label, state, json);
    if json {
        display::print_json(&state.data)?;
    } else {
        for (item, marked) in listing(&state.data) {
            row(item, marked);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn list(
    library: &Library,
    collection: Collection,
    category: Option<String>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match (collection, category) {
        (Collection::News, Some(category)) => {
            let query = library.by_category::<NewsArticles>(category);
            query.load().await;
            emit_list("news articles", &query.state(), json, news_listing, display::article_row)
        }
        (Collection::Answers, Some(category)) => {
            let query = library.by_category::<Answers>(category);
            query.load().await;
            emit_list("answers", &query.state(), json, answer_listing, display::answer_row)
        }
        (other, Some(_)) => anyhow::bail!("{other:?} has no categories"),
        (Collection::Savings, None) => {
            let state = library.savings_accounts().load().await;
            emit_list("savings accounts", &state, json, in_order, display::savings_row)
        }
        (Collection::CreditCards, None) => {
            let state = library.credit_cards().load().await;
            emit_list("credit cards", &state, json, in_order, display::credit_card_row)
        }
        (Collection::News, None) => {
            let state = library.news_articles().load().await;
            emit_list("news articles", &state, json, news_listing, display::article_row)
        }
        (Collection::Faq, None) => {
            let state = library.faq_editions().load().await;
            emit_list("FAQ editions", &state, json, edition_listing, display::edition_row)
        }
        (Collection::Answers, None) => {
            let state = library.answers().load().await;
            emit_list("answers", &state, json, answer_listing, display::answer_row)
        }
    }
}

// ── show ──

/// Print one entity by slug. `None` when it was not found.
async fn show_one<C: ContentType>(
    library: &Library,
    slug: String,
    json: bool,
    card: fn(&C::Entity),
) -> anyhow::Result<Option<C::Entity>>
where
    C::Entity: Serialize,
{
    let query = library.by_slug::<C>(slug.as_str());
    query.load().await;
    let state = query.state();
    display::print_provenance(C::KIND.label(), &state, json);

    match &state.data {
        Some(entity) if json => display::print_json(entity)?,
        Some(entity) => card(entity),
        None => eprintln!("not found: {} {slug}", C::KIND),
    }
    Ok(state.data)
}

/// A review card followed by other products of the same kind.
async fn show_review<C: ContentType>(
    library: &Library,
    collection: &AllQuery<C>,
    slug: String,
    json: bool,
    card: fn(&C::Entity),
    others_header: &str,
    others_row: fn(&C::Entity, bool),
) -> anyhow::Result<ExitCode>
where
    C::Entity: Serialize,
{
    let Some(entity) = show_one::<C>(library, slug, json, card).await? else {
        return Ok(ExitCode::FAILURE);
    };
    if !json {
        let state = collection.load().await;
        let others = curate::others(&state.data, entity.id(), OTHERS_LIMIT);
        display::print_others(others_header, &others, others_row);
    }
    Ok(ExitCode::SUCCESS)
}

fn found<T>(entity: Option<T>) -> ExitCode {
    if entity.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn show(
    library: &Library,
    collection: Collection,
    slug: String,
    json: bool,
) -> anyhow::Result<ExitCode> {
    match collection {
        Collection::Savings => {
            show_review::<SavingsAccounts>(
                library,
                library.savings_accounts(),
                slug,
                json,
                display::print_savings_card,
                "Other Accounts",
                display::savings_row,
            )
            .await
        }
        Collection::CreditCards => {
            show_review::<CreditCards>(
                library,
                library.credit_cards(),
                slug,
                json,
                display::print_credit_card,
                "Other Cards",
                display::credit_card_row,
            )
            .await
        }
        Collection::News => {
            let article =
                show_one::<NewsArticles>(library, slug, json, display::print_article).await?;
            Ok(found(article))
        }
        Collection::Faq => {
            let edition =
                show_one::<FaqEditions>(library, slug, json, display::print_edition).await?;
            Ok(found(edition))
        }
        Collection::Answers => answer(library, slug, json).await,
    }
}

// ── question / answer ──

async fn question(library: &Library, slug: String, json: bool) -> anyhow::Result<ExitCode> {
    let query = library.by_slug::<FaqQuestions>(slug.as_str());
    tokio::join!(query.load(), library.faq_editions().load());
    let state = query.state();
    display::print_provenance("FAQ questions", &state, json);

    let Some(hit) = &state.data else {
        eprintln!("not found: faqQuestion {slug}");
        return Ok(ExitCode::FAILURE);
    };

    let dataset = library.dataset();
    let related = dataset.related_questions(&hit.question);

    if json {
        let related: Vec<_> = related
            .iter()
            .map(|r| {
                json!({
                    "id": r.question.id,
                    "slug": r.question.slug,
                    "question": r.question.question,
                    "edition": r.edition.summary(),
                })
            })
            .collect();
        display::print_json(&json!({ "question": hit, "relatedQuestions": related }))?;
    } else {
        display::print_question(hit, &related);
    }
    Ok(ExitCode::SUCCESS)
}

async fn answer(library: &Library, slug: String, json: bool) -> anyhow::Result<ExitCode> {
    let query = library.by_slug::<Answers>(slug.as_str());
    let (_, report) = tokio::join!(query.load(), library.load());
    let state = query.state();
    display::print_provenance("answers", &state, json);
    tracing::debug!(remote = report.remote_count(), "collections loaded");

    let Some(answer) = &state.data else {
        eprintln!("not found: answer {slug}");
        return Ok(ExitCode::FAILURE);
    };

    let dataset = library.dataset();
    let recommendation = dataset.recommendation(answer);
    let runner_up = dataset.runner_up(answer);
    let related = dataset.related_answers(answer);

    if json {
        display::print_json(&json!({
            "answer": answer,
            "recommendation": recommendation,
            "runnerUp": runner_up,
            "relatedAnswers": related,
        }))?;
    } else {
        display::print_answer(answer, recommendation, runner_up, &related);
    }
    Ok(ExitCode::SUCCESS)
}

// ── refs ──

async fn refs(
    library: &Library,
    ids: Vec<String>,
    domain: Option<Domain>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let report = library.load().await;
    let errors: Vec<String> = [
        library.savings_accounts().state().error,
        library.credit_cards().state().error,
        library.news_articles().state().error,
        library.faq_editions().state().error,
        library.answers().state().error,
    ]
    .into_iter()
    .flatten()
    .collect();
    display::print_load_report(&report, &errors, json);

    let resolved_ids = library.resolve_refs(&ids, domain, |resolved| {
        if !json {
            for r in &resolved {
                display::print_resolved(r);
            }
        }
        resolved.iter().map(|r| r.id().to_string()).collect::<Vec<_>>()
    });

    if json {
        display::print_json(&resolved_ids)?;
    }
    let dropped = ids.len() - resolved_ids.len();
    if dropped > 0 {
        eprintln!("{dropped} id(s) did not resolve");
    }
    Ok(ExitCode::SUCCESS)
}
