//! Vertical card display for content entities.
//!
//! Cards are grouped into titled sections with aligned `label value` rows;
//! list commands print one row per entity.

use peakmoney_core::{Answer, CreditCard, EditionQuestion, FaqEdition, NewsArticle, SavingsAccount};
use peakmoney_store::{Product, QuestionHit, Resolved};
use peakmoney_sync::{LoadReport, Phase, QueryState};
use serde::Serialize;

const MAX_LIST_ITEMS: usize = 10;

// ── Provenance ──

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Remote => "remote",
        Phase::StaticFallback => "static snapshot (remote empty)",
        Phase::Error => "static snapshot (remote failed)",
        Phase::Static | Phase::Fetching => "static snapshot (not fetched)",
    }
}

/// Where the content came from, and the fetch error if there was one.
///
/// Written to stderr when stdout carries JSON.
pub fn print_provenance<T>(label: &str, state: &QueryState<T>, json: bool) {
    let line = format!("[{label}: {}]", phase_label(state.phase));
    if json {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
    if let Some(error) = &state.error {
        eprintln!("warning: {error}");
    }
}

pub fn print_load_report(report: &LoadReport, errors: &[String], json: bool) {
    let rows = [
        ("savings accounts", report.savings_accounts),
        ("credit cards", report.credit_cards),
        ("news articles", report.news_articles),
        ("FAQ editions", report.faq_editions),
        ("answers", report.answers),
    ];
    for (label, phase) in rows {
        let line = format!("[{label}: {}]", phase_label(phase));
        if json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
    for error in errors {
        eprintln!("warning: {error}");
    }
    if !json {
        println!();
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Rows ──

fn marker(marked: bool) -> &'static str {
    if marked { "*" } else { " " }
}

pub fn savings_row(account: &SavingsAccount, marked: bool) {
    println!(
        "{} {:<6} {:<36} {} {} ({})",
        marker(marked),
        account.id,
        account.slug,
        account.institution,
        account.product_name,
        account.interest_rate
    );
}

pub fn credit_card_row(card: &CreditCard, marked: bool) {
    println!(
        "{} {:<6} {:<36} {} {} (fee {})",
        marker(marked),
        card.id,
        card.slug,
        card.institution,
        card.product_name,
        card.annual_fee
    );
}

/// `*` marks the headline article.
pub fn article_row(article: &NewsArticle, marked: bool) {
    println!(
        "{} {:<6} {:<36} {} [{}, {}]",
        marker(marked),
        article.id,
        article.slug,
        article.title,
        article.category,
        article.date
    );
}

/// `*` marks the current edition.
pub fn edition_row(edition: &FaqEdition, marked: bool) {
    println!(
        "{} {:<6} {:<36} {} ({}, {} questions)",
        marker(marked),
        edition.id,
        edition.slug,
        edition.title,
        edition.date,
        edition.questions.len()
    );
}

/// `*` marks answers featured on the index.
pub fn answer_row(answer: &Answer, marked: bool) {
    println!(
        "{} {:<6} {:<36} {} [{}]",
        marker(marked),
        answer.id,
        answer.slug,
        answer.question,
        answer.category.as_deref().unwrap_or("-")
    );
}

fn product_row(product: &Product<'_>) {
    println!(
        "  {:<6} {:<36} {} {} ({})",
        product.id(),
        product.slug(),
        product.institution(),
        product.product_name(),
        product.review_section()
    );
}

fn question_row(hit: &QuestionHit<'_>) {
    println!(
        "  {:<6} {:<36} {} [{}]",
        hit.question.id, hit.question.slug, hit.question.question, hit.edition.slug
    );
}

pub fn print_resolved(resolved: &Resolved<'_>) {
    match resolved {
        Resolved::Product(product) => product_row(product),
        Resolved::NewsArticle(article) => article_row(article, article.featured),
        Resolved::Question(hit) => question_row(hit),
        Resolved::Answer(answer) => answer_row(answer, false),
    }
}

/// A short "see also" list under a card.
pub fn print_others<T>(header: &str, items: &[&T], row: fn(&T, bool)) {
    if items.is_empty() {
        return;
    }
    println!("{header}");
    for &item in items {
        row(item, false);
    }
    println!();
}

// ── Cards ──

fn field(label: &str, value: &str) {
    println!("  {:<26} {}", label, value);
}

fn optional(label: &str, value: Option<&str>) {
    if let Some(value) = value {
        field(label, value);
    }
}

fn list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("  {} ({}):", label, items.len());
    for item in items.iter().take(MAX_LIST_ITEMS) {
        println!("    - {item}");
    }
    if items.len() > MAX_LIST_ITEMS {
        println!("    ... and {} more", items.len() - MAX_LIST_ITEMS);
    }
}

fn paragraphs(header: &str, paras: &[String]) {
    if paras.is_empty() {
        return;
    }
    println!("{header}");
    for para in paras {
        println!("  {para}");
        println!();
    }
}

fn heading(title: &str, subtitle: &str) {
    println!("=== {} ===", title);
    if !subtitle.is_empty() {
        println!("{}", subtitle);
    }
    println!();
}

pub fn print_savings_card(account: &SavingsAccount) {
    heading(
        &format!("{} {}", account.institution, account.product_name),
        &account.peak_verdict,
    );

    println!("Rates & Fees");
    field("id", &account.id);
    field("slug", &account.slug);
    field("interest rate", &account.interest_rate);
    field("monthly fees", &account.monthly_fees);
    field("minimum balance", &account.min_balance);
    field("CDIC insured", if account.cdic { "yes" } else { "no" });
    optional("e-transfer limit", account.e_transfer_limit.as_deref());
    optional("withdrawal limit", account.withdrawal_limit.as_deref());
    println!();

    println!("Verdict");
    field("best for", &account.best_for);
    field("summary", &account.detailed_review);
    list("pros", &account.pros);
    list("cons", &account.cons);
    println!();

    paragraphs("Full Review", &account.full_review);
}

pub fn print_credit_card(card: &CreditCard) {
    heading(
        &format!("{} {}", card.institution, card.product_name),
        &card.peak_verdict,
    );

    println!("Rates & Fees");
    field("id", &card.id);
    field("slug", &card.slug);
    field("annual fee", &card.annual_fee);
    field("rewards", &card.rewards_rate);
    optional("welcome bonus", card.welcome_bonus.as_deref());
    field("purchase APR", &card.interest_rate);
    optional("foreign transaction fee", card.foreign_transaction_fee.as_deref());
    list("insurance", &card.insurance_benefits);
    println!();

    println!("Verdict");
    field("best for", &card.best_for);
    field("summary", &card.detailed_review);
    list("pros", &card.pros);
    list("cons", &card.cons);
    println!();

    paragraphs("Full Review", &card.full_review);
}

pub fn print_article(article: &NewsArticle) {
    heading(&article.title, &article.summary);

    println!("Byline");
    field("id", &article.id);
    field("slug", &article.slug);
    field("category", &article.category);
    field("date", &article.date);
    match &article.author_title {
        Some(title) => field("author", &format!("{}, {}", article.author, title)),
        None => field("author", &article.author),
    }
    optional("image", article.image_url.as_deref());
    optional("caption", article.image_caption.as_deref());
    if article.featured {
        field("featured", "yes");
    }
    list("related", &article.related_articles);
    println!();

    paragraphs("Content", &article.content);
}

pub fn print_edition(edition: &FaqEdition) {
    heading(&edition.title, &edition.description);
    field("id", &edition.id);
    field("slug", &edition.slug);
    field("date", &edition.date);
    println!();

    println!("Questions ({})", edition.questions.len());
    for question in &edition.questions {
        println!("  {:<36} {}", question.slug, question.question);
    }
    println!();
}

pub fn print_question(hit: &EditionQuestion, related: &[QuestionHit<'_>]) {
    let question = &hit.question;
    heading(&question.question, &question.answer);
    field("id", &question.id);
    field("slug", &question.slug);
    if let Some(edition) = &hit.edition {
        field("edition", &format!("{} ({})", edition.title, edition.slug));
    }
    list("sources", &question.sources);
    println!();

    paragraphs("Full Answer", &question.full_answer);

    if !related.is_empty() {
        println!("Related Questions");
        for hit in related {
            question_row(hit);
        }
        println!();
    }
}

pub fn print_answer(
    answer: &Answer,
    recommendation: Option<Product<'_>>,
    runner_up: Option<Product<'_>>,
    related: &[&Answer],
) {
    heading(&answer.question, &answer.short_answer);
    field("id", &answer.id);
    field("slug", &answer.slug);
    optional("category", answer.category.as_deref());
    field("last updated", &answer.last_updated);
    println!();

    println!("Recommendation");
    match recommendation {
        Some(product) => product_row(&product),
        None => field("product", &format!("{} (unresolved)", answer.recommendation.product_id)),
    }
    field("why", &answer.recommendation.reasoning);
    println!();

    if let Some(pick) = &answer.runner_up {
        println!("Runner-up");
        match runner_up {
            Some(product) => product_row(&product),
            None => field("product", &format!("{} (unresolved)", pick.product_id)),
        }
        field("why", &pick.reasoning);
        println!();
    }

    list("considerations", &answer.considerations);
    paragraphs("Full Answer", &answer.full_answer);

    if !related.is_empty() {
        println!("Related Answers");
        for other in related {
            answer_row(other, false);
        }
        println!();
    }
}
