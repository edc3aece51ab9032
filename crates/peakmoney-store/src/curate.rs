//! Selection rules the pages apply on top of a resolved collection.

use peakmoney_core::{Answer, FaqEdition, Identified, NewsArticle};

/// The hero article and everything else.
///
/// The hero is the first featured article, or the first article when none is
/// featured. Returns `None` for an empty list.
pub fn headline(articles: &[NewsArticle]) -> Option<(&NewsArticle, Vec<&NewsArticle>)> {
    let hero = articles
        .iter()
        .find(|a| a.featured)
        .or_else(|| articles.first())?;
    let rest = articles.iter().filter(|a| a.id != hero.id).collect();
    Some((hero, rest))
}

/// Up to `limit` items other than `exclude_id`, in collection order.
pub fn others<'a, T: Identified>(items: &'a [T], exclude_id: &str, limit: usize) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| item.id() != exclude_id)
        .take(limit)
        .collect()
}

/// The first `per_category` answers of each category, categories in order
/// of first appearance. Answers without a category form a group of their own.
pub fn featured_answers(answers: &[Answer], per_category: usize) -> Vec<&Answer> {
    let mut seen: Vec<(Option<&str>, usize)> = Vec::new();
    answers
        .iter()
        .filter(|answer| {
            let category = answer.category.as_deref();
            match seen.iter_mut().find(|(c, _)| *c == category) {
                Some((_, taken)) if *taken >= per_category => false,
                Some((_, taken)) => {
                    *taken += 1;
                    true
                }
                None => {
                    seen.push((category, 1));
                    per_category > 0
                }
            }
        })
        .collect()
}

/// The current edition (first listed) and the past ones.
pub fn current_and_past(editions: &[FaqEdition]) -> Option<(&FaqEdition, &[FaqEdition])> {
    editions.split_first()
}
