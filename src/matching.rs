//! Heuristic pairing of lost and found reports.
//!
//! Scores every approved item of the opposite kind against a probe:
//! name, color and location use bidirectional case-insensitive
//! substring checks (worth 3, 2 and 1), descriptions contribute half a
//! point per shared word. Top five positive scores win.

use crate::model::{Item, ItemKind, ItemStatus, NewItem};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;

pub const MAX_MATCHES: usize = 5;

const NAME_WEIGHT: f64 = 3.0;
const COLOR_WEIGHT: f64 = 2.0;
const LOCATION_WEIGHT: f64 = 1.0;
const DESCRIPTION_WORD_WEIGHT: f64 = 0.5;

/// The fields matching looks at. Borrowed so a probe can be built from
/// a stored item or from a submission that has no id yet.
pub struct MatchProbe<'a> {
    pub id: Option<u64>,
    pub kind: ItemKind,
    pub name: &'a str,
    pub color: &'a str,
    pub location: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a Item> for MatchProbe<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            id: Some(item.id),
            kind: item.kind,
            name: &item.name,
            color: &item.color,
            location: &item.location,
            description: &item.description,
        }
    }
}

impl<'a> MatchProbe<'a> {
    pub fn for_submission(new: &'a NewItem, kind: ItemKind) -> Self {
        Self {
            id: None,
            kind,
            name: &new.name,
            color: &new.color,
            location: &new.location,
            description: &new.description,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct MatchedItem {
    #[serde(flatten)]
    pub item: Item,
    pub match_score: f64,
}

fn contains_either_way(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

fn shared_word_count(a: &str, b: &str) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    words_a.intersection(&words_b).count()
}

fn score(probe: &MatchProbe, candidate: &Item) -> f64 {
    let mut score = 0.0;
    if contains_either_way(probe.name, &candidate.name) {
        score += NAME_WEIGHT;
    }
    if contains_either_way(probe.color, &candidate.color) {
        score += COLOR_WEIGHT;
    }
    if contains_either_way(probe.location, &candidate.location) {
        score += LOCATION_WEIGHT;
    }
    score += shared_word_count(probe.description, &candidate.description) as f64
        * DESCRIPTION_WORD_WEIGHT;
    score
}

/// Rank approved opposite-kind items against the probe. Stateless and
/// O(n) over the list; ties keep input order.
pub fn find_matching_items(probe: &MatchProbe, items: &[Item]) -> Vec<MatchedItem> {
    let wanted = probe.kind.opposite();
    let mut matches: Vec<MatchedItem> = items
        .iter()
        .filter(|i| i.kind == wanted && i.status == ItemStatus::Approved)
        .filter(|i| probe.id != Some(i.id))
        .filter_map(|i| {
            let s = score(probe, i);
            (s > 0.0).then(|| MatchedItem {
                item: i.clone(),
                match_score: s,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        b.match_score
            .partial_cmp(&a.match_score)
            .unwrap_or(Ordering::Equal)
    });
    matches.truncate(MAX_MATCHES);
    matches
}
