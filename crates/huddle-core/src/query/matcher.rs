//! Ranking of results against the user's query.

/// Scores how well a candidate string matches a query.
pub trait Matcher: Send + Sync {
    /// Higher is better. `None` drops the candidate.
    fn score(&self, query: &str, candidate: &str) -> Option<u32>;
}

const EXACT: u32 = 1000;
const PREFIX: u32 = 900;
const WORD_PREFIX: u32 = 800;
const CONTAINS: u32 = 700;
const INITIALS: u32 = 600;
const SUBSEQUENCE_MAX: i64 = 500;
const MAX_POSITION_PENALTY: usize = 99;

/// Case-insensitive fuzzy matching.
///
/// Tiers, best first: exact, prefix, prefix of a word, substring, prefix of
/// the word initials, in-order subsequence. Within the substring tiers an
/// earlier match scores higher. Subsequences earn bonuses for consecutive
/// characters and word starts and lose points for gaps.
#[derive(Debug, Default, Clone, Copy)]
pub struct FuzzyMatcher;

impl Matcher for FuzzyMatcher {
    fn score(&self, query: &str, candidate: &str) -> Option<u32> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Some(0);
        }
        let candidate = candidate.to_lowercase();

        if candidate == query {
            return Some(EXACT);
        }
        if candidate.starts_with(&query) {
            return Some(PREFIX);
        }
        if let Some(pos) = word_starts(&candidate).find(|&i| candidate[i..].starts_with(&query)) {
            return Some(WORD_PREFIX - position_penalty(pos));
        }
        if let Some(pos) = candidate.find(&query) {
            return Some(CONTAINS - position_penalty(pos));
        }
        if initials(&candidate).starts_with(&query) {
            return Some(INITIALS);
        }
        subsequence_score(&query, &candidate)
    }
}

fn position_penalty(pos: usize) -> u32 {
    pos.min(MAX_POSITION_PENALTY) as u32
}

/// Byte offsets where a word starts.
fn word_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    let mut previous: Option<char> = None;
    text.char_indices().filter_map(move |(i, ch)| {
        let is_start = ch.is_alphanumeric() && previous.is_none_or(|p| !p.is_alphanumeric());
        previous = Some(ch);
        is_start.then_some(i)
    })
}

fn initials(text: &str) -> String {
    word_starts(text)
        .filter_map(|i| text[i..].chars().next())
        .collect()
}

fn subsequence_score(query: &str, candidate: &str) -> Option<u32> {
    let needle: Vec<char> = query.chars().filter(|c| !c.is_whitespace()).collect();

    let mut matched = 0;
    let mut score: i64 = 0;
    let mut first_match = None;
    let mut previous_matched = false;
    let mut previous: Option<char> = None;

    for (pos, ch) in candidate.chars().enumerate() {
        if matched < needle.len() && ch == needle[matched] {
            score += 10;
            if previous_matched {
                score += 15;
            }
            if previous.is_none_or(|p| !p.is_alphanumeric()) {
                score += 20;
            }
            first_match.get_or_insert(pos);
            matched += 1;
            previous_matched = true;
        } else {
            if first_match.is_some() && matched < needle.len() {
                score -= 1;
            }
            previous_matched = false;
        }
        previous = Some(ch);
    }

    if matched < needle.len() {
        return None;
    }
    score -= first_match.unwrap_or(0).min(MAX_POSITION_PENALTY) as i64;
    Some(score.clamp(1, SUBSEQUENCE_MAX) as u32)
}

/// Keep the items that match `query`, best first.
///
/// Items with equal scores keep their input order.
pub fn rank<T, F>(matcher: &dyn Matcher, query: &str, items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut scored: Vec<(u32, T)> = items
        .into_iter()
        .filter_map(|item| matcher.score(query, key(&item)).map(|score| (score, item)))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, item)| item).collect()
}
