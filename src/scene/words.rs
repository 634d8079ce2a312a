/// Longest single word laid out on one line; longer ones are split in two.
pub const MAX_SINGLE_LINE: usize = 7;

/// Split user input into display lines.
///
/// Separators are commas and whitespace. A lone word longer than [`MAX_SINGLE_LINE`]
/// characters is broken at `ceil(len / 2)` so it fits on two lines.
pub fn parse_words(input: &str) -> Vec<String> {
    let words: Vec<String> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect();

    if let [word] = words.as_slice() {
        let len = word.chars().count();
        if len > MAX_SINGLE_LINE {
            let mid = len.div_ceil(2);
            let head: String = word.chars().take(mid).collect();
            let tail: String = word.chars().skip(mid).collect();
            return vec![head, tail];
        }
    }
    words
}

/// Fallback vocabulary used whenever related words cannot be obtained.
pub fn default_related_words() -> Vec<String> {
    [
        "melody",
        "harmony",
        "rhythm",
        "tempo",
        "pitch",
        "scale",
        "chord",
        "note",
        "tune",
        "beat",
        "symphony",
        "orchestra",
        "concert",
        "band",
        "guitar",
        "piano",
        "drums",
        "violin",
        "singer",
        "composer",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Related word a visible fragment most likely belongs to.
///
/// Case-insensitive; a prefix match wins, then a suffix match, then any substring match.
pub fn guess_full_word<'a>(fragment: &str, related: &'a [String]) -> Option<&'a str> {
    let needle = fragment.to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let lowered: Vec<(String, &str)> = related
        .iter()
        .map(|w| (w.to_lowercase(), w.as_str()))
        .collect();
    let find = |hit: &dyn Fn(&str) -> bool| {
        lowered
            .iter()
            .find(|(l, _)| hit(l.as_str()))
            .map(|(_, w)| *w)
    };
    find(&|l| l.starts_with(&needle))
        .or_else(|| find(&|l| l.ends_with(&needle)))
        .or_else(|| find(&|l| l.contains(&needle)))
}

/// Source of words related to a query (an external service in the full application).
pub trait RelatedWords {
    fn fetch(&self, query: &str) -> anyhow::Result<Vec<String>>;
}

/// Fixed list, ignoring the query.
#[derive(Clone, Debug, Default)]
pub struct StaticRelatedWords {
    pub words: Vec<String>,
}

impl StaticRelatedWords {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }
}

impl RelatedWords for StaticRelatedWords {
    fn fetch(&self, _query: &str) -> anyhow::Result<Vec<String>> {
        Ok(self.words.clone())
    }
}

/// Split a comma-separated service reply into trimmed, non-empty words.
pub fn split_related(reply: &str) -> Vec<String> {
    reply
        .split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Collapse a fetch outcome into a usable word list. Failures and empty replies fall back
/// to [`default_related_words`].
pub fn resolve_related(result: anyhow::Result<Vec<String>>) -> Vec<String> {
    match result {
        Ok(words) if !words.is_empty() => words,
        Ok(_) => {
            tracing::warn!("related words reply was empty, using defaults");
            default_related_words()
        }
        Err(err) => {
            tracing::warn!(error = %err, "related words unavailable, using defaults");
            default_related_words()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/words.rs"]
mod tests;
