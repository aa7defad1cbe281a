use std::{
    collections::{HashMap, HashSet},
    hash::{DefaultHasher, Hash, Hasher},
};

use super::decision::SkipReason;

/// Ignore-word matching policy.
///
/// The behavior diverged across revisions of the source material, so the
/// rule is explicit configuration rather than a hard-coded variant.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum MatchPolicy {
    /// Case-sensitive exact match plus start-anchored prefix match.
    #[default]
    ExactAndPrefix,
    /// Case-sensitive exact match only.
    Exact,
    /// Case-insensitive containment of an ignore word anywhere in the unit.
    CaseInsensitiveContains,
}

impl MatchPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::ExactAndPrefix => "exact_and_prefix",
            MatchPolicy::Exact => "exact",
            MatchPolicy::CaseInsensitiveContains => "contains",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exact_and_prefix" => Some(MatchPolicy::ExactAndPrefix),
            "exact" => Some(MatchPolicy::Exact),
            "contains" => Some(MatchPolicy::CaseInsensitiveContains),
            _ => None,
        }
    }
}

/// Splits free-form ignore-list input on commas and whitespace.
///
/// Legacy-script characters are preserved exactly; the only normalization is
/// trimming. Splitting never fails. An empty result is valid and simply
/// disables ignoring.
#[must_use]
pub fn parse_ignore_words(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Content signature of a word list: trimmed, empty entries dropped.
///
/// Two lists with the same signature build structurally identical indexes,
/// which is what gates rebuilds in [`maybe_rebuild`].
#[must_use]
pub fn content_hash<I, S>(words: I) -> u64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = DefaultHasher::new();
    for word in words {
        let trimmed = word.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        trimmed.hash(&mut hasher);
    }
    hasher.finish()
}

#[derive(Clone, Debug, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    terminal: bool,
}

/// Arena-backed character trie for start-anchored prefix matching.
#[derive(Clone, Debug)]
struct Trie {
    nodes: Vec<TrieNode>,
}

impl Trie {
    fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
        }
    }

    fn insert(&mut self, word: &str) {
        let mut current = 0usize;
        for ch in word.chars() {
            current = match self.nodes[current].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[current].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[current].terminal = true;
    }

    /// True when some inserted word terminates on the walk of `query`,
    /// i.e. an ignore word is a prefix of `query`. Cost is O(len of query).
    fn prefix_hit(&self, query: &str) -> bool {
        let mut current = 0usize;
        for ch in query.chars() {
            let Some(&next) = self.nodes[current].children.get(&ch) else {
                return false;
            };
            current = next;
            if self.nodes[current].terminal {
                return true;
            }
        }
        false
    }
}

/// Immutable membership index over an ignore list.
///
/// Words are inserted verbatim after trimming; the legacy script's
/// characters are never case-folded, since the encoding is not Latin-cased.
/// The lowercased copies exist only for the [`MatchPolicy::CaseInsensitiveContains`]
/// compatibility policy.
#[derive(Clone, Debug)]
pub struct IgnoreIndex {
    exact: HashSet<String>,
    trie: Trie,
    lowered: Vec<String>,
    source_hash: u64,
}

impl Default for IgnoreIndex {
    fn default() -> Self {
        Self::build(std::iter::empty::<&str>())
    }
}

impl IgnoreIndex {
    /// Builds an index from `words`; entries are trimmed and empties dropped.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut exact = HashSet::new();
        let mut trie = Trie::new();
        let mut lowered = Vec::new();
        let mut hasher = DefaultHasher::new();

        for word in words {
            let trimmed = word.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            trimmed.hash(&mut hasher);
            trie.insert(trimmed);
            lowered.push(trimmed.to_lowercase());
            exact.insert(trimmed.to_owned());
        }

        Self {
            exact,
            trie,
            lowered,
            source_hash: hasher.finish(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    #[must_use]
    pub fn source_hash(&self) -> u64 {
        self.source_hash
    }

    /// Exact membership; O(1) amortized.
    #[must_use]
    pub fn contains_exact(&self, word: &str) -> bool {
        self.exact.contains(word)
    }

    /// Start-anchored prefix membership; O(length of `word`).
    #[must_use]
    pub fn has_prefix(&self, word: &str) -> bool {
        self.trie.prefix_hit(word)
    }

    /// Applies `policy` to `word`, returning the reason of the first
    /// matching rule.
    #[must_use]
    pub fn matches(&self, word: &str, policy: MatchPolicy) -> Option<SkipReason> {
        if self.is_empty() {
            return None;
        }
        match policy {
            MatchPolicy::ExactAndPrefix => {
                if self.contains_exact(word) {
                    Some(SkipReason::IgnoreListExact)
                } else if self.has_prefix(word) {
                    Some(SkipReason::IgnoreListPrefix)
                } else {
                    None
                }
            }
            MatchPolicy::Exact => self
                .contains_exact(word)
                .then_some(SkipReason::IgnoreListExact),
            MatchPolicy::CaseInsensitiveContains => {
                let lowered = word.to_lowercase();
                self.lowered
                    .iter()
                    .any(|w| lowered.contains(w.as_str()))
                    .then_some(SkipReason::IgnoreListExact)
            }
        }
    }
}

/// Hash-gated rebuild.
///
/// Returns `old` untouched (with `false`) when `words` serialize to the same
/// content signature as the one last built; otherwise builds a fresh index
/// and returns it with `true`. Pure: no hidden state is consulted.
#[must_use]
pub fn maybe_rebuild(old: Option<IgnoreIndex>, words: &[String]) -> (IgnoreIndex, bool) {
    let hash = content_hash(words.iter());
    if let Some(index) = old
        && index.source_hash() == hash
    {
        return (index, false);
    }
    (IgnoreIndex::build(words.iter()), true)
}

/// Caller-owned cache of the most recently built index.
///
/// Invariant: the cached index always reflects exactly the most recently
/// supplied ignore list, never a stale or partially-applied one. Reuse is
/// keyed on the content signature, so repeated queries against an unchanged
/// list within one editing session skip the O(n) rebuild.
#[derive(Debug, Default)]
pub struct IgnoreCache {
    index: Option<IgnoreIndex>,
    rebuilds: u64,
}

impl IgnoreCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for free-form ignore `input`, rebuilding only when
    /// the parsed word list differs from the cached one.
    pub fn index_for(&mut self, input: &str) -> &IgnoreIndex {
        let words = parse_ignore_words(input);
        let (index, rebuilt) = maybe_rebuild(self.index.take(), &words);
        if rebuilt {
            self.rebuilds += 1;
        }
        &*self.index.insert(index)
    }

    /// Number of times a build actually ran; observable for rebuild gating.
    #[must_use]
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn parse_splits_on_commas_whitespace_and_newlines() {
        let words = parse_ignore_words("এক, দুই\nতিন\tচার  পাঁচ,,");
        assert_eq!(words, vec!["এক", "দুই", "তিন", "চার", "পাঁচ"]);
    }

    #[test]
    fn parse_of_blank_input_is_empty_and_valid() {
        assert!(parse_ignore_words("").is_empty());
        assert!(parse_ignore_words(" \n\t, ,").is_empty());
    }

    #[test]
    fn exact_membership_is_case_sensitive() {
        let index = IgnoreIndex::build(["Word"]);
        assert!(index.contains_exact("Word"));
        assert!(!index.contains_exact("word"));
    }

    #[test]
    fn prefix_anchors_at_word_start() {
        let index = IgnoreIndex::build(["test"]);
        assert!(index.has_prefix("test"));
        assert!(index.has_prefix("testing"));
        assert!(!index.has_prefix("attest"));
        assert!(!index.has_prefix("tes"));
    }

    #[test]
    fn exact_and_prefix_policy_reports_distinct_reasons() {
        let index = IgnoreIndex::build(["test"]);
        assert_eq!(
            index.matches("test", MatchPolicy::ExactAndPrefix),
            Some(SkipReason::IgnoreListExact)
        );
        assert_eq!(
            index.matches("testing", MatchPolicy::ExactAndPrefix),
            Some(SkipReason::IgnoreListPrefix)
        );
        assert_eq!(index.matches("attest", MatchPolicy::ExactAndPrefix), None);
    }

    #[test]
    fn exact_policy_ignores_prefix_hits() {
        let index = IgnoreIndex::build(["test"]);
        assert_eq!(index.matches("testing", MatchPolicy::Exact), None);
        assert_eq!(
            index.matches("test", MatchPolicy::Exact),
            Some(SkipReason::IgnoreListExact)
        );
    }

    #[test]
    fn contains_policy_folds_case_and_matches_substrings() {
        let index = IgnoreIndex::build(["Word"]);
        assert!(
            index
                .matches("keyWORDs", MatchPolicy::CaseInsensitiveContains)
                .is_some()
        );
        assert!(
            index
                .matches("nothing", MatchPolicy::CaseInsensitiveContains)
                .is_none()
        );
    }

    #[test]
    fn empty_index_never_matches() {
        let index = IgnoreIndex::build(Vec::<String>::new());
        assert!(index.is_empty());
        assert_eq!(index.matches("anything", MatchPolicy::ExactAndPrefix), None);
    }

    #[test]
    fn build_trims_and_drops_empty_entries() {
        let index = IgnoreIndex::build(["  লেখা  ", "", "   "]);
        assert_eq!(index.len(), 1);
        assert!(index.contains_exact("লেখা"));
    }

    #[test]
    fn content_hash_ignores_surrounding_whitespace_only() {
        let a = content_hash(["one", "two"]);
        let b = content_hash([" one ", "two "]);
        let c = content_hash(["one", "three"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn maybe_rebuild_reuses_index_for_identical_content() {
        let words = vec!["এক".to_owned(), "দুই".to_owned()];
        let (first, rebuilt) = maybe_rebuild(None, &words);
        assert!(rebuilt);
        let (second, rebuilt) = maybe_rebuild(Some(first), &words);
        assert!(!rebuilt);
        assert!(second.contains_exact("এক"));
    }

    #[test]
    fn cache_counts_rebuilds_only_on_changed_content() {
        let mut cache = IgnoreCache::new();
        let _ = cache.index_for("এক, দুই");
        let _ = cache.index_for("এক দুই");
        assert_eq!(cache.rebuilds(), 1);

        let _ = cache.index_for("এক দুই তিন");
        assert_eq!(cache.rebuilds(), 2);

        let _ = cache.index_for("এক, দুই, তিন");
        assert_eq!(cache.rebuilds(), 2);
    }

    #[test]
    fn cache_always_reflects_the_latest_list() {
        let mut cache = IgnoreCache::new();
        assert!(cache.index_for("old").contains_exact("old"));
        let index = cache.index_for("new");
        assert!(index.contains_exact("new"));
        assert!(!index.contains_exact("old"));
    }
}
