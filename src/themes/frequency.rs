// Unigram and bigram frequency tables.
//
// Counts are accumulated per source. Ranking sorts by descending count with
// the term itself as a secondary key, so equal counts always come out in the
// same (lexicographic) order.

use std::collections::HashMap;
use std::hash::Hash;

/// An ordered pair of adjacent tokens from a single item.
pub type Bigram = (String, String);

/// Term -> count mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Eq + Hash> {
    counts: HashMap<K, u32>,
}

impl<K: Eq + Hash> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Ord + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for `key`, 0 when absent.
    pub fn get(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &u32)> {
        self.counts.iter()
    }

    /// All entries, highest count first, ties broken by term.
    pub fn ranked(&self) -> Vec<(K, u32)> {
        let mut entries: Vec<(K, u32)> = self
            .counts
            .iter()
            .map(|(k, &c)| (k.clone(), c))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// The `n` highest-ranked entries.
    pub fn top(&self, n: usize) -> Vec<(K, u32)> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

impl<K: Eq + Hash + Ord + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

/// Fold token sequences into unigram and bigram tables.
///
/// Bigrams are taken within each sequence only: the last token of one item
/// never pairs with the first token of the next.
pub fn aggregate<S: AsRef<[String]>>(
    sequences: &[S],
) -> (FrequencyTable<String>, FrequencyTable<Bigram>) {
    let mut unigrams = FrequencyTable::new();
    let mut bigrams = FrequencyTable::new();

    for seq in sequences {
        let tokens = seq.as_ref();
        for token in tokens {
            unigrams.add(token.clone());
        }
        for pair in tokens.windows(2) {
            bigrams.add((pair[0].clone(), pair[1].clone()));
        }
    }

    (unigrams, bigrams)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn ranked_breaks_ties_by_term() {
        let table: FrequencyTable<String> = ["b", "a", "c", "c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let ranked = table.ranked();
        assert_eq!(
            ranked,
            vec![
                ("c".to_string(), 2),
                ("a".to_string(), 1),
                ("b".to_string(), 1)
            ]
        );
    }

    #[test]
    fn top_truncates() {
        let (uni, _) = aggregate(&[seq(&["x", "y", "z"])]);
        assert_eq!(uni.top(2).len(), 2);
        assert_eq!(uni.top(10).len(), 3);
    }

    #[test]
    fn single_token_sequences_have_no_bigrams() {
        let (uni, bi) = aggregate(&[seq(&["solo"]), seq(&["again"])]);
        assert_eq!(uni.total(), 2);
        assert!(bi.is_empty());
    }
}
