//! Rule-based French syllabifier.
//!
//! Splits a word into syllables with a deterministic character scan driven by
//! the static tables in [`crate::rules`]. The splitter is deliberately
//! conservative: literacy learners are shown fewer, more obvious cuts rather
//! than phonetically exact ones, so short words stay whole and ambiguous
//! vowel pairs are left unsplit.
//!
//! Two invariants hold for every input:
//! - totality: `syllabify` never fails, whatever the string contains;
//! - losslessness: concatenating the returned syllables reproduces the input
//!   exactly, case and characters included.

use serde::{Deserialize, Serialize};

use crate::rules::{base_letter, is_vowel, EXCEPTIONS, HIATUS_SPLITS, INSEPARABLE_CLUSTERS};
use crate::Config;

/// An ordered sequence of syllables whose concatenation reproduces the
/// original word. Syllables are never empty for non-empty words.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SyllableSequence(Vec<String>);

impl SyllableSequence {
    /// Build a sequence from pre-cut parts. Returns `None` when the parts are
    /// empty or any part is an empty string.
    pub fn new<S: Into<String>>(parts: Vec<S>) -> Option<Self> {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        Some(Self(parts))
    }

    /// The whole word as a single syllable. This is the universal fallback:
    /// it exists for any input, including the empty string.
    pub fn whole<S: Into<String>>(word: S) -> Self {
        Self(vec![word.into()])
    }

    pub fn syllables(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_monosyllable(&self) -> bool {
        self.0.len() == 1
    }

    /// Concatenation of all syllables: the original word.
    pub fn word(&self) -> String {
        self.0.concat()
    }

    /// Case-insensitive structural equality: same number of syllables, same
    /// content, in order.
    pub fn eq_ignore_case(&self, other: &SyllableSequence) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| a.to_lowercase() == b.to_lowercase())
    }
}

impl std::fmt::Display for SyllableSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join("-"))
    }
}

/// The rule engine. Holds the thresholds from [`Config`]; the letter tables
/// themselves are static. Stateless and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Syllabifier {
    short_word_max_len: usize,
    min_vowels_to_split: usize,
    merge_single_letter_syllables: bool,
}

impl Default for Syllabifier {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Syllabifier {
    pub fn new(config: &Config) -> Self {
        Self {
            short_word_max_len: config.short_word_max_len,
            min_vowels_to_split: config.min_vowels_to_split,
            merge_single_letter_syllables: config.merge_single_letter_syllables,
        }
    }

    /// Split `word` into syllables.
    ///
    /// Pipeline: exception dictionary -> short-word guard -> character scan
    /// -> single-letter merge. Falls back to the whole word as one syllable
    /// whenever no rule applies.
    pub fn syllabify(&self, word: &str) -> SyllableSequence {
        if word.is_empty() {
            return SyllableSequence::whole(word);
        }

        if let Some(seq) = self.exception_lookup(word) {
            return seq;
        }

        let chars: Vec<char> = word.chars().collect();
        let vowel_count = chars.iter().filter(|c| is_vowel(**c)).count();
        if chars.len() <= self.short_word_max_len || vowel_count < self.min_vowels_to_split {
            return SyllableSequence::whole(word);
        }

        let mut syllables = self.scan(&chars);
        if self.merge_single_letter_syllables {
            syllables = merge_single_letters(syllables);
        }

        SyllableSequence::new(syllables).unwrap_or_else(|| SyllableSequence::whole(word))
    }

    /// Exception lookup by lowercase surface form. On a hit the *original*
    /// surface is re-sliced along the curated cut lengths, so capitalization
    /// survives ("Avec" -> ["Avec"], not ["avec"]).
    fn exception_lookup(&self, word: &str) -> Option<SyllableSequence> {
        let cut = EXCEPTIONS.get(word.to_lowercase().as_str())?;
        let chars: Vec<char> = word.chars().collect();
        let mut parts = Vec::new();
        let mut offset = 0usize;
        for syllable in cut.split('-') {
            let len = syllable.chars().count();
            if offset + len > chars.len() {
                return None;
            }
            parts.push(chars[offset..offset + len].iter().collect::<String>());
            offset += len;
        }
        if offset != chars.len() {
            return None;
        }
        SyllableSequence::new(parts)
    }

    /// Left-to-right scan. On each vowel, look ahead to the next vowel and
    /// decide where the consonants in between belong:
    /// - 0 consonants: split only on the hiatus allow-list;
    /// - 1 consonant: it opens the next syllable;
    /// - 2 consonants: an inseparable cluster (or doubled letter) moves
    ///   forward whole, otherwise the pair is split 1/1;
    /// - 3 or more: the first stays, the rest move forward.
    fn scan(&self, chars: &[char]) -> Vec<String> {
        let n = chars.len();
        let mut syllables: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut i = 0usize;

        while i < n {
            let c = chars[i];
            current.push(c);
            if !is_vowel(c) {
                i += 1;
                continue;
            }

            // Look ahead for the next vowel.
            let mut j = i + 1;
            while j < n && !is_vowel(chars[j]) {
                j += 1;
            }
            if j >= n {
                // No vowel left: the rest of the word belongs here.
                current.extend(&chars[i + 1..]);
                break;
            }

            let consonants = j - i - 1;
            match consonants {
                0 => {
                    let pair: String = [base_letter(chars[i]), base_letter(chars[j])]
                        .iter()
                        .collect();
                    if HIATUS_SPLITS.contains(pair.as_str()) {
                        syllables.push(std::mem::take(&mut current));
                    }
                    i += 1;
                }
                1 => {
                    // CV rule: the single consonant opens the next syllable.
                    syllables.push(std::mem::take(&mut current));
                    i += 1;
                }
                2 => {
                    let a = chars[i + 1];
                    let b = chars[i + 2];
                    let cluster: String = [base_letter(a), base_letter(b)].iter().collect();
                    let doubled = base_letter(a) == base_letter(b);
                    if doubled || INSEPARABLE_CLUSTERS.contains(cluster.as_str()) {
                        syllables.push(std::mem::take(&mut current));
                        i += 1;
                    } else {
                        current.push(a);
                        syllables.push(std::mem::take(&mut current));
                        i += 2;
                    }
                }
                _ => {
                    current.push(chars[i + 1]);
                    syllables.push(std::mem::take(&mut current));
                    i += 2;
                }
            }
        }

        if !current.is_empty() {
            syllables.push(current);
        }
        syllables
    }
}

/// Merge 1-letter syllables into a neighbor, unless the word came out as
/// exactly two syllables. A lone letter is not a useful cut to show a
/// learner; a two-syllable result is left alone so words like "a-près" keep
/// their shape.
fn merge_single_letters(syllables: Vec<String>) -> Vec<String> {
    if syllables.len() <= 2 {
        return syllables;
    }
    let mut out: Vec<String> = Vec::with_capacity(syllables.len());
    for syllable in syllables {
        if syllable.chars().count() == 1 {
            if let Some(prev) = out.last_mut() {
                prev.push_str(&syllable);
            } else {
                out.push(syllable);
            }
        } else if let Some(prev) = out.last_mut().filter(|p| p.chars().count() == 1) {
            // A word-initial single letter merges into the syllable after it.
            prev.push_str(&syllable);
        } else {
            out.push(syllable);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(parts: &[&str]) -> SyllableSequence {
        SyllableSequence::new(parts.to_vec()).unwrap()
    }

    fn split(word: &str) -> Vec<String> {
        Syllabifier::default()
            .syllabify(word)
            .syllables()
            .to_vec()
    }

    #[test]
    fn exception_hit_avec() {
        assert_eq!(split("avec"), vec!["avec"]);
    }

    #[test]
    fn exception_hit_important() {
        assert_eq!(split("important"), vec!["im", "por", "tant"]);
    }

    #[test]
    fn exception_hit_preserves_capitalization() {
        assert_eq!(split("École"), vec!["É", "cole"]);
        assert_eq!(split("IMPORTANT"), vec!["IM", "POR", "TANT"]);
    }

    #[test]
    fn exception_hit_with_apostrophe() {
        assert_eq!(split("aujourd'hui"), vec!["au", "jour", "d'hui"]);
    }

    #[test]
    fn short_words_stay_whole() {
        assert_eq!(split("chat"), vec!["chat"]);
        assert_eq!(split("le"), vec!["le"]);
        assert_eq!(split("a"), vec!["a"]);
    }

    #[test]
    fn words_with_one_vowel_stay_whole() {
        // 5 letters but a single vowel: the guard keeps it whole.
        assert_eq!(split("vingt"), vec!["vingt"]);
    }

    #[test]
    fn cv_rule_chocolat() {
        assert_eq!(split("chocolat"), vec!["cho", "co", "lat"]);
    }

    #[test]
    fn diphthong_not_split_maison() {
        // "ai" is not in the hiatus allow-list, "s" follows the CV rule.
        assert_eq!(split("maison"), vec!["mai", "son"]);
    }

    #[test]
    fn inseparable_cluster_moves_forward() {
        // "dr" stays together: pou-dre, not poud-re.
        assert_eq!(split("poudre"), vec!["pou", "dre"]);
    }

    #[test]
    fn separable_pair_splits_one_one() {
        // "rt" is not a cluster: the r closes the first syllable.
        assert_eq!(split("portail"), vec!["por", "tail"]);
    }

    #[test]
    fn doubled_letters_move_forward() {
        assert_eq!(split("bronzette"), vec!["bron", "zette"]);
        // Without the exception entry the scanner itself keeps "tt" together.
        assert_eq!(split("carotte"), vec!["ca", "ro", "tte"]);
    }

    #[test]
    fn three_consonants_split_after_first() {
        // rst: r stays, st moves forward.
        assert_eq!(split("merstan"), vec!["mer", "stan"]);
    }

    #[test]
    fn hiatus_allowlist_splits() {
        // "éa" reduces to "ea", which is on the allow-list; the lone "a"
        // then merges into the previous syllable.
        assert_eq!(split("créature"), vec!["créa", "tu", "re"]);
        assert_eq!(split("liane"), vec!["lia", "ne"]);
    }

    #[test]
    fn empty_and_odd_inputs_do_not_panic() {
        for w in ["", "x", "'", "---", "aujourd'", "œuf"] {
            let s = Syllabifier::default().syllabify(w);
            assert_eq!(s.word(), w);
        }
    }

    #[test]
    fn lossless_on_sample_vocabulary() {
        let words = [
            "chocolat", "maison", "bronzette", "important", "école",
            "Fenêtre", "anticonstitutionnellement", "l'arbre", "papillon",
            "bibliothèque", "ordinateur", "REGARDER", "chèvrefeuille",
        ];
        let s = Syllabifier::default();
        for w in words {
            let result = s.syllabify(w);
            assert_eq!(result.word(), w, "lossy segmentation for {w}");
            assert!(
                result.syllables().iter().all(|p| !p.is_empty()),
                "empty syllable for {w}"
            );
        }
    }

    #[test]
    fn sequence_rejects_empty_parts() {
        assert!(SyllableSequence::new(Vec::<String>::new()).is_none());
        assert!(SyllableSequence::new(vec!["ab", ""]).is_none());
    }

    #[test]
    fn sequence_case_insensitive_equality() {
        assert!(seq(&["CHO", "co", "lat"]).eq_ignore_case(&seq(&["cho", "co", "lat"])));
        assert!(!seq(&["cho", "colat"]).eq_ignore_case(&seq(&["cho", "co", "lat"])));
    }

    #[test]
    fn display_joins_with_dashes() {
        assert_eq!(seq(&["mai", "son"]).to_string(), "mai-son");
    }
}
