//! Description normalization for display and speech
//!
//! Raw flavor text goes through an ordered pipeline of named rules:
//! 1. `FilterCharacters`: runs of disallowed characters collapse to one space
//! 2. `FoldCase`: every letter is lower-cased
//! 3. `CapitalizeSentences`: the first letter of each sentence is upper-cased
//!
//! The output only contains ASCII letters, ASCII digits, non-control
//! whitespace, the preserved accented letters and the period.
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use unicode_normalization::UnicodeNormalization;

/// Accented letters that survive filtering
pub const PRESERVED_LETTERS: &[char] = &['é', 'É'];

/// Punctuation that ends a sentence in the source text
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

lazy_static! {
    /// A letter at the very start (after optional whitespace) or after
    /// terminal punctuation followed by whitespace. The letter is group 1
    /// and always ends the match.
    static ref SENTENCE_START_REGEX: Regex = Regex::new(
        r"(?:\A\s*|[.!?]\s+)([a-zA-ZéÉ])"
    ).unwrap();
}

/// Where sentence boundaries are looked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Boundaries are found in the filtered text. `!` and `?` are filtered
    /// before capitalization and never start a sentence. Normalization is
    /// idempotent under this policy.
    #[default]
    FilteredText,
    /// Boundaries are recorded while filtering, over the source text, so
    /// `!` and `?` still start a sentence even though they are removed.
    SourceText,
}

/// One step of the normalization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationRule {
    FilterCharacters,
    FoldCase,
    CapitalizeSentences,
}

impl NormalizationRule {
    /// Rules in the order they are applied
    pub const PIPELINE: [NormalizationRule; 3] = [
        NormalizationRule::FilterCharacters,
        NormalizationRule::FoldCase,
        NormalizationRule::CapitalizeSentences,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            NormalizationRule::FilterCharacters => "filter_characters",
            NormalizationRule::FoldCase => "fold_case",
            NormalizationRule::CapitalizeSentences => "capitalize_sentences",
        }
    }

    fn apply(&self, draft: Draft, policy: BoundaryPolicy) -> Draft {
        match self {
            NormalizationRule::FilterCharacters => {
                filter_tracking(&draft.text, policy == BoundaryPolicy::SourceText)
            }
            NormalizationRule::FoldCase => Draft {
                text: fold_case(&draft.text),
                sentence_starts: draft.sentence_starts,
            },
            NormalizationRule::CapitalizeSentences => Draft {
                text: capitalize_with(&draft.text, &draft.sentence_starts),
                sentence_starts: draft.sentence_starts,
            },
        }
    }
}

/// Text moving through the pipeline
///
/// `sentence_starts` holds char indices into `text` that must be
/// capitalized because the source text had a boundary there.
#[derive(Debug, Clone, Default)]
struct Draft {
    text: String,
    sentence_starts: BTreeSet<usize>,
}

/// Runs the normalization pipeline with a chosen boundary policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextNormalizer {
    policy: BoundaryPolicy,
}

impl TextNormalizer {
    pub const fn new(policy: BoundaryPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> BoundaryPolicy {
        self.policy
    }

    /// Normalize raw text. Total over all strings.
    pub fn normalize(&self, raw: &str) -> String {
        // Compose first so "e" + U+0301 is seen as the preserved "é"
        let mut draft = Draft {
            text: raw.nfc().collect(),
            sentence_starts: BTreeSet::new(),
        };

        for rule in NormalizationRule::PIPELINE {
            draft = rule.apply(draft, self.policy);
        }

        draft.text
    }

    /// Normalize and keep the original alongside
    pub fn normalize_with_result(&self, raw: &str) -> NormalizationResult {
        NormalizationResult {
            original: raw.to_string(),
            normalized: self.normalize(raw),
        }
    }
}

/// Normalize with the default policy
pub fn normalize(raw: &str) -> String {
    TextNormalizer::default().normalize(raw)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationResult {
    /// Original text before normalization
    pub original: String,
    /// Cleaned text suitable for display and speech
    pub normalized: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizationInfo {
    /// Source characters that were dropped by filtering or changed case
    pub changes_count: usize,
    /// Original length in characters
    pub original_length: usize,
    /// Normalized length in characters
    pub normalized_length: usize,
    /// Characters dropped by filtering
    pub removed_characters: usize,
}

/// Get information about what normalization was performed
pub fn get_normalization_info(result: &NormalizationResult) -> NormalizationInfo {
    // Filtering keeps allowed characters in place and only inserts gap
    // spaces, so the filtered text lines up with the normalized one.
    let composed: String = result.original.nfc().collect();
    let dropped = composed.chars().filter(|ch| !is_allowed(*ch)).count();
    let recased = filter_characters(&composed)
        .chars()
        .zip(result.normalized.chars())
        .filter(|(a, b)| a != b)
        .count();
    let changes_count = dropped + recased;

    let original_length = result.original.chars().count();
    let normalized_length = result.normalized.chars().count();

    NormalizationInfo {
        changes_count,
        original_length,
        normalized_length,
        removed_characters: original_length.saturating_sub(normalized_length),
    }
}

/// Whether `ch` may appear in normalized text
pub fn is_allowed(ch: char) -> bool {
    !ch.is_control()
        && (ch.is_ascii_alphanumeric()
            || ch.is_whitespace()
            || ch == '.'
            || PRESERVED_LETTERS.contains(&ch))
}

fn is_sentence_letter(ch: char) -> bool {
    ch.is_ascii_alphabetic() || PRESERVED_LETTERS.contains(&ch)
}

/// Replace every run of disallowed characters with a single space
///
/// The space merges with whitespace already next to the run, so a run never
/// doubles existing whitespace. A run at either end of the string still
/// becomes a space.
pub fn filter_characters(text: &str) -> String {
    filter_tracking(text, false).text
}

/// Lower-case every letter
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Upper-case the first letter of the text and of every sentence
pub fn capitalize_sentences(text: &str) -> String {
    capitalize_with(text, &BTreeSet::new())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryScan {
    Idle,
    Terminated,
    Armed,
}

fn filter_tracking(text: &str, track_boundaries: bool) -> Draft {
    let mut out = String::with_capacity(text.len());
    let mut written = 0usize;
    let mut sentence_starts = BTreeSet::new();
    let mut in_gap = false;
    let mut scan = BoundaryScan::Idle;

    for ch in text.chars() {
        let opens_sentence = track_boundaries && scan == BoundaryScan::Armed && is_sentence_letter(ch);

        scan = if SENTENCE_TERMINATORS.contains(&ch) {
            BoundaryScan::Terminated
        } else if ch.is_whitespace() && scan != BoundaryScan::Idle {
            BoundaryScan::Armed
        } else {
            BoundaryScan::Idle
        };

        if !is_allowed(ch) {
            in_gap = true;
            continue;
        }

        if in_gap {
            if !ends_with_whitespace(&out) && !ch.is_whitespace() {
                out.push(' ');
                written += 1;
            }
            in_gap = false;
        }

        if opens_sentence {
            sentence_starts.insert(written);
        }
        out.push(ch);
        written += 1;
    }

    if in_gap && !ends_with_whitespace(&out) {
        out.push(' ');
    }

    Draft {
        text: out,
        sentence_starts,
    }
}

fn ends_with_whitespace(text: &str) -> bool {
    text.chars().next_back().map_or(false, char::is_whitespace)
}

fn capitalize_with(text: &str, sentence_starts: &BTreeSet<usize>) -> String {
    let marked = SENTENCE_START_REGEX.replace_all(text, |caps: &Captures| {
        let whole = &caps[0];
        let letter = &caps[1];
        format!(
            "{}{}",
            &whole[..whole.len() - letter.len()],
            letter.to_uppercase()
        )
    });

    if sentence_starts.is_empty() {
        return marked.into_owned();
    }

    let mut out = String::with_capacity(marked.len());
    for (idx, ch) in marked.chars().enumerate() {
        if sentence_starts.contains(&idx) {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Rule: FilterCharacters =====

    #[test]
    fn test_filter_keeps_allowed_text() {
        assert_eq!(filter_characters("Abc 123. def"), "Abc 123. def");
    }

    #[test]
    fn test_filter_replaces_run_with_single_space() {
        assert_eq!(filter_characters("fire,,,water"), "fire water");
        assert_eq!(filter_characters("ab\u{0}\u{7F}cd"), "ab cd");
    }

    #[test]
    fn test_filter_merges_with_adjacent_whitespace() {
        assert_eq!(filter_characters("dog! a bird"), "dog a bird");
        assert_eq!(filter_characters("dog !a"), "dog a");
    }

    #[test]
    fn test_filter_keeps_space_for_runs_at_edges() {
        assert_eq!(filter_characters("!!hello??"), " hello ");
        assert_eq!(filter_characters("\u{0C}"), " ");
        assert_eq!(filter_characters("!! hello ??"), " hello ");
    }

    #[test]
    fn test_filter_control_characters_at_edges() {
        assert_eq!(filter_characters("ab\u{0}"), "ab ");
        assert_eq!(filter_characters("\u{0}ab"), " ab");
        assert_eq!(filter_characters("\u{7F}"), " ");
        assert_eq!(filter_characters("\u{0}\u{7F}\u{1F}"), " ");
    }

    #[test]
    fn test_filter_removes_control_whitespace() {
        // Flavor text ships with newlines and form feeds
        assert_eq!(
            filter_characters("It can freely\nrecombine\u{0C}its own cellular"),
            "It can freely recombine its own cellular"
        );
    }

    #[test]
    fn test_filter_removes_c1_controls() {
        assert_eq!(filter_characters("a\u{85}b\u{9F}c"), "a b c");
    }

    #[test]
    fn test_filter_preserves_accented_letters() {
        assert_eq!(filter_characters("Pokémon ÉVOLVES"), "Pokémon ÉVOLVES");
        assert_eq!(filter_characters("naïve"), "na ve");
    }

    #[test]
    fn test_filter_keeps_non_breaking_space() {
        assert_eq!(filter_characters("a\u{A0}b"), "a\u{A0}b");
    }

    #[test]
    fn test_filter_keeps_existing_whitespace_runs() {
        assert_eq!(filter_characters("a   b"), "a   b");
    }

    // ===== Rule: FoldCase =====

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("PIKACHU Évolves"), "pikachu évolves");
    }

    // ===== Rule: CapitalizeSentences =====

    #[test]
    fn test_capitalize_start_and_after_period() {
        assert_eq!(capitalize_sentences("a cat. a dog"), "A cat. A dog");
    }

    #[test]
    fn test_capitalize_after_bang_and_question_in_same_text() {
        assert_eq!(capitalize_sentences("hi! you? ok"), "Hi! You? Ok");
    }

    #[test]
    fn test_capitalize_requires_whitespace_after_period() {
        assert_eq!(capitalize_sentences("v1.version"), "V1.version");
    }

    #[test]
    fn test_capitalize_skips_leading_whitespace() {
        assert_eq!(capitalize_sentences("  hello"), "  Hello");
    }

    #[test]
    fn test_capitalize_only_letters() {
        assert_eq!(capitalize_sentences("a. 3 cats"), "A. 3 cats");
    }

    #[test]
    fn test_capitalize_accented_start() {
        assert_eq!(capitalize_sentences("élan. é"), "Élan. É");
    }

    #[test]
    fn test_capitalize_multiple_spaces() {
        assert_eq!(capitalize_sentences("one.   two"), "One.   Two");
    }

    // ===== Pipeline =====

    #[test]
    fn test_pipeline_order() {
        let names: Vec<&str> = NormalizationRule::PIPELINE.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["filter_characters", "fold_case", "capitalize_sentences"]
        );
    }

    #[test]
    fn test_default_policy_ignores_filtered_terminators() {
        assert_eq!(
            normalize("a cat. a dog! a bird? a fish"),
            "A cat. A dog a bird a fish"
        );
    }

    #[test]
    fn test_source_policy_keeps_filtered_terminators() {
        let normalizer = TextNormalizer::new(BoundaryPolicy::SourceText);
        assert_eq!(
            normalizer.normalize("a cat. a dog! a bird? a fish"),
            "A cat. A dog A bird A fish"
        );
    }

    #[test]
    fn test_source_policy_needs_whitespace_after_terminator() {
        let normalizer = TextNormalizer::new(BoundaryPolicy::SourceText);
        assert_eq!(normalizer.normalize("wow!great"), "Wow great");
    }

    #[test]
    fn test_source_policy_newline_counts_as_whitespace() {
        let normalizer = TextNormalizer::new(BoundaryPolicy::SourceText);
        assert_eq!(normalizer.normalize("HELLO?\nTHERE"), "Hello There");
    }

    #[test]
    fn test_default_policy_newline_after_period() {
        assert_eq!(normalize("FIRST.\nSECOND"), "First. Second");
    }

    #[test]
    fn test_nul_and_del_become_single_space() {
        assert_eq!(normalize("ab\u{0}cd"), "Ab cd");
        assert_eq!(normalize("ab\u{7F}cd"), "Ab cd");
        assert_eq!(normalize("ab\u{0}\u{0}\u{7F}cd"), "Ab cd");
    }

    #[test]
    fn test_nul_at_edges_becomes_space() {
        assert_eq!(normalize("ab\u{0}"), "Ab ");
        assert_eq!(normalize("\u{0}ab"), " Ab");
        assert_eq!(normalize("\u{7F}"), " ");
        assert_eq!(normalize(&normalize("\u{0}ab\u{0}")), " Ab ");
    }

    #[test]
    fn test_source_policy_with_leading_run() {
        let normalizer = TextNormalizer::new(BoundaryPolicy::SourceText);
        assert_eq!(normalizer.normalize("\u{0}hi! there"), " Hi There");
    }

    #[test]
    fn test_accented_letters_survive() {
        assert_eq!(normalize("pokémon évolves"), "Pokémon évolves");
    }

    #[test]
    fn test_decomposed_accent_is_composed() {
        assert_eq!(normalize("pokEe\u{301}mon"), "Pokeémon");
        assert_eq!(normalize("e\u{301}volves"), "Évolves");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(
            TextNormalizer::new(BoundaryPolicy::SourceText).normalize(""),
            ""
        );
    }

    #[test]
    fn test_no_alphabetic_content() {
        assert_eq!(normalize("!!!???"), " ");
        assert_eq!(normalize("123 456"), "123 456");
    }

    #[test]
    fn test_real_flavor_text() {
        let raw = "When several of\nthese POKéMON\ngather, their\u{0C}electricity could\nbuild and cause\nlightning storms.";
        assert_eq!(
            normalize(raw),
            "When several of these pokémon gather their electricity could build and cause lightning storms."
        );
    }

    #[test]
    fn test_idempotent_default() {
        let once = normalize("IT'S A BIRD! no... it's a PLANE?\u{0}yes.");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_normalization_info() {
        let result = TextNormalizer::default().normalize_with_result("HI!!");
        let info = get_normalization_info(&result);

        assert_eq!(result.normalized, "Hi ");
        assert_eq!(info.original_length, 4);
        assert_eq!(info.normalized_length, 3);
        assert_eq!(info.removed_characters, 1);
        // Two dropped marks and one lower-cased letter
        assert_eq!(info.changes_count, 3);
    }

    #[test]
    fn test_changes_count_survives_collapsed_runs() {
        // Positions shift after the first collapsed run, but only the
        // dropped characters count as changes
        let result = TextNormalizer::default().normalize_with_result("Ab!!!?cd efg");
        assert_eq!(result.normalized, "Ab cd efg");
        assert_eq!(get_normalization_info(&result).changes_count, 4);
    }

    #[test]
    fn test_no_normalization_needed() {
        let text = "Already clean. Nothing to do.";
        let result = TextNormalizer::default().normalize_with_result(text);
        assert_eq!(result.normalized, text);
        assert_eq!(get_normalization_info(&result).changes_count, 0);
    }

    #[test]
    fn test_policy_serde_names() {
        let policy: BoundaryPolicy = serde_json::from_str("\"source_text\"").unwrap();
        assert_eq!(policy, BoundaryPolicy::SourceText);
        assert_eq!(
            serde_json::to_string(&BoundaryPolicy::FilteredText).unwrap(),
            "\"filtered_text\""
        );
    }
}
