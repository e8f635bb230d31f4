//! Derived document statistics.
//!
//! Recomputed synchronously from the plain-text projection on every engine
//! update; a stats record never outlives the update that produced it.

use serde::Serialize;

/// Words-per-minute figure used for the reading-time estimate.
pub const READING_WORDS_PER_MINUTE: usize = 200;

/// Value object of counts derived from the current document text.
///
/// Wholly derived: recomputed and replaced on every update, never mutated
/// in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EditorStats {
    pub characters: usize,
    pub characters_without_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_time_minutes: usize,
}

impl EditorStats {
    /// Compute all counts from a plain-text projection.
    ///
    /// Sentence boundaries are runs of `.`, `!`, or `?`; paragraphs are
    /// non-empty segments separated by blank lines. Reading time rounds up.
    pub fn from_text(text: &str) -> Self {
        let characters = text.chars().count();
        let characters_without_spaces =
            text.chars().filter(|ch| !ch.is_whitespace()).count();
        let words = text.split_whitespace().count();
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|segment| !segment.trim().is_empty())
            .count();
        let paragraphs = count_paragraphs(text);
        let reading_time_minutes = words.div_ceil(READING_WORDS_PER_MINUTE);
        Self {
            characters,
            characters_without_spaces,
            words,
            sentences,
            paragraphs,
            reading_time_minutes,
        }
    }
}

/// Count non-empty segments separated by blank lines.
///
/// A blank line is any line containing only whitespace. Lines belonging to
/// the same run of non-blank lines form one paragraph.
fn count_paragraphs(text: &str) -> usize {
    let mut paragraphs = 0usize;
    let mut in_paragraph = false;
    for line in text.lines() {
        if line.trim().is_empty() {
            in_paragraph = false;
        } else if !in_paragraph {
            paragraphs += 1;
            in_paragraph = true;
        }
    }
    paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_all_zeroes() {
        let stats = EditorStats::from_text("");
        assert_eq!(stats, EditorStats::default());
    }

    #[test]
    fn counts_for_short_sample() {
        let stats = EditorStats::from_text("Hello world. Bye!");
        assert_eq!(stats.characters, 17);
        assert_eq!(stats.characters_without_spaces, 15);
        assert_eq!(stats.words, 3);
        assert_eq!(stats.sentences, 2);
        assert_eq!(stats.paragraphs, 1);
        assert_eq!(stats.reading_time_minutes, 1);
    }

    #[test]
    fn sentence_split_collapses_punctuation_runs() {
        let stats = EditorStats::from_text("Wait... really?! Yes.");
        assert_eq!(stats.sentences, 3);
    }

    #[test]
    fn paragraphs_split_on_blank_lines_only() {
        let stats = EditorStats::from_text("one\ntwo\n\nthree\n\n   \n\nfour");
        assert_eq!(stats.paragraphs, 3);
    }

    #[test]
    fn reading_time_rounds_up() {
        let exactly_two = vec!["word"; 400].join(" ");
        assert_eq!(EditorStats::from_text(&exactly_two).reading_time_minutes, 2);

        let just_over = vec!["word"; 401].join(" ");
        assert_eq!(EditorStats::from_text(&just_over).reading_time_minutes, 3);
    }

    #[test]
    fn whitespace_only_text_has_no_words() {
        let stats = EditorStats::from_text("   \n\t  ");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.reading_time_minutes, 0);
        assert_eq!(stats.paragraphs, 0);
    }
}
