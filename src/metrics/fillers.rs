use crate::models::FillerCounts;

/// Default filler vocabulary, in scan order
pub const DEFAULT_FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "basically",
    "actually",
    "literally",
    "so",
    "well",
    "right",
    "okay",
    "hmm",
];

/// Tally filler words in a transcript.
///
/// The transcript is lower-cased and split on whitespace. Single-word entries
/// count exact token matches, so "um," does not count as "um". Multi-word
/// entries such as "you know" count non-overlapping runs of consecutive
/// tokens. Results keep vocabulary order and omit fillers that never occur.
pub fn count_fillers(transcript: &str, filler_words: &[String]) -> FillerCounts {
    let lowered = transcript.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    let mut counts = FillerCounts::new();
    for filler in filler_words {
        let phrase: Vec<&str> = filler.split_whitespace().collect();
        counts.add(filler, count_phrase(&tokens, &phrase));
    }
    counts
}

/// Count non-overlapping occurrences of `phrase` as a contiguous token run
fn count_phrase(tokens: &[&str], phrase: &[&str]) -> u32 {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return 0;
    }

    let mut count = 0;
    let mut i = 0;
    while i + phrase.len() <= tokens.len() {
        if tokens[i..i + phrase.len()] == *phrase {
            count += 1;
            i += phrase.len();
        } else {
            i += 1;
        }
    }
    count
}
