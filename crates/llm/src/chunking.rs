/// Words per chunk that keeps BART-style models within their input window
pub const DEFAULT_WORDS_PER_CHUNK: usize = 800;

/// Split text into consecutive chunks of at most `words_per_chunk` words
///
/// Words are runs of non-whitespace, rejoined with single spaces. Empty text
/// yields no chunks. A chunk size of zero is treated as one.
pub fn chunk_words(text: &str, words_per_chunk: usize) -> Vec<String> {
    let words_per_chunk = words_per_chunk.max(1);
    let words: Vec<&str> = text.split_whitespace().collect();

    words
        .chunks(words_per_chunk)
        .map(|group| group.join(" "))
        .collect()
}
