/// Telegram rejects messages longer than this many characters.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Greedy paragraph packing. A paragraph is never split; one that alone
/// exceeds `max_size` goes out as a single oversized chunk. Sizes count
/// characters, not bytes.
pub fn chunk(text: &str, max_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_len = 0;

    for paragraph in text.split(PARAGRAPH_SEPARATOR) {
        let paragraph_len = paragraph.chars().count();
        if buffer_len + paragraph_len + PARAGRAPH_SEPARATOR.len() > max_size {
            flush(&mut chunks, &buffer);
            buffer.clear();
            buffer_len = 0;
        }
        buffer.push_str(PARAGRAPH_SEPARATOR);
        buffer.push_str(paragraph);
        buffer_len += paragraph_len + PARAGRAPH_SEPARATOR.len();
    }
    flush(&mut chunks, &buffer);

    chunks
}

fn flush(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
