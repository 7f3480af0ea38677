//! Split narration text into request-sized chunks.
//!
//! The translate TTS endpoint refuses long inputs, so text is cut into
//! pieces of at most [`MAX_CHUNK_CHARS`] characters.  Cuts prefer
//! whitespace and punctuation; a run with no boundary (Thai is often written
//! without spaces) is hard-split on character boundaries.

/// Longest chunk, in characters, sent in one TTS request.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Characters after which a chunk may end.
fn is_boundary(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '.' | ',' | '!' | '?' | ';' | ':' | '…' | '、' | '。' | '，' | 'ฯ' | 'ๆ' | '๚' | '๛'
        )
}

/// Split `text` into trimmed, non-empty chunks of at most `max_chars`
/// characters each, preserving order.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in text.split_inclusive(is_boundary) {
        let piece_len = piece.chars().count();

        if current_len > 0 && current_len + piece_len > max_chars {
            push_chunk(&mut chunks, &current);
            current.clear();
            current_len = 0;
        }

        if piece_len > max_chars {
            let chars: Vec<char> = piece.chars().collect();
            for slice in chars.chunks(max_chars) {
                if slice.len() == max_chars {
                    push_chunk(&mut chunks, &slice.iter().collect::<String>());
                } else {
                    current = slice.iter().collect();
                    current_len = slice.len();
                }
            }
            continue;
        }

        current.push_str(piece);
        current_len += piece_len;
    }

    push_chunk(&mut chunks, &current);
    chunks
}

fn push_chunk(chunks: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
