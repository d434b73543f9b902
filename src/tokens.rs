use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

static ENCODER: OnceLock<Option<CoreBPE>> = OnceLock::new();

/// Approximate number of tokens `text` will cost in a request.
///
/// Uses the `o200k_base` encoding, or 4 characters per token if the encoder is
/// unavailable.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    let encoder = ENCODER.get_or_init(|| tiktoken_rs::o200k_base().ok());
    encoder.as_ref().map_or_else(
        || text.len() / 4,
        |bpe| bpe.encode_with_special_tokens(text).len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_costs_nothing() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn test_longer_text_costs_more() {
        let short = estimate_tokens("fn main() {}");
        let long = estimate_tokens(&"fn main() {}\n".repeat(50));
        assert!(short > 0);
        assert!(long > short * 10);
    }
}
