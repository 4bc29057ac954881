//! Simplified whole-word tokenizer.
//!
//! Splits on literal spaces and looks each word up verbatim; there is no
//! punctuation handling and no sub-word splitting. Out-of-vocabulary words
//! become `[UNK]`.

use crate::vocab::Vocab;

pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";
pub const UNK_TOKEN: &str = "[UNK]";
pub const PAD_TOKEN: &str = "[PAD]";

/// Must match the sequence length the model was exported with.
pub const DEFAULT_MAX_LENGTH: usize = 128;

#[derive(Debug, Clone)]
pub struct Encoding {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

pub struct WordTokenizer {
    vocab: Vocab,
    max_length: usize,
}

impl WordTokenizer {
    pub fn new(vocab: Vocab, max_length: usize) -> Self {
        Self { vocab, max_length }
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Encode `text` into fixed-length id/mask/segment sequences.
    ///
    /// The token list is `[CLS]`, one entry per space-split word, `[SEP]`,
    /// truncated to `max_length`. When the input has more than
    /// `max_length - 2` words the separator falls off the end; that is the
    /// model's exported behavior and is kept as is. Segment ids are always 0
    /// (single-segment classification).
    pub fn encode(&self, text: &str) -> Encoding {
        let mut tokens: Vec<&str> = Vec::with_capacity(self.max_length);
        tokens.push(CLS_TOKEN);
        for word in text.split(' ') {
            if self.vocab.contains(word) {
                tokens.push(word);
            } else {
                tokens.push(UNK_TOKEN);
            }
        }
        tokens.push(SEP_TOKEN);
        tokens.truncate(self.max_length);

        tracing::debug!("tokens: {:?}", tokens);

        let pad_id = self.vocab.id(PAD_TOKEN).unwrap_or(0);
        let unk_id = self.vocab.id(UNK_TOKEN).unwrap_or(0);

        let mut input_ids = vec![pad_id; self.max_length];
        let mut attention_mask = vec![0i64; self.max_length];
        let token_type_ids = vec![0i64; self.max_length];

        for (i, token) in tokens.iter().enumerate() {
            input_ids[i] = self.vocab.id(token).unwrap_or(unk_id);
            attention_mask[i] = 1;
        }

        Encoding {
            input_ids,
            attention_mask,
            token_type_ids,
        }
    }
}
