use serde::{Deserialize, Serialize};

/// Codec policy knobs applied by callers of the codec.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodecConfig {
    /// Reject messages whose header counts disagree with their entry lists
    /// instead of deriving the counts from the lists.
    #[serde(default)]
    pub strict_counts: bool,

    /// Largest message, in bytes, handed to the decoder.
    #[serde(default = "default_max_message_size")]
    pub max_message_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_counts: false,
            max_message_size: default_max_message_size(),
        }
    }
}

fn default_max_message_size() -> usize {
    512
}
