mod anthropic;
mod traits;

pub use anthropic::{AnthropicClient, DEFAULT_MODEL};
pub use traits::{ClientError, ModelClient};
