use async_trait::async_trait;

use crate::error::Result;

/// A generative text service that turns a prompt into free-form text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String>;
}
