use async_trait::async_trait;

/// Host capability that yields the current raw receipt for this
/// installation, or `None` if there is none.
#[async_trait]
pub trait ReceiptSource: Send + Sync {
    async fn load_receipt(&self) -> Option<Vec<u8>>;
}
