use tokio::sync::mpsc;

/// Discrete states a purchase or restore transaction moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    /// The transaction was just initiated and is being processed.
    Initiated,
    /// The transaction completed successfully.
    Complete,
    /// The customer cancelled the transaction.
    Cancelled,
    /// The transaction failed.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseFlow {
    Purchase,
    Restore,
}

/// A status update emitted by the purchase flow glue.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseStatus {
    pub state: PurchaseState,
    pub flow: PurchaseFlow,
    /// Set if the update was caused by an error.
    pub error: Option<String>,
    /// A user friendly message for the update.
    pub message: String,
    /// Identifier of the platform transaction this update belongs to, if the
    /// platform assigned one.
    pub transaction_ref: Option<String>,
}

impl PurchaseStatus {
    pub fn new(state: PurchaseState, flow: PurchaseFlow, message: impl Into<String>) -> Self {
        Self {
            state,
            flow,
            error: None,
            message: message.into(),
            transaction_ref: None,
        }
    }

    pub fn failed(flow: PurchaseFlow, error: impl ToString, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(PurchaseState::Failed, flow, message)
        }
    }

    pub fn with_transaction_ref(mut self, transaction_ref: impl Into<String>) -> Self {
        self.transaction_ref = Some(transaction_ref.into());
        self
    }

    /// Complete, cancelled and failed updates end a transaction.
    pub fn is_final(&self) -> bool {
        self.state != PurchaseState::Initiated
    }
}

/// Creates a single-consumer channel for purchase status updates.
pub fn purchase_status_channel() -> (PurchaseStatusSender, PurchaseStatusReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PurchaseStatusSender { tx }, PurchaseStatusReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct PurchaseStatusSender {
    tx: mpsc::UnboundedSender<PurchaseStatus>,
}

impl PurchaseStatusSender {
    /// Publishes an update. Returns `false` once the receiver is gone.
    pub fn send(&self, status: PurchaseStatus) -> bool {
        match self.tx.send(status) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(status = ?e.0, "Purchase status receiver dropped.");
                false
            }
        }
    }
}

#[derive(Debug)]
pub struct PurchaseStatusReceiver {
    rx: mpsc::UnboundedReceiver<PurchaseStatus>,
}

impl PurchaseStatusReceiver {
    /// Waits for the next update. Returns `None` once every sender is gone.
    pub async fn recv(&mut self) -> Option<PurchaseStatus> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<PurchaseStatus> {
        self.rx.try_recv().ok()
    }
}
