//! Transfer workflow controller
//!
//! Single-screen form moving value from one record to another. Requests
//! that could never succeed (missing ids, same source and destination,
//! amount below the minimum) are rejected locally with no network call.
//! The transfer itself is atomic from the client's perspective; partial
//! application is the backend's responsibility.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::controller::view::guarded;
use crate::controller::{Notification, Severity};
use crate::error::AdminError;
use crate::model::TransferRequest;
use crate::repo::BeneficioRepository;

/// Editable transfer form state
#[derive(Debug, Clone, Default)]
pub struct TransferForm {
    /// Source record id
    pub from_id: Option<i64>,
    /// Destination record id
    pub to_id: Option<i64>,
    /// Amount to move
    pub amount: f64,
}

/// Controller driving the transfer screen
pub struct TransferController {
    repo: BeneficioRepository,
    form: TransferForm,
    open: bool,
    submitting: bool,
    notification: Option<Notification>,
    notification_ttl: Duration,
    cancel: CancellationToken,
}

impl TransferController {
    /// Create a controller with the transfer screen closed
    pub fn new(repo: BeneficioRepository, notification_ttl: Duration) -> Self {
        Self {
            repo,
            form: TransferForm::default(),
            open: false,
            submitting: false,
            notification: None,
            notification_ttl,
            cancel: CancellationToken::new(),
        }
    }

    /// Open the transfer screen with a reset form, optionally prefilled
    /// with a source record (row action on the list screen)
    pub fn open(&mut self, from_id: Option<i64>) {
        self.form = TransferForm {
            from_id,
            ..TransferForm::default()
        };
        self.open = true;
    }

    /// Close the transfer screen, discarding the form
    pub fn close(&mut self) {
        self.form = TransferForm::default();
        self.open = false;
    }

    /// Whether the transfer screen is showing
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a submit is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Form state
    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    /// Mutable form state, for wiring input fields
    pub fn form_mut(&mut self) -> &mut TransferForm {
        &mut self.form
    }

    /// Current notification, unless it has already expired
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired())
    }

    /// Cancel all pending backend work for this screen
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Submit the transfer. Returns `true` when it succeeded, signalling
    /// the caller that the benefit list must be reloaded (balances may
    /// have changed). On failure the form stays open for correction.
    pub async fn submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }

        let (from_id, to_id) = match (self.form.from_id, self.form.to_id) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                self.notify(
                    "Informe os benefícios de origem e destino.".to_string(),
                    Severity::Error,
                );
                return false;
            }
        };
        let request = TransferRequest::new(from_id, to_id, self.form.amount);
        if let Err(err) = request.validate() {
            self.notify(
                format!("Erro na transferência: {}", err.detail()),
                Severity::Error,
            );
            return false;
        }

        self.submitting = true;
        let result = guarded(&self.cancel, self.repo.transfer(&request)).await;
        self.submitting = false;
        match result {
            Ok(()) => {
                self.close();
                self.notify(
                    "Transferência realizada com sucesso!".to_string(),
                    Severity::Success,
                );
                true
            }
            Err(AdminError::Cancelled) => false,
            Err(err) => {
                warn!(from_id, to_id, error = %err, "transfer failed");
                self.notify(
                    format!("Erro na transferência: {}", err.detail()),
                    Severity::Error,
                );
                false
            }
        }
    }

    fn notify(&mut self, message: String, severity: Severity) {
        self.notification = Some(Notification::new(message, severity, self.notification_ttl));
    }
}

impl Drop for TransferController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use std::sync::Arc;

    fn controller_with(mock: Arc<MockTransport>) -> TransferController {
        TransferController::new(
            BeneficioRepository::new(mock),
            Duration::from_secs(3),
        )
    }

    #[tokio::test]
    async fn test_missing_ids_rejected_locally() {
        let mock = Arc::new(MockTransport::new());
        let mut c = controller_with(mock.clone());
        c.open(None);
        c.form_mut().amount = 50.0;

        assert!(!c.submit().await);
        assert_eq!(mock.call_count(), 0);
        assert!(c.is_open());
        assert_eq!(c.notification().unwrap().severity, Severity::Error);
    }

    #[tokio::test]
    async fn test_same_source_and_destination_rejected_locally() {
        let mock = Arc::new(MockTransport::new());
        let mut c = controller_with(mock.clone());
        c.open(Some(1));
        c.form_mut().to_id = Some(1);
        c.form_mut().amount = 50.0;

        assert!(!c.submit().await);
        assert_eq!(mock.call_count(), 0);
        assert!(c.is_open());
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected_locally() {
        let mock = Arc::new(MockTransport::new());
        let mut c = controller_with(mock.clone());
        c.open(Some(1));
        c.form_mut().to_id = Some(2);
        c.form_mut().amount = 0.0;

        assert!(!c.submit().await);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_transfer_closes_screen() {
        let mock = Arc::new(MockTransport::new());
        mock.push_empty(204);
        let mut c = controller_with(mock.clone());
        c.open(Some(1));
        c.form_mut().to_id = Some(2);
        c.form_mut().amount = 50.0;

        assert!(c.submit().await);
        assert!(!c.is_open());
        assert_eq!(c.notification().unwrap().severity, Severity::Success);
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].path, "transfer");
    }

    #[tokio::test]
    async fn test_failed_transfer_keeps_form_open() {
        let mock = Arc::new(MockTransport::new());
        mock.push_err(AdminError::Validation("Saldo insuficiente".to_string()));
        let mut c = controller_with(mock);
        c.open(Some(1));
        c.form_mut().to_id = Some(2);
        c.form_mut().amount = 500.0;

        assert!(!c.submit().await);
        assert!(c.is_open());
        let n = c.notification().unwrap();
        assert_eq!(n.severity, Severity::Error);
        assert!(n.message.contains("Saldo insuficiente"));
    }
}
