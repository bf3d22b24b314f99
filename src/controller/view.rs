//! Form/list view-state controller
//!
//! State machine over two screens, `List` and `Form`:
//!
//! ```text
//!            new (reset defaults)
//!   List  ------------------------>  Form
//!         <------------------------
//!           submit ok / cancel / edit-fetch failure
//! ```
//!
//! The controller exclusively owns the loaded list, the selection and the
//! form. Every backend call races the controller's cancellation token, so
//! tearing the screen down cancels all pending work. Busy flags
//! (`loading_list`, `loading_form`, `saving`) double as re-entrancy
//! guards: a second submit or reload while one is in flight is a no-op.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::controller::{ConfirmGate, Notification, Severity};
use crate::error::{AdminError, Result};
use crate::model::Beneficio;
use crate::repo::BeneficioRepository;

/// Active screen of the CRUD workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Table of loaded records
    List,
    /// Create/edit form
    Form,
}

/// Per-field validation messages, set when a submit is rejected locally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Error on the nome field
    pub nome: Option<&'static str>,
    /// Error on the valor field
    pub valor: Option<&'static str>,
}

impl FieldErrors {
    /// Whether every field passed validation
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.valor.is_none()
    }
}

/// Editable form state backing the create/edit screen
#[derive(Debug, Clone)]
pub struct BeneficioForm {
    /// Record id; `None` while creating
    pub id: Option<i64>,
    /// Name input
    pub nome: String,
    /// Description input
    pub descricao: String,
    /// Value input
    pub valor: f64,
    /// Active flag, kept only when the backend variant uses it
    pub ativo: Option<bool>,
    /// Version token carried through from the loaded record
    pub version: Option<i64>,
    /// Set when a rejected submit marked all fields touched
    pub touched: bool,
}

impl Default for BeneficioForm {
    fn default() -> Self {
        Self {
            id: None,
            nome: String::new(),
            descricao: String::new(),
            valor: 0.0,
            ativo: Some(true),
            version: None,
            touched: false,
        }
    }
}

impl BeneficioForm {
    /// Populate the form from a loaded record
    pub fn from_record(record: &Beneficio) -> Self {
        Self {
            id: record.id,
            nome: record.nome.clone(),
            descricao: record.descricao.clone().unwrap_or_default(),
            valor: record.valor,
            ativo: record.ativo,
            version: record.version,
            touched: false,
        }
    }

    /// Local validation: required fields and valor >= 0
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if self.nome.trim().is_empty() {
            errors.nome = Some("nome é obrigatório");
        }
        if !self.valor.is_finite() || self.valor < 0.0 {
            errors.valor = Some("valor deve ser maior ou igual a zero");
        }
        errors
    }

    /// Build the wire record submitted to the backend
    pub fn to_record(&self) -> Beneficio {
        Beneficio {
            id: self.id,
            nome: self.nome.trim().to_string(),
            descricao: if self.descricao.trim().is_empty() {
                None
            } else {
                Some(self.descricao.trim().to_string())
            },
            valor: self.valor,
            ativo: self.ativo,
            version: self.version,
        }
    }
}

/// Controller driving the list and the create/edit form
pub struct BeneficioController {
    repo: BeneficioRepository,
    screen: Screen,
    beneficios: Vec<Beneficio>,
    selected: Option<Beneficio>,
    form: BeneficioForm,
    field_errors: FieldErrors,
    filter: String,
    loading_list: bool,
    loading_form: bool,
    saving: bool,
    notification: Option<Notification>,
    notification_ttl: Duration,
    cancel: CancellationToken,
}

impl BeneficioController {
    /// Create a controller in its initial state: list screen, empty list
    pub fn new(repo: BeneficioRepository, notification_ttl: Duration) -> Self {
        Self {
            repo,
            screen: Screen::List,
            beneficios: Vec::new(),
            selected: None,
            form: BeneficioForm::default(),
            field_errors: FieldErrors::default(),
            filter: String::new(),
            loading_list: false,
            loading_form: false,
            saving: false,
            notification: None,
            notification_ttl,
            cancel: CancellationToken::new(),
        }
    }

    /// Active screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Loaded list, in backend order
    pub fn beneficios(&self) -> &[Beneficio] {
        &self.beneficios
    }

    /// Currently selected record, if editing an existing one
    pub fn selected(&self) -> Option<&Beneficio> {
        self.selected.as_ref()
    }

    /// Form state
    pub fn form(&self) -> &BeneficioForm {
        &self.form
    }

    /// Mutable form state, for wiring input fields
    pub fn form_mut(&mut self) -> &mut BeneficioForm {
        &mut self.form
    }

    /// Field errors from the last locally rejected submit
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Whether a list reload is in flight
    pub fn is_loading_list(&self) -> bool {
        self.loading_list
    }

    /// Whether an edit-entry fetch is in flight
    pub fn is_loading_form(&self) -> bool {
        self.loading_form
    }

    /// Whether a submit is in flight
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Current notification, unless it has already expired
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| !n.is_expired())
    }

    /// Cancel all pending backend work for this screen
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Reload the full list from the backend.
    ///
    /// No-op while a reload is already in flight.
    pub async fn load_list(&mut self) {
        if self.loading_list {
            return;
        }
        self.loading_list = true;
        let result = guarded(&self.cancel, self.repo.list()).await;
        self.loading_list = false;
        match result {
            Ok(records) => self.beneficios = records,
            Err(AdminError::Cancelled) => {}
            Err(err) => {
                warn!(error = %err, "list reload failed");
                self.notify(
                    "Erro ao carregar lista de benefícios.".to_string(),
                    Severity::Error,
                );
            }
        }
    }

    /// Set the client-side filter term; never re-fetches
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    /// Clear the filter term
    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    /// Current filter term
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Records matching the current filter, preserving backend order
    pub fn filtered(&self) -> Vec<&Beneficio> {
        self.beneficios
            .iter()
            .filter(|b| b.matches_filter(&self.filter))
            .collect()
    }

    /// Enter the form screen with defaults for a new record
    pub fn show_create_form(&mut self) {
        self.selected = None;
        self.form = BeneficioForm::default();
        self.field_errors = FieldErrors::default();
        self.screen = Screen::Form;
    }

    /// Enter the form screen for an existing record, fetching fresh data
    /// by id. A failed fetch reverts to the list screen with an error
    /// notification.
    pub async fn edit(&mut self, id: i64) {
        if self.loading_form {
            return;
        }
        self.loading_form = true;
        self.screen = Screen::Form;
        let result = guarded(&self.cancel, self.repo.get(id)).await;
        self.loading_form = false;
        match result {
            Ok(record) => {
                self.form = BeneficioForm::from_record(&record);
                self.field_errors = FieldErrors::default();
                self.selected = Some(record);
            }
            Err(AdminError::Cancelled) => {}
            Err(err) => {
                warn!(id, error = %err, "edit-entry fetch failed");
                self.screen = Screen::List;
                self.notify(
                    "Erro ao carregar dados do benefício.".to_string(),
                    Severity::Error,
                );
            }
        }
    }

    /// Submit the form: create when the record has no id, update (with
    /// the version token forwarded) when it does.
    ///
    /// Local validation failures mark all fields touched and never reach
    /// the network. Re-entrant submits while one is in flight are no-ops.
    pub async fn submit(&mut self) {
        if self.saving || self.loading_form {
            return;
        }

        let errors = self.form.validate();
        if !errors.is_empty() {
            self.form.touched = true;
            self.field_errors = errors;
            return;
        }
        self.field_errors = FieldErrors::default();

        self.saving = true;
        let record = self.form.to_record();
        let result = match self.form.id {
            Some(id) => guarded(&self.cancel, self.repo.update(id, &record)).await,
            None => guarded(&self.cancel, self.repo.create(&record)).await,
        };
        match result {
            Ok(_) => {
                self.saving = false;
                self.notify("Benefício salvo com sucesso!".to_string(), Severity::Success);
                self.screen = Screen::List;
                self.selected = None;
                self.form = BeneficioForm::default();
                self.load_list().await;
            }
            Err(AdminError::Cancelled) => {}
            Err(err) => {
                warn!(error = %err, "submit failed");
                self.saving = false;
                self.notify(format!("Erro ao salvar: {}", err.detail()), Severity::Error);
            }
        }
    }

    /// Leave the form without saving
    pub fn cancel_edit(&mut self) {
        self.form = BeneficioForm::default();
        self.field_errors = FieldErrors::default();
        self.selected = None;
        self.screen = Screen::List;
    }

    /// Delete a record after the gate approves. On success the list is
    /// reloaded; if the deleted record was selected, the form and
    /// selection are cleared.
    pub async fn delete(&mut self, id: i64, gate: &dyn ConfirmGate) {
        let nome = self
            .beneficios
            .iter()
            .find(|b| b.id == Some(id))
            .map(|b| b.nome.clone())
            .unwrap_or_else(|| format!("id {id}"));
        let prompt = format!("Tem certeza de que deseja remover \"{nome}\"?");
        if !gate.confirm(&prompt).await {
            return;
        }

        let result = guarded(&self.cancel, self.repo.delete(id)).await;
        match result {
            Ok(()) => {
                self.notify("Benefício removido.".to_string(), Severity::Success);
                if self.form.id == Some(id) {
                    self.cancel_edit();
                }
                self.load_list().await;
            }
            Err(AdminError::Cancelled) => {}
            Err(err) => {
                warn!(id, error = %err, "delete failed");
                self.notify(format!("Erro ao excluir: {}", err.detail()), Severity::Error);
            }
        }
    }

    fn notify(&mut self, message: String, severity: Severity) {
        self.notification = Some(Notification::new(message, severity, self.notification_ttl));
    }
}

impl Drop for BeneficioController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Race a backend call against the screen's cancellation token
pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        // Teardown wins over a simultaneously ready response.
        biased;
        _ = cancel.cancelled() => Err(AdminError::Cancelled),
        result = fut => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn controller_with(mock: Arc<MockTransport>) -> BeneficioController {
        BeneficioController::new(
            BeneficioRepository::new(mock),
            Duration::from_secs(3),
        )
    }

    #[test]
    fn test_initial_state() {
        let c = controller_with(Arc::new(MockTransport::new()));
        assert_eq!(c.screen(), Screen::List);
        assert!(c.beneficios().is_empty());
        assert!(!c.is_loading_list());
        assert!(c.notification().is_none());
    }

    #[test]
    fn test_create_form_defaults() {
        let mut c = controller_with(Arc::new(MockTransport::new()));
        c.show_create_form();
        assert_eq!(c.screen(), Screen::Form);
        assert_eq!(c.form().valor, 0.0);
        assert_eq!(c.form().ativo, Some(true));
        assert!(c.form().id.is_none());
        assert!(c.selected().is_none());
    }

    #[tokio::test]
    async fn test_invalid_submit_never_hits_network() {
        let mock = Arc::new(MockTransport::new());
        let mut c = controller_with(mock.clone());
        c.show_create_form();
        c.form_mut().nome = String::new();
        c.submit().await;

        assert_eq!(mock.call_count(), 0);
        assert_eq!(c.screen(), Screen::Form);
        assert!(c.form().touched);
        assert!(c.field_errors().nome.is_some());
    }

    #[tokio::test]
    async fn test_negative_valor_rejected_locally() {
        let mock = Arc::new(MockTransport::new());
        let mut c = controller_with(mock.clone());
        c.show_create_form();
        c.form_mut().nome = "Vale".to_string();
        c.form_mut().valor = -1.0;
        c.submit().await;

        assert_eq!(mock.call_count(), 0);
        assert!(c.field_errors().valor.is_some());
    }

    #[tokio::test]
    async fn test_filter_does_not_refetch() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(
            200,
            json!([
                { "id": 1, "nome": "Vale Refeição", "valor": 100.0 },
                { "id": 2, "nome": "Auxílio", "descricao": "creche", "valor": 50.0 }
            ]),
        );
        let mut c = controller_with(mock.clone());
        c.load_list().await;
        assert_eq!(mock.call_count(), 1);

        c.set_filter("VALE");
        assert_eq!(c.filtered().len(), 1);
        c.set_filter("creche");
        assert_eq!(c.filtered().len(), 1);
        c.clear_filter();
        assert_eq!(c.filtered().len(), 2);
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_work() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, json!([{ "id": 1, "nome": "Vale", "valor": 1.0 }]));
        let mut c = controller_with(mock);
        c.teardown();
        c.load_list().await;

        // The cancelled reload must not mutate the list or raise an error.
        assert!(c.beneficios().is_empty());
        assert!(c.notification().is_none());
        assert!(!c.is_loading_list());
    }
}
