//! Beneficio entity and transfer command models
//!
//! The backend exists in two variants: one carries an `ativo` flag, the
//! other an optimistic-concurrency `version` token. Both fields are
//! optional here and omitted from JSON when absent, so the client works
//! against either variant. `version` is forwarded verbatim on update and
//! never interpreted client-side.

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, Result};

/// Minimum amount accepted for a transfer.
pub const MIN_TRANSFER_AMOUNT: f64 = 0.01;

/// A named monetary allotment administered by this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficio {
    /// Identifier assigned by the backend; absent until persisted,
    /// immutable afterwards
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Name (required, non-empty)
    pub nome: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    /// Monetary value, never negative
    pub valor: f64,
    /// Active flag (present in one backend variant)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
    /// Optimistic-concurrency token, incremented server-side on each
    /// successful update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl Beneficio {
    /// Build a not-yet-persisted record with form defaults
    pub fn draft() -> Self {
        Self {
            id: None,
            nome: String::new(),
            descricao: None,
            valor: 0.0,
            ativo: Some(true),
            version: None,
        }
    }

    /// Whether this record has been persisted by the backend
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Case-insensitive substring match against nome and descricao.
    ///
    /// An empty term matches everything, mirroring a cleared filter box.
    pub fn matches_filter(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        if self.nome.to_lowercase().contains(&term) {
            return true;
        }
        self.descricao
            .as_deref()
            .map(|d| d.to_lowercase().contains(&term))
            .unwrap_or(false)
    }
}

/// Ephemeral command moving value between two records.
///
/// Constructed from form input, submitted once, discarded after the
/// response. Validation and execution are the backend's responsibility;
/// [`TransferRequest::validate`] only rejects requests that could never
/// succeed, before any network call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Source record id
    pub from_id: i64,
    /// Destination record id
    pub to_id: i64,
    /// Amount to move, at least [`MIN_TRANSFER_AMOUNT`]
    pub amount: f64,
}

impl TransferRequest {
    /// Create a transfer command
    pub fn new(from_id: i64, to_id: i64, amount: f64) -> Self {
        Self {
            from_id,
            to_id,
            amount,
        }
    }

    /// Local validation applied before dispatch
    pub fn validate(&self) -> Result<()> {
        if self.from_id == self.to_id {
            return Err(AdminError::Validation(
                "source and destination must differ".to_string(),
            ));
        }
        if !self.amount.is_finite() || self.amount < MIN_TRANSFER_AMOUNT {
            return Err(AdminError::Validation(format!(
                "amount must be at least {MIN_TRANSFER_AMOUNT}"
            )));
        }
        Ok(())
    }
}
