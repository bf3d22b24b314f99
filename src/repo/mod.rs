//! Repository façade for beneficio records
//!
//! Thin, stateless mapping from typed operations to single HTTP calls:
//!
//! | Op | Method | Path |
//! |----|--------|------|
//! | list | GET | `/` |
//! | get | GET | `/{id}` |
//! | create | POST | `/` |
//! | update | PUT | `/{id}` |
//! | delete | DELETE | `/{id}` |
//! | transfer | POST | `/transfer` |
//!
//! The façade owns no state, adds no retries and no caching; transport
//! failures propagate unchanged to the controllers.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{AdminError, Result};
use crate::model::{Beneficio, TransferRequest};
use crate::transport::{Method, Response, Transport};

/// Typed operations over the beneficio REST resource
#[derive(Clone)]
pub struct BeneficioRepository {
    transport: Arc<dyn Transport>,
}

impl BeneficioRepository {
    /// Create a façade over the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetch all records; display order is whatever the backend returns
    pub async fn list(&self) -> Result<Vec<Beneficio>> {
        debug!("listing beneficios");
        let response = self.transport.request(Method::Get, "", None).await?;
        decode(response)
    }

    /// Fetch one record by id; fails with `NotFound` if unknown
    pub async fn get(&self, id: i64) -> Result<Beneficio> {
        debug!(id, "fetching beneficio");
        let response = self
            .transport
            .request(Method::Get, &id.to_string(), None)
            .await?;
        decode(response)
    }

    /// Persist a new record; the backend assigns id (and version)
    pub async fn create(&self, beneficio: &Beneficio) -> Result<Beneficio> {
        debug!(nome = %beneficio.nome, "creating beneficio");
        let body = serde_json::to_value(beneficio)?;
        let response = self.transport.request(Method::Post, "", Some(body)).await?;
        decode(response)
    }

    /// Replace an existing record; fails with `Conflict` when the
    /// forwarded version token is stale
    pub async fn update(&self, id: i64, beneficio: &Beneficio) -> Result<Beneficio> {
        debug!(id, nome = %beneficio.nome, "updating beneficio");
        let body = serde_json::to_value(beneficio)?;
        let response = self
            .transport
            .request(Method::Put, &id.to_string(), Some(body))
            .await?;
        decode(response)
    }

    /// Remove a record; fails with `NotFound` if already deleted
    pub async fn delete(&self, id: i64) -> Result<()> {
        debug!(id, "deleting beneficio");
        self.transport
            .request(Method::Delete, &id.to_string(), None)
            .await?;
        Ok(())
    }

    /// Move value between two records; validated and executed server-side
    pub async fn transfer(&self, request: &TransferRequest) -> Result<()> {
        info!(
            from = request.from_id,
            to = request.to_id,
            amount = request.amount,
            "transfer requested"
        );
        let body = serde_json::to_value(request)?;
        self.transport
            .request(Method::Post, "transfer", Some(body))
            .await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body: Value = response
        .body
        .ok_or_else(|| AdminError::Decode("empty response body".to_string()))?;
    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn repo_with(mock: Arc<MockTransport>) -> BeneficioRepository {
        BeneficioRepository::new(mock)
    }

    #[tokio::test]
    async fn test_list_decodes_records() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(200, json!([{ "id": 1, "nome": "Vale", "valor": 100.0 }]));

        let repo = repo_with(mock.clone());
        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, Some(1));
        assert_eq!(records[0].nome, "Vale");
        assert_eq!(records[0].ativo, None);

        let calls = mock.calls();
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "");
    }

    #[tokio::test]
    async fn test_create_posts_without_id() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(201, json!({ "id": 5, "nome": "Novo", "valor": 10.0 }));

        let repo = repo_with(mock.clone());
        let draft = Beneficio {
            nome: "Novo".to_string(),
            valor: 10.0,
            ..Beneficio::draft()
        };
        let created = repo.create(&draft).await.unwrap();
        assert_eq!(created.id, Some(5));

        let call = &mock.calls()[0];
        assert_eq!(call.method, Method::Post);
        assert!(call.body.as_ref().unwrap().get("id").is_none());
    }

    #[tokio::test]
    async fn test_update_forwards_version() {
        let mock = Arc::new(MockTransport::new());
        mock.push_json(
            200,
            json!({ "id": 1, "nome": "Vale", "valor": 100.0, "version": 4 }),
        );

        let repo = repo_with(mock.clone());
        let record = Beneficio {
            id: Some(1),
            nome: "Vale".to_string(),
            descricao: None,
            valor: 100.0,
            ativo: None,
            version: Some(3),
        };
        let updated = repo.update(1, &record).await.unwrap();
        assert_eq!(updated.version, Some(4));

        let call = &mock.calls()[0];
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.path, "1");
        assert_eq!(call.body.as_ref().unwrap()["version"], 3);
    }

    #[tokio::test]
    async fn test_delete_maps_not_found() {
        let mock = Arc::new(MockTransport::new());
        mock.push_err(AdminError::not_found_id(9));

        let repo = repo_with(mock);
        let err = repo.delete(9).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_transfer_posts_command() {
        let mock = Arc::new(MockTransport::new());
        mock.push_empty(204);

        let repo = repo_with(mock.clone());
        repo.transfer(&TransferRequest::new(1, 2, 50.0))
            .await
            .unwrap();

        let call = &mock.calls()[0];
        assert_eq!(call.path, "transfer");
        assert_eq!(call.body.as_ref().unwrap()["fromId"], 1);
    }
}
