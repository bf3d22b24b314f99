//! # beneficios-admin - Administrative client for beneficio records
//!
//! A typed, async client for managing "benefício" (benefit) records over a
//! REST backend: listing, creating, editing, deleting, and transferring
//! value between records.
//!
//! ## Architecture
//!
//! - **Transport**: wraps HTTP verbs against a configured base URL
//! - **Repository façade**: stateless typed operations, one HTTP call each
//! - **Controllers**: screen-owned view state (list/form state machine,
//!   transfer workflow) with local validation, busy-flag re-entrancy
//!   guards, transient notifications, and cancellation on teardown
//!
//! ## Quick Start
//!
//! ```no_run
//! use beneficios_admin::config::ClientConfig;
//! use beneficios_admin::controller::BeneficioController;
//! use beneficios_admin::repo::BeneficioRepository;
//! use beneficios_admin::transport::HttpTransport;
//! use std::sync::Arc;
//!
//! # async fn demo() -> beneficios_admin::error::Result<()> {
//! let config = ClientConfig::new("http://localhost:8080/api/v1/beneficios");
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let repo = BeneficioRepository::new(transport);
//!
//! let mut screen = BeneficioController::new(repo, config.notification_ttl);
//! screen.load_list().await;
//! for beneficio in screen.filtered() {
//!     println!("{}: {}", beneficio.nome, beneficio.valor);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Transfers
//!
//! ```no_run
//! use beneficios_admin::prelude::*;
//!
//! # async fn demo(repo: BeneficioRepository) {
//! let mut transfer = TransferController::new(repo, std::time::Duration::from_secs(3));
//! transfer.open(Some(1));
//! transfer.form_mut().to_id = Some(2);
//! transfer.form_mut().amount = 50.0;
//! if transfer.submit().await {
//!     // balances changed, reload the list
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod repo;
pub mod transport;

// Re-export commonly used types
pub use config::ClientConfig;
pub use controller::{BeneficioController, Screen, TransferController};
pub use error::{AdminError, Result};
pub use model::{Beneficio, TransferRequest};
pub use repo::BeneficioRepository;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use beneficios_admin::prelude::*;
    //! ```

    pub use crate::config::ClientConfig;
    pub use crate::controller::{
        AutoConfirm, BeneficioController, ConfirmGate, Notification, Screen, Severity,
        TransferController,
    };
    pub use crate::error::{AdminError, Result};
    pub use crate::model::{Beneficio, TransferRequest};
    pub use crate::repo::BeneficioRepository;
    pub use crate::transport::{HttpTransport, Transport};
}
