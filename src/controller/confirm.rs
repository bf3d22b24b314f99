//! Confirmation gate for destructive actions
//!
//! Deletion requires an explicit yes/no decision before anything is
//! dispatched. The gate is injected into the delete flow so the decision
//! mechanism (terminal prompt, scripted answer in tests, a dialog in
//! some future shell) stays decoupled from the controller.

use async_trait::async_trait;
use tracing::warn;

/// A yes/no decision point guarding a destructive action
#[async_trait]
pub trait ConfirmGate: Send + Sync {
    /// Ask for confirmation; `true` means proceed
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that approves everything (used by `--yes`)
pub struct AutoConfirm;

#[async_trait]
impl ConfirmGate for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Gate that declines everything (useful in tests)
pub struct DenyAll;

#[async_trait]
impl ConfirmGate for DenyAll {
    async fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}

/// Interactive gate reading a y/n answer from the terminal
pub struct StdinConfirm;

#[async_trait]
impl ConfirmGate for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = format!("{prompt} [y/N] ");
        let answer = tokio::task::spawn_blocking(move || {
            let term = console::Term::stderr();
            if term.write_str(&prompt).is_err() {
                return None;
            }
            term.read_line().ok()
        })
        .await;

        match answer {
            Ok(Some(line)) => {
                let line = line.trim().to_lowercase();
                matches!(line.as_str(), "y" | "yes" | "s" | "sim")
            }
            _ => {
                warn!("could not read confirmation answer, declining");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auto_confirm_approves() {
        assert!(AutoConfirm.confirm("remover?").await);
    }

    #[tokio::test]
    async fn test_deny_all_declines() {
        assert!(!DenyAll.confirm("remover?").await);
    }
}
