//! beneficios-admin CLI - Administrative client for beneficio records
//!
//! Drives the admin screens from the command line: list, inspect, create,
//! update, delete, and transfer value between records.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use beneficios_admin::config::{CliArgs, ClientConfig, Commands};
use beneficios_admin::controller::{
    AutoConfirm, BeneficioController, ConfirmGate, Severity, StdinConfirm, TransferController,
};
use beneficios_admin::error::Result;
use beneficios_admin::model::Beneficio;
use beneficios_admin::repo::BeneficioRepository;
use beneficios_admin::transport::HttpTransport;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    match run(args).await {
        Ok(ok) => {
            if ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Run the selected subcommand. `Ok(false)` means the operation itself
/// failed and was already reported via a notification.
async fn run(args: CliArgs) -> Result<bool> {
    let config = ClientConfig::from_cli(&args)?;
    let transport = Arc::new(HttpTransport::new(&config)?);
    let repo = BeneficioRepository::new(transport);
    let quiet = args.quiet;

    match args.command {
        Commands::List { filter } => {
            let mut screen = BeneficioController::new(repo, config.notification_ttl);
            screen.load_list().await;
            if let Some(term) = filter {
                screen.set_filter(term);
            }
            let ok = report(screen.notification().map(|n| (n.severity, n.message.clone())), quiet);
            if ok {
                print_table(&screen.filtered());
            }
            Ok(ok)
        }

        Commands::Get { id } => {
            let beneficio = repo.get(id).await?;
            print_table(&[&beneficio]);
            Ok(true)
        }

        Commands::Create {
            nome,
            descricao,
            valor,
            inactive,
        } => {
            let mut screen = BeneficioController::new(repo, config.notification_ttl);
            screen.show_create_form();
            let form = screen.form_mut();
            form.nome = nome;
            form.descricao = descricao.unwrap_or_default();
            form.valor = valor;
            form.ativo = Some(!inactive);
            screen.submit().await;
            Ok(finish_form(&screen, quiet))
        }

        Commands::Update {
            id,
            nome,
            descricao,
            valor,
            inactive,
        } => {
            let mut screen = BeneficioController::new(repo, config.notification_ttl);
            // Fetch fresh data first so the current version token is forwarded.
            screen.edit(id).await;
            if let Some(n) = screen.notification() {
                if n.severity == Severity::Error {
                    eprintln!("{} {}", style("✗").red(), n.message);
                    return Ok(false);
                }
            }
            let form = screen.form_mut();
            form.nome = nome;
            if let Some(descricao) = descricao {
                form.descricao = descricao;
            }
            form.valor = valor;
            if inactive {
                form.ativo = Some(false);
            }
            screen.submit().await;
            Ok(finish_form(&screen, quiet))
        }

        Commands::Delete { id, yes } => {
            let gate: Box<dyn ConfirmGate> = if yes {
                Box::new(AutoConfirm)
            } else {
                Box::new(StdinConfirm)
            };
            let mut screen = BeneficioController::new(repo, config.notification_ttl);
            screen.load_list().await;
            screen.delete(id, gate.as_ref()).await;
            Ok(report(
                screen.notification().map(|n| (n.severity, n.message.clone())),
                quiet,
            ))
        }

        Commands::Transfer { from, to, amount } => {
            let mut transfer =
                TransferController::new(repo.clone(), config.notification_ttl);
            transfer.open(Some(from));
            transfer.form_mut().to_id = Some(to);
            transfer.form_mut().amount = amount;
            let succeeded = transfer.submit().await;
            let ok = report(
                transfer.notification().map(|n| (n.severity, n.message.clone())),
                quiet,
            );
            if succeeded {
                // Balances changed: reload and show the fresh list.
                let mut screen = BeneficioController::new(repo, config.notification_ttl);
                screen.load_list().await;
                print_table(&screen.filtered());
            }
            Ok(ok)
        }
    }
}

/// Print a form-screen outcome, including local field errors
fn finish_form(screen: &BeneficioController, quiet: bool) -> bool {
    let errors = screen.field_errors();
    if !errors.is_empty() {
        for message in [errors.nome, errors.valor].into_iter().flatten() {
            eprintln!("{} {}", style("✗").red(), message);
        }
        return false;
    }
    report(
        screen.notification().map(|n| (n.severity, n.message.clone())),
        quiet,
    )
}

/// Print the last notification; returns `false` for an error outcome
fn report(notification: Option<(Severity, String)>, quiet: bool) -> bool {
    match notification {
        Some((Severity::Error, message)) => {
            eprintln!("{} {}", style("✗").red(), message);
            false
        }
        Some((Severity::Success, message)) => {
            if !quiet {
                println!("{} {}", style("✓").green(), message);
            }
            true
        }
        None => true,
    }
}

fn print_table(records: &[&Beneficio]) {
    if records.is_empty() {
        println!("{}", style("(nenhum benefício)").dim());
        return;
    }
    println!(
        "{:>5}  {:<30} {:>12}  {:<6}  {}",
        style("ID").bold(),
        style("NOME").bold(),
        style("VALOR").bold(),
        style("ATIVO").bold(),
        style("DESCRIÇÃO").bold()
    );
    for b in records {
        let id = b.id.map(|id| id.to_string()).unwrap_or_default();
        let ativo = match b.ativo {
            Some(true) => "sim",
            Some(false) => "não",
            None => "-",
        };
        println!(
            "{:>5}  {:<30} {:>12.2}  {:<6}  {}",
            id,
            b.nome,
            b.valor,
            ativo,
            b.descricao.as_deref().unwrap_or("")
        );
    }
}
