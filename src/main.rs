use clap::{Parser, Subcommand};
use gigorder::application::workflow::{OrderWorkflow, WorkflowState};
use gigorder::config::AppConfig;
use gigorder::domain::catalog::Catalog;
use gigorder::domain::order::{OrderPayload, OrderSummary};
use gigorder::error::OrderError;
use gigorder::infrastructure::log::LogNotifier;
use gigorder::infrastructure::simulated::SimulatedOrderService;
use gigorder::interfaces::csv::order_reader::OrderReader;
use gigorder::interfaces::csv::outcome_writer::{OrderOutcome, OutcomeStatus, OutcomeWriter};
use gigorder::interfaces::render;
use gigorder::logging;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Parser)]
#[command(author, version, about = "Quick ordering of mobile data packages", long_about = None)]
struct Cli {
    /// JSON configuration file (catalog and submission delay)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the simulated submission delay, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the packages and payment methods
    Catalog {
        /// Package to mark as highlighted
        #[arg(long)]
        highlight: Option<String>,
    },
    /// Place a single order
    Order {
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        package: String,
        #[arg(long, default_value = "")]
        payment: String,
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Place every order in a CSV file and print one outcome per row
    Batch {
        /// Orders CSV: phone_number,package,payment_method,email
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).into_diagnostic()?,
        None => AppConfig::default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.submission_delay_ms = delay_ms;
    }

    let catalog = Arc::new(config.catalog.clone());
    let service = SimulatedOrderService::new(config.submission_delay());

    match cli.command {
        Command::Catalog { highlight } => {
            if let Some(id) = &highlight
                && catalog.package(id).is_none()
            {
                let error = OrderError::Catalog(format!("unknown package '{id}'"));
                return Err(error).into_diagnostic();
            }
            let stdout = io::stdout();
            render::render_catalog(&mut stdout.lock(), &catalog, highlight.as_deref())
                .into_diagnostic()?;
        }
        Command::Order {
            phone,
            package,
            payment,
            email,
        } => {
            let payload = OrderPayload {
                phone_number: phone,
                package_id: package,
                payment_method_id: payment,
                email,
            };
            let mut workflow = new_workflow(&catalog, &service, payload);
            let summary = workflow.summary();
            if let Some(summary) = &summary {
                render::render_summary(&mut io::stderr().lock(), summary).into_diagnostic()?;
            }
            let progress = tokio::spawn(report_progress(workflow.state_watch(), summary));
            let result = workflow.submit().await;
            drop(workflow);
            progress.await.into_diagnostic()?;

            match result {
                Ok(confirmation) => {
                    let notification = confirmation.notification();
                    println!("{}", notification.title);
                    println!("{}", notification.description);
                    println!("{}", confirmation.confirmation_id);
                }
                Err(OrderError::Validation(errors)) => {
                    for (field, message) in errors.iter() {
                        eprintln!("{field}: {message}");
                    }
                    miette::bail!("order form has {} invalid field(s)", errors.len());
                }
                Err(e) => return Err(e).into_diagnostic(),
            }
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let orders = OrderReader::new(file).orders().into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = OutcomeWriter::new(stdout.lock());

            for (index, order_result) in orders.enumerate() {
                let row = index + 1;
                let payload = match order_result {
                    Ok(payload) => payload,
                    Err(e) => {
                        eprintln!("Error reading order {row}: {e}");
                        continue;
                    }
                };
                let outcome = place(&catalog, &service, row, payload).await;
                writer.write_outcome(&outcome).into_diagnostic()?;
            }
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}

/// Prints the submit button label whenever the workflow enters `Submitting`.
/// Ends once the workflow is dropped.
async fn report_progress(
    mut states: watch::Receiver<WorkflowState>,
    mut summary: Option<OrderSummary>,
) {
    while states.changed().await.is_ok() {
        let state = *states.borrow_and_update();
        if let Some(summary) = summary.as_mut() {
            summary.track(state);
            if state == WorkflowState::Submitting {
                eprintln!("{}", summary.submit_label());
            }
        }
    }
}

fn new_workflow(
    catalog: &Arc<Catalog>,
    service: &SimulatedOrderService,
    payload: OrderPayload,
) -> OrderWorkflow {
    let mut workflow = OrderWorkflow::new(
        Arc::clone(catalog),
        Box::new(service.clone()),
        Box::new(LogNotifier),
    );
    workflow.set_phone_number(payload.phone_number);
    workflow.select_package(payload.package_id);
    workflow.select_payment_method(payload.payment_method_id);
    workflow.set_email(payload.email);
    workflow
}

async fn place(
    catalog: &Arc<Catalog>,
    service: &SimulatedOrderService,
    row: usize,
    payload: OrderPayload,
) -> OrderOutcome {
    let mut workflow = new_workflow(catalog, service, payload);
    let (status, confirmation_id, message) = match workflow.submit().await {
        Ok(confirmation) => (
            OutcomeStatus::Ok,
            confirmation.confirmation_id.clone(),
            confirmation.message(),
        ),
        Err(OrderError::Validation(errors)) => {
            (OutcomeStatus::Invalid, String::new(), errors.to_string())
        }
        Err(e) => (OutcomeStatus::Failed, String::new(), e.to_string()),
    };
    OrderOutcome {
        row,
        status,
        confirmation_id,
        message,
    }
}
