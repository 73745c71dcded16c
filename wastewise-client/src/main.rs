//! # WasteWise CLI
//!
//! Command-line front end for WasteWise Connect. The session is kept in a
//! JSON file between invocations; with the mock backend, data changes only
//! last for a single invocation.
//!
//! ## Usage
//!
//! ```bash
//! wastewise login --email alice@example.com --password password
//! wastewise invoices list
//! wastewise invoices pay inv-001 --card-number "4242 4242 4242 4242" \
//!     --expiry 12/29 --cvv 123 --name "Alice Smith"
//! wastewise logout
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wastewise_client::app::ClientContext;
use wastewise_client::config::ClientConfig;
use wastewise_client::error::ClientResult;
use wastewise_client::services::PaymentDetails;
use wastewise_shared::models::{CreateInvoice, Invoice, RegisterUser, Role, ScheduleEntry, ScheduleStatus, User};

/// WasteWise Connect command-line client
#[derive(Parser, Debug)]
#[command(name = "wastewise")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print full JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,

        /// Password hash (the mock backend accepts "password")
        #[arg(long, env = "WASTEWISE_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create a resident account and log in
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "WASTEWISE_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        household_id: Option<String>,
    },

    /// Forget the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Collection schedule
    #[command(subcommand)]
    Schedule(ScheduleCommands),

    /// Invoices and payments
    #[command(subcommand)]
    Invoices(InvoiceCommands),

    /// User administration (admin only)
    #[command(subcommand)]
    Users(UserCommands),
}

#[derive(Subcommand, Debug)]
enum ScheduleCommands {
    /// List scheduled collections
    #[command(alias = "ls")]
    List,

    /// Show one collection
    Show { id: String },

    /// Change a collection's status (collector or admin)
    SetStatus {
        id: String,

        /// scheduled, collected, rescheduled or cancelled
        status: ScheduleStatus,
    },
}

#[derive(Subcommand, Debug)]
enum InvoiceCommands {
    /// List visible invoices
    #[command(alias = "ls")]
    List,

    /// Show one invoice
    Show { id: String },

    /// Issue an invoice (admin)
    Create {
        #[arg(long)]
        user_id: String,

        /// YYYY-MM-DD
        #[arg(long)]
        due_date: NaiveDate,

        #[arg(long)]
        amount: f64,

        /// Billed service, repeatable
        #[arg(long = "service", required = true)]
        services: Vec<String>,
    },

    /// Pay an invoice by card
    Pay {
        id: String,

        #[arg(long)]
        card_number: String,

        /// MM/YY
        #[arg(long)]
        expiry: String,

        #[arg(long)]
        cvv: String,

        /// Cardholder name
        #[arg(long)]
        name: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// List all users
    #[command(alias = "ls")]
    List,

    /// Show one user
    Show { id: String },

    /// Delete a user
    Delete { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wastewise_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let client = ClientContext::from_config(&config)?;

    if let Err(e) = run(&client, cli.command, cli.json).await {
        tracing::debug!(error = %e, "Command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(client: &ClientContext, command: Commands, json: bool) -> ClientResult<()> {
    match command {
        Commands::Login { email, password } => {
            let auth = client.session.login(&email, &password).await?;
            println!("Logged in as {} ({})", auth.user.full_name(), auth.user.role);
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            password,
            address,
            household_id,
        } => {
            let data = RegisterUser {
                first_name,
                last_name,
                email,
                password,
                role: Role::Resident,
                address,
                household_id,
            };
            let auth = client.session.register(&data).await?;
            println!("Registered {} ({})", auth.user.full_name(), auth.user.id);
        }
        Commands::Logout => {
            client.session.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => {
            let user = client.session.require_user()?;
            print_one(&user, json, user_line)?;
        }

        Commands::Schedule(command) => match command {
            ScheduleCommands::List => print_many(&client.schedule.list().await?, json, schedule_line)?,
            ScheduleCommands::Show { id } => print_one(&client.schedule.get(&id).await?, json, schedule_line)?,
            ScheduleCommands::SetStatus { id, status } => {
                print_one(&client.schedule.update_status(&id, status).await?, json, schedule_line)?
            }
        },

        Commands::Invoices(command) => match command {
            InvoiceCommands::List => print_many(&client.invoices.list().await?, json, invoice_line)?,
            InvoiceCommands::Show { id } => print_one(&client.invoices.get(&id).await?, json, invoice_line)?,
            InvoiceCommands::Create {
                user_id,
                due_date,
                amount,
                services,
            } => {
                let data = CreateInvoice {
                    user_id,
                    due_date,
                    amount,
                    services,
                };
                print_one(&client.invoices.create(&data).await?, json, invoice_line)?
            }
            InvoiceCommands::Pay {
                id,
                card_number,
                expiry,
                cvv,
                name,
            } => {
                let details = PaymentDetails {
                    card_number,
                    expiry_date: expiry,
                    cvv,
                    cardholder_name: name,
                };
                print_one(&client.invoices.pay(&id, &details).await?, json, invoice_line)?
            }
        },

        Commands::Users(command) => match command {
            UserCommands::List => print_many(&client.users.list().await?, json, user_line)?,
            UserCommands::Show { id } => print_one(&client.users.get(&id).await?, json, user_line)?,
            UserCommands::Delete { id } => {
                client.users.delete(&id).await?;
                println!("Deleted {}", id);
            }
        },
    }
    Ok(())
}

fn print_one<T: Serialize>(item: &T, json: bool, line: fn(&T) -> String) -> ClientResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", line(item));
    }
    Ok(())
}

fn print_many<T: Serialize>(items: &[T], json: bool, line: fn(&T) -> String) -> ClientResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
        return Ok(());
    }
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}

fn user_line(user: &User) -> String {
    format!("{}  {:<20} {:<28} {}", user.id, user.full_name(), user.email, user.role)
}

fn schedule_line(entry: &ScheduleEntry) -> String {
    format!(
        "{}  {} {}  {:<16} {}",
        entry.id,
        entry.collection_date,
        entry.collection_time.format("%H:%M"),
        entry.area,
        entry.status
    )
}

fn invoice_line(invoice: &Invoice) -> String {
    let paid = invoice
        .payment_date
        .map(|d| format!(" (paid {})", d))
        .unwrap_or_default();
    format!(
        "{}  {}  ${:>8.2}  due {}  {}{}",
        invoice.id, invoice.user_id, invoice.amount, invoice.due_date, invoice.status, paid
    )
}

