use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wealthwise::{
    AppConfig, now_local,
    stores::{TaskStore, TransactionStore, sqlite::create_app_state},
    task::{NewTask, RecurringPeriod},
    transaction::{NewTransaction, TransactionType},
};

/// A utility for creating a test database for WealthWise.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The canonical name of the local timezone, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "UTC")]
    timezone: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    setup_logging();

    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    tracing::info!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;
    let config = AppConfig::new(output_path, &args.timezone);
    let state = create_app_state(conn, &config)?;

    let now = now_local(state.local_offset);
    let today = now.date();

    tracing::info!("Creating sample tasks...");

    let tasks = [
        ("Rent", "1200", 3, "Housing", Some(RecurringPeriod::Monthly)),
        ("Power bill", "145.80", 10, "Utilities", Some(RecurringPeriod::Monthly)),
        ("Car registration", "98.50", 45, "Transport", Some(RecurringPeriod::Yearly)),
        ("Dentist", "220", -2, "Health", None),
    ];

    for (title, amount, due_in_days, category, recurring_period) in tasks {
        state.task_store.insert(NewTask {
            title: title.to_owned(),
            description: None,
            amount: amount.parse::<Decimal>()?,
            due_date: today + Duration::days(due_in_days),
            category: category.to_owned(),
            is_recurring: recurring_period.is_some(),
            recurring_period,
            is_completed: due_in_days < 0,
            created_at: now,
        })?;
    }

    tracing::info!("Creating sample transactions...");

    let transactions = [
        ("Salary", "3500", TransactionType::Income, "Work", 14),
        ("Groceries", "132.47", TransactionType::Expense, "Food", 6),
        ("Coffee", "4.50", TransactionType::Expense, "Food", 1),
        ("Bus fare", "2.80", TransactionType::Expense, "Transport", 1),
        ("Refund", "25", TransactionType::Income, "Shopping", 0),
    ];

    for (title, amount, transaction_type, category, days_ago) in transactions {
        state.transaction_store.insert(NewTransaction {
            title: title.to_owned(),
            description: None,
            amount: amount.parse::<Decimal>()?,
            transaction_type,
            category: category.to_owned(),
            date: (today - Duration::days(days_ago)).midnight(),
            created_at: now,
        })?;
    }

    tracing::info!("Success!");

    Ok(())
}

fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
