use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;

mod bank;

/// The size of the channel for processing operations.
const CHANNEL_SIZE: usize = 100;

/// Default path the updated customer records are written to.
const DEFAULT_OUTPUT_FILE: &str = "Updated_Bank_users.csv";

/// Default path of the transaction log.
const DEFAULT_LOG_FILE: &str = "TransactionLog.txt";

#[tokio::main]
async fn main() {
    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 3 || args.len() > 5 {
        eprintln!(
            "Usage: {} <customers_csv> <operations_csv> [output_csv] [log_file]",
            args[0]
        );
        std::process::exit(1);
    }
    let customers_file = &args[1];
    let operations_file = &args[2];
    let output_file = args.get(3).map(String::as_str).unwrap_or(DEFAULT_OUTPUT_FILE);
    let log_file = args.get(4).map(String::as_str).unwrap_or(DEFAULT_LOG_FILE);

    let customers = match std::fs::File::open(customers_file)
        .map_err(bank::StoreError::from)
        .and_then(bank::read_customers)
    {
        Ok(customers) => customers,
        Err(err) => {
            eprintln!("Error loading customer records: {err}");
            std::process::exit(1);
        }
    };
    let audit = bank::AuditLog::open(log_file).expect("Failed to open the transaction log");

    let (sender, receiver) = mpsc::channel(CHANNEL_SIZE);
    let mut ledger = bank::Ledger::new(customers, receiver, audit);

    let handle = tokio::spawn(async move {
        ledger.run().await;
        ledger
    });

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(operations_file)
        .expect("Failed to read operations file");

    for operation in reader.deserialize().flatten() {
        if let Err(err) = sender.send(operation).await {
            eprintln!("Error sending operation: {err}");
        }
    }

    drop(sender); // Close the sender to signal no more operations will be sent
    let ledger = handle
        .await
        .expect("Failed to join the ledger task");

    if let Err(err) = bank::save_customers(output_file, ledger.customers()) {
        eprintln!("Error writing customer records: {err}");
    }
}
