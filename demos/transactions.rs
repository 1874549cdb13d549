//! Transaction example
//!
//! This example demonstrates units of work including:
//! - Committing a unit of work that succeeds
//! - Rolling back a unit of work that fails
//! - Carrying an application error through the rollback
//!
//! Run with: cargo run --example transactions

use rust_sql_executor::prelude::*;
use rust_sql_executor::Handle;

#[derive(Debug, thiserror::Error)]
enum TransferError {
    #[error("insufficient funds in account {0}")]
    InsufficientFunds(i64),
    #[error("account not found: {0}")]
    UnknownAccount(String),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

fn main() -> std::result::Result<(), TransferError> {
    println!("=== Rust SQL Executor - Transaction Example ===\n");

    let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:"))?;

    println!("1. Setting up accounts table...");
    conn.exec(
        "CREATE TABLE accounts (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            balance INTEGER NOT NULL CHECK(balance >= 0)
        )",
        &params! {},
    )?;

    for (id, name, balance) in [(1, "Alice", 1000), (2, "Bob", 500), (3, "Charlie", 750)] {
        conn.exec(
            "INSERT INTO accounts (id, name, balance) VALUES ({id}, {name}, {balance})",
            &params! { "id" => id, "name" => name, "balance" => balance },
        )?;
    }
    println!("   ✓ Accounts created\n");
    print_balances(&conn)?;

    println!("\n2. Successful transfer (Alice -> Bob: $100)");
    match conn.transaction(|tx| transfer(tx, "Alice", "Bob", 100)) {
        Ok(()) => println!("   ✓ Transaction committed"),
        Err(e) => println!("   ✗ Transaction rolled back: {e}"),
    }
    print_balances(&conn)?;

    println!("\n3. Failed transfer (Bob -> Alice: $1000, insufficient funds)");
    match conn.transaction(|tx| transfer(tx, "Bob", "Alice", 1000)) {
        Ok(()) => println!("   ✓ Transaction committed"),
        Err(e) => println!("   ✗ Transaction rolled back: {e}"),
    }
    print_balances(&conn)?;

    println!("\n4. Several transfers in one unit of work, the last one invalid");
    let transfers = [("Alice", "Bob", 50), ("Bob", "Charlie", 100), ("Charlie", "Dave", 25)];
    let result = conn.transaction(|tx| {
        for (from, to, amount) in transfers {
            println!("   - Transferring ${amount} from {from} to {to}");
            transfer(tx, from, to, amount)?;
        }
        Ok::<_, TransferError>(())
    });
    match result {
        Ok(()) => println!("   ✓ All transfers committed"),
        Err(e) => println!("   ✗ All transfers rolled back: {e}"),
    }
    print_balances(&conn)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

/// Move `amount` between two accounts on the transactional executor
fn transfer<H: Handle>(
    tx: &Executor<H>,
    from: &str,
    to: &str,
    amount: i64,
) -> std::result::Result<(), TransferError> {
    let from_id = account_id(tx, from)?;
    let to_id = account_id(tx, to)?;

    let rows = tx.query(
        "SELECT balance FROM accounts WHERE id = {id}",
        &params! { "id" => from_id },
    )?;
    let balance = rows
        .first()
        .and_then(|row| row.get("balance"))
        .and_then(|v| v.as_int())
        .unwrap_or(0);
    if balance < amount {
        return Err(TransferError::InsufficientFunds(from_id));
    }

    tx.exec(
        "UPDATE accounts SET balance = balance - {amount} WHERE id = {id}",
        &params! { "amount" => amount, "id" => from_id },
    )?
    .exec(
        "UPDATE accounts SET balance = balance + {amount} WHERE id = {id}",
        &params! { "amount" => amount, "id" => to_id },
    )?;

    Ok(())
}

fn account_id<H: Handle>(tx: &Executor<H>, name: &str) -> std::result::Result<i64, TransferError> {
    let rows = tx.query(
        "SELECT id FROM accounts WHERE name = {name}",
        &params! { "name" => name },
    )?;
    rows.first()
        .and_then(|row| row.get("id"))
        .and_then(|v| v.as_int())
        .ok_or_else(|| TransferError::UnknownAccount(name.to_string()))
}

fn print_balances(conn: &SqliteConnection) -> Result<()> {
    let rows = conn.query("SELECT name, balance FROM accounts ORDER BY id", &params! {})?;

    println!("   Current balances:");
    for row in rows {
        let name = row.get("name").map(|v| v.as_string()).unwrap_or_default();
        let balance = row.get("balance").and_then(|v| v.as_int()).unwrap_or(0);
        println!("   - {name:<8} ${balance}");
    }

    Ok(())
}
