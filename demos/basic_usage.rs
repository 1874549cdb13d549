//! Basic usage example
//!
//! This example demonstrates:
//! - Opening a SQLite connection
//! - Creating a table
//! - Inserting rows with `{name}` placeholders
//! - Querying and reading typed values back
//! - Building parameters from JSON
//!
//! Run with: cargo run --example basic_usage

use rust_sql_executor::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust SQL Executor - Basic Usage Example ===\n");

    println!("1. Connecting to in-memory SQLite database...");
    let conn = SqliteConnection::open(&ConnectionOptions::new(":memory:"))?;
    println!("   ✓ Connected: {conn:?}\n");

    println!("2. Creating users table...");
    conn.exec(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            score REAL,
            active INTEGER NOT NULL
        )",
        &params! {},
    )?;
    println!("   ✓ Table created\n");

    println!("3. Inserting users...");
    let insert = "INSERT INTO users (id, name, score, active) VALUES ({id}, {name}, {score}, {active})";
    conn.exec(insert, &params! { "id" => 1, "name" => "Alice", "score" => 91.5, "active" => true })?
        .exec(insert, &params! { "id" => 2, "name" => "Bob", "score" => None::<f64>, "active" => false })?;

    let from_json = ParameterSet::from_json(serde_json::json!({
        "id": 3,
        "name": "Charlie",
        "score": 77.25,
        "active": true
    }))?;
    conn.exec(insert, &from_json)?;
    println!("   ✓ 3 users inserted\n");

    println!("4. Querying active users...");
    let rows = conn.query(
        "SELECT id, name, score FROM users WHERE active = {active} ORDER BY id",
        &params! { "active" => true },
    )?;
    for row in &rows {
        let id = row.get("id").and_then(|v| v.as_int()).unwrap_or_default();
        let name = row.get("name").map(|v| v.as_string()).unwrap_or_default();
        let score = row
            .get("score")
            .and_then(|v| v.as_double())
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "n/a".to_string());
        println!("   - #{id} {name:<8} score {score}");
    }
    println!();

    println!("5. Handling a missing parameter...");
    match conn.query("SELECT name FROM users WHERE id = {id}", &params! {}) {
        Ok(_) => println!("   ✗ Unexpectedly succeeded"),
        Err(e) => println!("   ✓ Rejected: {e}"),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
