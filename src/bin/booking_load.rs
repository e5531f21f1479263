//! Booking Load Test
//!
//! Fires concurrent bookings for one session across a small set of emails,
//! then checks that each email produced exactly one client.
//!
//! Run with: cargo run --bin booking_load --release -- --bookings 1000 --clients 20

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use cinego::domain::OperationContext;
use cinego::handlers::{BookTicketCommand, BookTicketHandler};
use cinego::{db, Config, MovieCatalog, Storage};

fn arg_value(args: &[String], flag: &str, default: u64) -> u64 {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let booking_count = arg_value(&args, "--bookings", 1000);
    let client_count = arg_value(&args, "--clients", 20).max(1);

    let config = Config::from_env()?;

    println!(
        "Load Test - {} bookings across {} clients",
        booking_count, client_count
    );
    println!("Connecting to database...");

    let pool = db::connect(&config).await?;
    db::apply_schema(&pool).await?;
    let storage = Storage::new(pool.clone(), config.storage_timeout);

    // Seed one movie and one session for this run
    let run_id = Uuid::new_v4().simple().to_string();
    let movie = MovieCatalog::new(storage.clone())
        .create(&format!("Load Test {}", run_id), "")
        .await?;
    let session_id = Uuid::new_v4();
    sqlx::query("INSERT INTO sessions (id, starts_at, movie_slug, room) VALUES ($1, $2, $3, 'load')")
        .bind(session_id)
        .bind(Utc::now())
        .bind(&movie.slug)
        .execute(&pool)
        .await?;

    let start = Instant::now();
    let mut tasks = Vec::with_capacity(booking_count as usize);

    for i in 0..booking_count {
        let handler = BookTicketHandler::new(storage.clone());
        let email = format!("load-{}-{}@example.com", run_id, i % client_count);
        tasks.push(tokio::spawn(async move {
            handler
                .execute(
                    BookTicketCommand::new(session_id, email),
                    &OperationContext::new(),
                )
                .await
        }));
    }

    let mut success_count = 0u64;
    for task in tasks {
        if matches!(task.await, Ok(Ok(_))) {
            success_count += 1;
        }
    }

    let elapsed = start.elapsed();
    let rate = success_count as f64 / elapsed.as_secs_f64();

    let clients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients WHERE email LIKE $1")
        .bind(format!("load-{}-%", run_id))
        .fetch_one(&pool)
        .await?;
    let tickets: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE session_id = $1")
        .bind(session_id)
        .fetch_one(&pool)
        .await?;

    println!("\n=== Load Test Results ===");
    println!("Total bookings: {}", booking_count);
    println!("Successful: {}", success_count);
    println!("Tickets stored: {}", tickets);
    println!("Clients stored: {} (expected {})", clients, client_count.min(booking_count));
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Rate: {:.0} bookings/sec", rate);

    if clients as u64 != client_count.min(booking_count) || tickets as u64 != success_count {
        anyhow::bail!("Inconsistent booking state");
    }

    Ok(())
}
