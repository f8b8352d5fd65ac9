//! # Seed Data Generator
//!
//! Populates an empty database with the sample Madang bookstore catalogue.
//!
//! ## Usage
//! ```bash
//! # Books only, into ./madang.db
//! cargo run -p madang-db --bin seed
//!
//! # Books plus the sample customers and their orders
//! cargo run -p madang-db --bin seed -- --with-sample-customers
//!
//! # Specify database path
//! cargo run -p madang-db --bin seed -- --db ./data/madang.db
//! ```
//!
//! ## Generated Data
//! - 10 books (bookid 1..=10) with publisher and list price
//! - With `--with-sample-customers`: 5 customers and 10 orders dated July 2014
//!
//! Seeding is skipped when the Book table already has rows.

use chrono::NaiveDate;
use clap::Parser;
use madang_core::{Book, DEFAULT_DATABASE_FILE};
use madang_db::{Database, DbConfig, DbResult, SqlValue};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// (bookid, bookname, publisher, price)
const BOOKS: &[(i64, &str, &str, i64)] = &[
    (1, "History of Football", "Good Sports", 7000),
    (2, "The Woman Who Knows Football", "Namusu", 13000),
    (3, "Understanding Football", "Daehan Media", 22000),
    (4, "Golf Bible", "Daehan Media", 35000),
    (5, "Figure Skating Textbook", "Good Sports", 8000),
    (6, "Weightlifting Step by Step", "Good Sports", 6000),
    (7, "Memories of Baseball", "Isang Media", 20000),
    (8, "Take Care of Baseball", "Isang Media", 13000),
    (9, "Olympic Stories", "Samsungdang", 7500),
    (10, "Olympic Champions", "Pearson", 13000),
];

/// (custid, name, address, phone)
const CUSTOMERS: &[(i64, &str, &str, Option<&str>)] = &[
    (1, "Park Ji-sung", "Manchester, England", Some("000-5000-0001")),
    (2, "Kim Yuna", "Seoul, Korea", Some("000-6000-0001")),
    (3, "Jang Mi-ran", "Gangwon-do, Korea", Some("000-7000-0001")),
    (4, "Choo Shin-soo", "Cleveland, USA", Some("000-8000-0001")),
    (5, "Park Se-ri", "Daejeon, Korea", None),
];

/// (orderid, custid, bookid, saleprice, day of July 2014)
const ORDERS: &[(i64, i64, i64, i64, u32)] = &[
    (1, 1, 1, 6000, 1),
    (2, 1, 3, 21000, 3),
    (3, 2, 5, 8000, 3),
    (4, 3, 6, 6000, 4),
    (5, 4, 7, 20000, 5),
    (6, 1, 2, 12000, 7),
    (7, 4, 8, 13000, 7),
    (8, 3, 10, 12000, 8),
    (9, 2, 10, 7000, 9),
    (10, 3, 8, 13000, 10),
];

/// Madang Manager Seed Data Generator
#[derive(Debug, Parser)]
#[command(name = "seed", version)]
struct Args {
    /// Database file path
    #[arg(short, long, default_value = DEFAULT_DATABASE_FILE)]
    db: PathBuf,

    /// Also insert the sample customers and their order history
    #[arg(long)]
    with_sample_customers: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("Madang Manager Seed Data Generator");
    println!("==================================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");

    let existing = db.books().count().await?;
    if existing > 0 {
        warn!(existing, "Book table is not empty, skipping seed");
        println!("⚠ Database already has {} books", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let books = seed_books(&db).await?;
    println!("✓ Inserted {} books", books);

    if args.with_sample_customers {
        let (customers, orders) = seed_customers(&db).await?;
        println!("✓ Inserted {} customers and {} orders", customers, orders);
    }

    info!("Seed complete");
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

async fn seed_books(db: &Database) -> DbResult<usize> {
    for &(bookid, bookname, publisher, price) in BOOKS {
        db.run_execute(
            "INSERT INTO Book (bookid, bookname, publisher, price) VALUES (?1, ?2, ?3, ?4)",
            &[bookid.into(), bookname.into(), publisher.into(), price.into()],
        )
        .await?;
    }

    // The order form reads through the repository; make sure it sees them
    let listed: Vec<Book> = db.books().list().await?;
    Ok(listed.len())
}

async fn seed_customers(db: &Database) -> DbResult<(usize, usize)> {
    for &(custid, name, address, phone) in CUSTOMERS {
        db.run_execute(
            "INSERT INTO Customer (custid, name, address, phone) VALUES (?1, ?2, ?3, ?4)",
            &[custid.into(), name.into(), address.into(), phone.into()],
        )
        .await?;
    }

    for &(orderid, custid, bookid, saleprice, day) in ORDERS {
        let orderdate: SqlValue = NaiveDate::from_ymd_opt(2014, 7, day).into();
        db.run_execute(
            "INSERT INTO Orders (orderid, custid, bookid, saleprice, orderdate) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                orderid.into(),
                custid.into(),
                bookid.into(),
                saleprice.into(),
                orderdate,
            ],
        )
        .await?;
    }

    Ok((CUSTOMERS.len(), ORDERS.len()))
}
