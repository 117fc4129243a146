//! # Seed Data Generator
//!
//! Populates a database with development data through the real services:
//! an admin account, one whitelisted employee, two stores and a handful
//! of items.
//!
//! ## Usage
//! ```bash
//! cargo run -p storekeep-services --bin seed
//!
//! # Specify database path (default: ./storekeep_dev.db)
//! cargo run -p storekeep-services --bin seed -- --db ./data/storekeep.db
//! ```
//!
//! ## Seeded Accounts
//! - admin@storekeep.dev / admin-secret (ADMIN)
//! - employee@storekeep.dev / employee-secret (EMPLOYEE, granted "Main Street")

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use storekeep_db::{Database, DbConfig};
use storekeep_services::{
    AuthService, InventoryService, Session, StoreService, WhitelistService,
};

const ADMIN_EMAIL: &str = "admin@storekeep.dev";
const ADMIN_PASSWORD: &str = "admin-secret";
const EMPLOYEE_EMAIL: &str = "employee@storekeep.dev";
const EMPLOYEE_PASSWORD: &str = "employee-secret";

/// (name, price, quantity) per store.
const ITEMS: &[(&str, &str, &str)] = &[
    ("Widget", "9.99", "10"),
    ("Gadget", "24.50", "4"),
    ("Sprocket", "1.25", "250"),
    ("Flux Capacitor", "1299.99", "1"),
    ("Packing Tape", "3.00", "48"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut db_path = env::var("STOREKEEP_DB").unwrap_or_else(|_| "./storekeep_dev.db".to_string());

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("storekeep seed data generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./storekeep_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, "seeding development database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    if db.users().count().await? > 0 {
        info!("database already has accounts, skipping seed");
        return Ok(());
    }

    let auth = AuthService::new(db.clone());
    let stores = StoreService::new(db.clone());
    let inventory = InventoryService::new(db.clone());
    let whitelist = WhitelistService::new(db.clone());

    // first account ever: becomes the administrator
    auth.register(ADMIN_EMAIL, "Admin", ADMIN_PASSWORD, ADMIN_PASSWORD)
        .await?;

    let mut admin_session = Session::new();
    auth.login(&mut admin_session, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await?;

    // one employee, through the same whitelist gate real users go through
    whitelist.add_email(&admin_session, EMPLOYEE_EMAIL).await?;
    let employee = auth
        .register(
            EMPLOYEE_EMAIL,
            "Employee",
            EMPLOYEE_PASSWORD,
            EMPLOYEE_PASSWORD,
        )
        .await?;

    let main_street = stores.create_store(&admin_session, "Main Street").await?;
    let warehouse = stores.create_store(&admin_session, "Warehouse").await?;

    for (name, price, quantity) in ITEMS {
        inventory
            .create_item(&admin_session, name, price, quantity, &main_street.id)
            .await?;
        inventory
            .create_item(&admin_session, name, price, quantity, &warehouse.id)
            .await?;
    }

    stores
        .add_employee(&admin_session, &employee.id, &main_street.id)
        .await?;

    info!(
        stores = 2,
        items = ITEMS.len() * 2,
        "seed complete; accounts: {} / {}",
        ADMIN_EMAIL,
        EMPLOYEE_EMAIL
    );

    Ok(())
}
