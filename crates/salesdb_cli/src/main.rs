//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `salesdb_core` linkage without any external database.
//! - Run one insert/list round against an in-memory store.
//! - Write core logs under `SALESDB_LOG_DIR` (absolute path) when it is set.
//! - Keep output deterministic for quick local sanity checks.

use chrono::NaiveDate;
use salesdb_core::{
    default_log_level, init_logging, open_db_in_memory, DaoFactory, Department,
    DepartmentRepository, Seller, SellerRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("salesdb_core ping={}", salesdb_core::ping());
    println!("salesdb_core version={}", salesdb_core::core_version());

    if let Ok(log_dir) = std::env::var("SALESDB_LOG_DIR") {
        let level = default_log_level();
        match init_logging(level, &log_dir) {
            Ok(()) => println!("salesdb_core logging=ok level={level} log_dir={log_dir}"),
            Err(err) => {
                eprintln!("salesdb_core logging=error error={err}");
                return ExitCode::FAILURE;
            }
        }
    }

    match smoke_round() {
        Ok(sellers) => {
            println!("salesdb_core smoke=ok sellers={sellers}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("salesdb_core smoke=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke_round() -> Result<usize, Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let factory = DaoFactory::new(&conn);
    let departments = factory.department_dao()?;
    let sellers = factory.seller_dao()?;

    let mut department = Department::new("Smoke");
    departments.insert(&mut department)?;

    let birth_date = NaiveDate::from_ymd_opt(1990, 1, 1).ok_or("invalid smoke birth date")?;
    let mut seller = Seller::new("Smoke Seller", "smoke@example.com", birth_date, 1.0, department);
    sellers.insert(&mut seller)?;

    Ok(sellers.find_all()?.len())
}
