// ==========================================
// Reference-data import engine - CLI entry
// ==========================================
// Actions:
//   import-refdata [workbook] [db]   build the hierarchy from a workbook
//   populate <source> <table> [db]   bulk-load a table from a source file
//   columns <table> [db]             show a table's columns
// Defaults come from ./config.json when present.
// ==========================================

use refdata_import::db::open_sqlite_connection;
use refdata_import::repository::table_columns;
use refdata_import::{bulk_load, import_hierarchy, logging, ImportConfig};
use std::process::ExitCode;

const CONFIG_FILE: &str = "config.json";

fn print_usage() {
    eprintln!("Usage: refdata-import <action> [arguments]");
    eprintln!();
    eprintln!("Actions:");
    eprintln!("  import-refdata [workbook] [db]   import the reference hierarchy");
    eprintln!("  populate <source> <table> [db]   bulk-load a table (xlsx/csv)");
    eprintln!("  columns <table> [db]             list a table's columns");
}

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(action) = args.get(1) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let config = ImportConfig::load_or_default(CONFIG_FILE);

    let result = match action.as_str() {
        "import-refdata" => {
            let workbook = args.get(2).cloned().unwrap_or(config.workbook_path.clone());
            let db_path = args.get(3).cloned().unwrap_or(config.db_path.clone());
            run_hierarchy_import(&workbook, &db_path, &config)
        }
        "populate" => {
            let (Some(source), Some(table)) = (args.get(2), args.get(3)) else {
                eprintln!("Usage: refdata-import populate <source> <table> [db]");
                return ExitCode::FAILURE;
            };
            let db_path = args.get(4).cloned().unwrap_or(config.db_path.clone());
            run_bulk_load(source, table, &db_path)
        }
        "columns" => {
            let Some(table) = args.get(2) else {
                eprintln!("Usage: refdata-import columns <table> [db]");
                return ExitCode::FAILURE;
            };
            let db_path = args.get(3).cloned().unwrap_or(config.db_path.clone());
            run_columns(table, &db_path)
        }
        _ => {
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_hierarchy_import(
    workbook: &str,
    db_path: &str,
    config: &ImportConfig,
) -> anyhow::Result<()> {
    let summary = import_hierarchy(workbook, db_path, config)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_bulk_load(source: &str, table: &str, db_path: &str) -> anyhow::Result<()> {
    let summary = bulk_load(source, db_path, table)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn run_columns(table: &str, db_path: &str) -> anyhow::Result<()> {
    let conn = open_sqlite_connection(db_path)?;
    let columns = table_columns(&conn, table)?;
    println!("{}", serde_json::to_string_pretty(&columns)?);
    Ok(())
}
