//! Columns command implementation.

use elbas_lib::prelude::*;

/// Print the columns requested by default for the hourly table.
pub(crate) fn list_columns() {
    println!("Default hourly columns (page {HOURLY}):");
    for column in HOURLY_COLUMNS {
        println!("  {column}");
    }
}
