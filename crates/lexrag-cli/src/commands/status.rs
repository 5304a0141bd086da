//! Status command

use crate::app::OutputFormat;
use crate::output::format_stats;
use anyhow::Result;
use lexrag_core::Database;

pub async fn run(db: &Database, format: OutputFormat) -> Result<()> {
    let stats = db.get_stats()?;
    print!("{}", format_stats(&stats, format));
    Ok(())
}
