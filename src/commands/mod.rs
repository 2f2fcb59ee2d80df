use anyhow::{ensure, Result};

pub mod items;
pub mod month;
pub mod report;

pub(crate) fn ensure_month(month: u32) -> Result<()> {
    ensure!((1..=12).contains(&month), "Month must be between 1 and 12");
    Ok(())
}
