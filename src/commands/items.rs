use anyhow::{anyhow, Result};

use crate::commands::ensure_month;
use crate::db::Database;
use crate::models::{AdSpendEntry, Collaborator, ToolExpense};
use crate::utils::{format_currency, now_rfc3339, parse_decimal};

pub fn add_collaborator(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    name: String,
    role: String,
    salary: &str,
) -> Result<()> {
    ensure_month(month)?;
    let record = db.get_or_create_record(organization, year, month)?;
    let now = now_rfc3339();
    let collaborator = Collaborator {
        id: uuid::Uuid::new_v4().to_string(),
        record_id: record.id,
        name,
        role,
        salary: parse_decimal(salary)?,
        created_at: now.clone(),
        updated_at: now,
    };
    db.add_collaborator(&collaborator)?;
    tracing::info!(organization, year, month, name = %collaborator.name, "added collaborator");
    println!("Added collaborator {} ({})", collaborator.name, collaborator.id);
    Ok(())
}

pub fn list_collaborators(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    json: bool,
) -> Result<()> {
    ensure_month(month)?;
    let record = db
        .get_record(organization, year, month)?
        .ok_or_else(|| anyhow!("No record for {} {}-{:02}", organization, year, month))?;
    let collaborators = db.get_collaborators(&record.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&collaborators)?);
        return Ok(());
    }

    for collaborator in &collaborators {
        println!(
            "{}  {:<24} {:<16} {}",
            collaborator.id,
            collaborator.name,
            collaborator.role,
            format_currency(collaborator.salary)
        );
    }
    println!("Total staff cost: {}", format_currency(db.fixed_staff_cost(&record.id)?));
    Ok(())
}

pub fn remove_collaborator(db: &Database, id: &str) -> Result<()> {
    if !db.remove_collaborator(id)? {
        return Err(anyhow!("No collaborator with id {}", id));
    }
    println!("Removed collaborator {}", id);
    Ok(())
}

pub fn add_tool(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    name: String,
    cost: &str,
) -> Result<()> {
    ensure_month(month)?;
    let record = db.get_or_create_record(organization, year, month)?;
    let now = now_rfc3339();
    let tool = ToolExpense {
        id: uuid::Uuid::new_v4().to_string(),
        record_id: record.id,
        name,
        cost: parse_decimal(cost)?,
        created_at: now.clone(),
        updated_at: now,
    };
    db.add_tool_expense(&tool)?;
    tracing::info!(organization, year, month, name = %tool.name, "added tool expense");
    println!("Added tool {} ({})", tool.name, tool.id);
    Ok(())
}

pub fn list_tools(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    json: bool,
) -> Result<()> {
    ensure_month(month)?;
    let record = db
        .get_record(organization, year, month)?
        .ok_or_else(|| anyhow!("No record for {} {}-{:02}", organization, year, month))?;
    let tools = db.get_tool_expenses(&record.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    for tool in &tools {
        println!("{}  {:<24} {}", tool.id, tool.name, format_currency(tool.cost));
    }
    println!("Total tools cost: {}", format_currency(db.tools_cost(&record.id)?));
    Ok(())
}

pub fn remove_tool(db: &Database, id: &str) -> Result<()> {
    if !db.remove_tool_expense(id)? {
        return Err(anyhow!("No tool expense with id {}", id));
    }
    println!("Removed tool expense {}", id);
    Ok(())
}

pub fn add_ad_spend(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    channel: String,
    amount: &str,
) -> Result<()> {
    ensure_month(month)?;
    let record = db.get_or_create_record(organization, year, month)?;
    let now = now_rfc3339();
    let entry = AdSpendEntry {
        id: uuid::Uuid::new_v4().to_string(),
        record_id: record.id,
        channel,
        amount: parse_decimal(amount)?,
        created_at: now.clone(),
        updated_at: now,
    };
    db.add_ad_spend(&entry)?;
    tracing::info!(organization, year, month, channel = %entry.channel, "added ad spend");
    println!("Added ad spend {} ({})", entry.channel, entry.id);
    Ok(())
}

pub fn list_ad_spend(
    db: &Database,
    organization: &str,
    year: i32,
    month: u32,
    json: bool,
) -> Result<()> {
    ensure_month(month)?;
    let record = db
        .get_record(organization, year, month)?
        .ok_or_else(|| anyhow!("No record for {} {}-{:02}", organization, year, month))?;
    let entries = db.get_ad_spend(&record.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let mut total = 0.0;
    for entry in &entries {
        println!("{}  {:<24} {}", entry.id, entry.channel, format_currency(entry.amount));
        total += entry.amount;
    }
    println!("Total ad spend: {}", format_currency(total));
    Ok(())
}

pub fn remove_ad_spend(db: &Database, id: &str) -> Result<()> {
    if !db.remove_ad_spend(id)? {
        return Err(anyhow!("No ad spend entry with id {}", id));
    }
    println!("Removed ad spend entry {}", id);
    Ok(())
}
