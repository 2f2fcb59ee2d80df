use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use plbook::commands::month::MonthFields;
use plbook::commands::{items, month, report};
use plbook::db::Database;

#[derive(Parser)]
#[command(name = "plbook")]
#[command(about = "Monthly P&L tracker for content teams")]
struct Cli {
    #[arg(long, global = true, default_value = "plbook.sqlite")]
    db: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly record: scalar inputs and the computed statement
    Month {
        #[command(subcommand)]
        command: MonthCommand,
    },
    /// Staff line items; their salary sum is the month's fixed staff cost
    Collaborator {
        #[command(subcommand)]
        command: CollaboratorCommand,
    },
    /// Recurring tool/software line items
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },
    /// Per-channel ad spend line items
    Ad {
        #[command(subcommand)]
        command: AdCommand,
    },
    /// Trailing 12-month revenue/costs/net series
    Report {
        #[arg(long)]
        org: String,
        #[arg(long)]
        until: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MonthCommand {
    Set {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        gross_revenue: Option<String>,
        #[arg(long)]
        sales_count: Option<String>,
        #[arg(long)]
        chargebacks: Option<String>,
        #[arg(long)]
        refunds: Option<String>,
        #[arg(long)]
        platform_fee_rate: Option<String>,
        #[arg(long)]
        tax_rate: Option<String>,
        #[arg(long)]
        traffic_manager_rate: Option<String>,
        #[arg(long)]
        copywriter_rate: Option<String>,
    },
    Show {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum CollaboratorCommand {
    Add {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long)]
        salary: String,
    },
    List {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum ToolCommand {
    Add {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        cost: String,
    },
    List {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Remove {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum AdCommand {
    Add {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        channel: String,
        #[arg(long)]
        amount: String,
    },
    List {
        #[arg(long)]
        org: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    Remove {
        #[arg(long)]
        id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = Database::new(cli.db)?;

    match cli.command {
        Commands::Month { command } => match command {
            MonthCommand::Set {
                org,
                year,
                month: month_num,
                gross_revenue,
                sales_count,
                chargebacks,
                refunds,
                platform_fee_rate,
                tax_rate,
                traffic_manager_rate,
                copywriter_rate,
            } => month::set_month(
                &db,
                &org,
                year,
                month_num,
                MonthFields {
                    gross_revenue,
                    sales_count,
                    chargebacks,
                    refunds,
                    platform_fee_rate,
                    tax_rate,
                    traffic_manager_commission_rate: traffic_manager_rate,
                    copywriter_commission_rate: copywriter_rate,
                },
            ),
            MonthCommand::Show {
                org,
                year,
                month: month_num,
                json,
            } => month::show_month(&db, &org, year, month_num, json),
        },
        Commands::Collaborator { command } => match command {
            CollaboratorCommand::Add {
                org,
                year,
                month: month_num,
                name,
                role,
                salary,
            } => items::add_collaborator(&db, &org, year, month_num, name, role, &salary),
            CollaboratorCommand::List {
                org,
                year,
                month: month_num,
                json,
            } => items::list_collaborators(&db, &org, year, month_num, json),
            CollaboratorCommand::Remove { id } => items::remove_collaborator(&db, &id),
        },
        Commands::Tool { command } => match command {
            ToolCommand::Add {
                org,
                year,
                month: month_num,
                name,
                cost,
            } => items::add_tool(&db, &org, year, month_num, name, &cost),
            ToolCommand::List {
                org,
                year,
                month: month_num,
                json,
            } => items::list_tools(&db, &org, year, month_num, json),
            ToolCommand::Remove { id } => items::remove_tool(&db, &id),
        },
        Commands::Ad { command } => match command {
            AdCommand::Add {
                org,
                year,
                month: month_num,
                channel,
                amount,
            } => items::add_ad_spend(&db, &org, year, month_num, channel, &amount),
            AdCommand::List {
                org,
                year,
                month: month_num,
                json,
            } => items::list_ad_spend(&db, &org, year, month_num, json),
            AdCommand::Remove { id } => items::remove_ad_spend(&db, &id),
        },
        Commands::Report { org, until, json } => report::show_yearly_series(&db, &org, until, json),
    }
}
