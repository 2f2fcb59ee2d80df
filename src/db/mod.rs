use rusqlite::{params, Connection, OptionalExtension, Result as SqlResult};
use std::path::PathBuf;

use crate::models::{
    AdSpendEntry, Collaborator, MonthlyFinancialInput, MonthlyRecord, ToolExpense,
};
use crate::utils::now_rfc3339;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(db_path: PathBuf) -> SqlResult<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Database { conn };
        db.run_migrations()?;
        Ok(db)
    }

    fn run_migrations(&mut self) -> SqlResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL
            );",
        )?;

        let migrations = vec![
            (
                "001_create_monthly_records.sql",
                include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/migrations/001_create_monthly_records.sql"
                )),
            ),
            (
                "002_create_line_items.sql",
                include_str!(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/migrations/002_create_line_items.sql"
                )),
            ),
        ];

        for (name, sql) in migrations {
            let applied: Option<String> = self
                .conn
                .query_row(
                    "SELECT name FROM schema_migrations WHERE name = ?1",
                    params![name],
                    |row| row.get(0),
                )
                .optional()?;

            if applied.is_none() {
                let tx = self.conn.transaction()?;
                tx.execute_batch(sql)?;
                tx.execute(
                    "INSERT INTO schema_migrations (name, applied_at) VALUES (?1, datetime('now'))",
                    params![name],
                )?;
                tx.commit()?;
            }
        }

        Ok(())
    }

    pub fn get_record(
        &self,
        organization: &str,
        year: i32,
        month: u32,
    ) -> SqlResult<Option<MonthlyRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, organization, year, month, gross_revenue, sales_count,
                    chargebacks, refunds, platform_fee_rate, tax_rate,
                    traffic_manager_commission_rate, copywriter_commission_rate,
                    created_at, updated_at
             FROM monthly_records
             WHERE organization = ?1 AND year = ?2 AND month = ?3",
        )?;

        stmt.query_row(params![organization, year, month], map_record)
            .optional()
    }

    /// One record per (organization, year, month); creates an all-zero
    /// record on first touch.
    pub fn get_or_create_record(
        &self,
        organization: &str,
        year: i32,
        month: u32,
    ) -> SqlResult<MonthlyRecord> {
        if let Some(record) = self.get_record(organization, year, month)? {
            return Ok(record);
        }

        let now = now_rfc3339();
        let record = MonthlyRecord {
            id: uuid::Uuid::new_v4().to_string(),
            organization: organization.to_string(),
            year,
            month,
            gross_revenue: 0.0,
            sales_count: 0,
            chargebacks: 0.0,
            refunds: 0.0,
            platform_fee_rate: 0.0,
            tax_rate: 0.0,
            traffic_manager_commission_rate: 0.0,
            copywriter_commission_rate: 0.0,
            created_at: now.clone(),
            updated_at: now,
        };

        self.conn.execute(
            "INSERT INTO monthly_records (
                id, organization, year, month, gross_revenue, sales_count,
                chargebacks, refunds, platform_fee_rate, tax_rate,
                traffic_manager_commission_rate, copywriter_commission_rate,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                record.id,
                record.organization,
                record.year,
                record.month,
                record.gross_revenue,
                record.sales_count,
                record.chargebacks,
                record.refunds,
                record.platform_fee_rate,
                record.tax_rate,
                record.traffic_manager_commission_rate,
                record.copywriter_commission_rate,
                record.created_at,
                record.updated_at
            ],
        )?;

        Ok(record)
    }

    pub fn update_record(&self, record: &MonthlyRecord) -> SqlResult<()> {
        self.conn.execute(
            "UPDATE monthly_records SET
                gross_revenue = ?2, sales_count = ?3, chargebacks = ?4, refunds = ?5,
                platform_fee_rate = ?6, tax_rate = ?7,
                traffic_manager_commission_rate = ?8, copywriter_commission_rate = ?9,
                updated_at = ?10
             WHERE id = ?1",
            params![
                record.id,
                record.gross_revenue,
                record.sales_count,
                record.chargebacks,
                record.refunds,
                record.platform_fee_rate,
                record.tax_rate,
                record.traffic_manager_commission_rate,
                record.copywriter_commission_rate,
                record.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn add_collaborator(&self, collaborator: &Collaborator) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO collaborators (id, record_id, name, role, salary, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                collaborator.id,
                collaborator.record_id,
                collaborator.name,
                collaborator.role,
                collaborator.salary,
                collaborator.created_at,
                collaborator.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn get_collaborators(&self, record_id: &str) -> SqlResult<Vec<Collaborator>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, record_id, name, role, salary, created_at, updated_at
             FROM collaborators WHERE record_id = ?1 ORDER BY name",
        )?;

        let rows = stmt.query_map(params![record_id], |row| {
            Ok(Collaborator {
                id: row.get(0)?,
                record_id: row.get(1)?,
                name: row.get(2)?,
                role: row.get(3)?,
                salary: row.get(4)?,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            })
        })?;

        rows.collect()
    }

    pub fn remove_collaborator(&self, id: &str) -> SqlResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM collaborators WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn add_tool_expense(&self, tool: &ToolExpense) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO tool_expenses (id, record_id, name, cost, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tool.id,
                tool.record_id,
                tool.name,
                tool.cost,
                tool.created_at,
                tool.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn get_tool_expenses(&self, record_id: &str) -> SqlResult<Vec<ToolExpense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, record_id, name, cost, created_at, updated_at
             FROM tool_expenses WHERE record_id = ?1 ORDER BY name",
        )?;

        let rows = stmt.query_map(params![record_id], |row| {
            Ok(ToolExpense {
                id: row.get(0)?,
                record_id: row.get(1)?,
                name: row.get(2)?,
                cost: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;

        rows.collect()
    }

    pub fn remove_tool_expense(&self, id: &str) -> SqlResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tool_expenses WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn add_ad_spend(&self, entry: &AdSpendEntry) -> SqlResult<()> {
        self.conn.execute(
            "INSERT INTO ad_spend_entries (id, record_id, channel, amount, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                entry.id,
                entry.record_id,
                entry.channel,
                entry.amount,
                entry.created_at,
                entry.updated_at
            ],
        )?;
        Ok(())
    }

    pub fn get_ad_spend(&self, record_id: &str) -> SqlResult<Vec<AdSpendEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, record_id, channel, amount, created_at, updated_at
             FROM ad_spend_entries WHERE record_id = ?1 ORDER BY channel",
        )?;

        let rows = stmt.query_map(params![record_id], |row| {
            Ok(AdSpendEntry {
                id: row.get(0)?,
                record_id: row.get(1)?,
                channel: row.get(2)?,
                amount: row.get(3)?,
                created_at: row.get(4)?,
                updated_at: row.get(5)?,
            })
        })?;

        rows.collect()
    }

    pub fn remove_ad_spend(&self, id: &str) -> SqlResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM ad_spend_entries WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    pub fn fixed_staff_cost(&self, record_id: &str) -> SqlResult<f64> {
        let mut stmt = self
            .conn
            .prepare("SELECT SUM(salary) FROM collaborators WHERE record_id = ?1")?;
        let total: Option<f64> = stmt.query_row(params![record_id], |row| row.get(0))?;
        Ok(total.unwrap_or(0.0))
    }

    pub fn tools_cost(&self, record_id: &str) -> SqlResult<f64> {
        let mut stmt = self
            .conn
            .prepare("SELECT SUM(cost) FROM tool_expenses WHERE record_id = ?1")?;
        let total: Option<f64> = stmt.query_row(params![record_id], |row| row.get(0))?;
        Ok(total.unwrap_or(0.0))
    }

    pub fn ad_spend_amounts(&self, record_id: &str) -> SqlResult<Vec<f64>> {
        let mut stmt = self.conn.prepare(
            "SELECT amount FROM ad_spend_entries WHERE record_id = ?1 ORDER BY channel",
        )?;
        let rows = stmt.query_map(params![record_id], |row| row.get(0))?;
        rows.collect()
    }

    /// Assembles the calculator input for a record: scalar fields from the
    /// record itself, staff/tool/ad totals from the line items.
    pub fn get_month_input(&self, record: &MonthlyRecord) -> SqlResult<MonthlyFinancialInput> {
        Ok(MonthlyFinancialInput {
            gross_revenue: record.gross_revenue,
            sales_count: record.sales_count,
            fixed_staff_cost: self.fixed_staff_cost(&record.id)?,
            tools_cost: self.tools_cost(&record.id)?,
            ad_spend: self.ad_spend_amounts(&record.id)?,
            chargebacks: record.chargebacks,
            refunds: record.refunds,
            platform_fee_rate: record.platform_fee_rate,
            tax_rate: record.tax_rate,
            traffic_manager_commission_rate: record.traffic_manager_commission_rate,
            copywriter_commission_rate: record.copywriter_commission_rate,
        })
    }
}

fn map_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MonthlyRecord> {
    Ok(MonthlyRecord {
        id: row.get(0)?,
        organization: row.get(1)?,
        year: row.get(2)?,
        month: row.get(3)?,
        gross_revenue: row.get(4)?,
        sales_count: row.get(5)?,
        chargebacks: row.get(6)?,
        refunds: row.get(7)?,
        platform_fee_rate: row.get(8)?,
        tax_rate: row.get(9)?,
        traffic_manager_commission_rate: row.get(10)?,
        copywriter_commission_rate: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}
