use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::error::StoreError;
use crate::models::{Customer, CustomerDraft, Lead, LeadDraft};
use crate::status::LeadStatus;

/// Insert and ordered-read access to the customers table. Holds its own pool
/// handle; construct once at startup and clone into the app state.
#[derive(Clone)]
pub struct CustomerStore {
    pool: Pool<Sqlite>,
}

impl CustomerStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        CustomerStore { pool }
    }

    /// Persists a new customer with `created_at` set to the current UTC time.
    /// Rejects the write when `name` is absent or empty; the optional fields
    /// go in as submitted, unvalidated.
    pub async fn add(&self, draft: CustomerDraft) -> Result<Customer, StoreError> {
        let name = match draft.name {
            Some(ref name) if !name.is_empty() => name,
            _ => return Err(StoreError::MissingField("name")),
        };

        let mut conn = self.pool.acquire().await?;
        let customer: Customer = sqlx::query_as(
            "INSERT INTO customers (name, email, phone, company, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(&draft.company)
        .bind(Utc::now())
        .fetch_one(&mut conn)
        .await?;

        Ok(customer)
    }

    /// All customers, most recent first. Rows inserted in the same instant
    /// keep insertion order, newest on top.
    pub async fn list_all(&self) -> Result<Vec<Customer>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let customers: Vec<Customer> =
            sqlx::query_as("SELECT * FROM customers ORDER BY created_at DESC, id DESC")
                .fetch_all(&mut conn)
                .await?;

        Ok(customers)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut conn)
            .await?;

        Ok(total.0)
    }
}

/// Counts for the four reportable statuses, assembled one query per status.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusBreakdown {
    pub new: i64,
    pub contacted: i64,
    pub won: i64,
    pub lost: i64,
}

#[derive(Clone)]
pub struct LeadStore {
    pool: Pool<Sqlite>,
}

impl LeadStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        LeadStore { pool }
    }

    /// Persists a new lead. `customer_name` must be present and non-empty;
    /// `value` falls back to 0.0 when absent or unparsable, and `status`
    /// falls back to "New" when absent or empty. Any other status string is
    /// stored verbatim, no membership check.
    pub async fn add(&self, draft: LeadDraft) -> Result<Lead, StoreError> {
        let customer_name = match draft.customer_name {
            Some(ref name) if !name.is_empty() => name,
            _ => return Err(StoreError::MissingField("customer_name")),
        };

        let value = draft
            .value
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        let status = match draft.status {
            Some(ref status) if !status.is_empty() => status.as_str(),
            _ => "New",
        };

        // SQLite stores whole-number REALs as INTEGER, so value has to be
        // cast back to REAL for the f64 column to decode.
        let mut conn = self.pool.acquire().await?;
        let lead: Lead = sqlx::query_as(
            "INSERT INTO leads (customer_name, value, status, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING id, customer_name, CAST(value AS REAL) AS value, status, created_at",
        )
        .bind(customer_name)
        .bind(value)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&mut conn)
        .await?;

        Ok(lead)
    }

    pub async fn list_all(&self) -> Result<Vec<Lead>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let leads: Vec<Lead> = sqlx::query_as(
            "SELECT id, customer_name, CAST(value AS REAL) AS value, status, created_at
             FROM leads ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(leads)
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(&mut conn)
            .await?;

        Ok(total.0)
    }

    /// Leads whose stored status text exactly equals the given one.
    /// SQLite `=` on TEXT is case-sensitive, which is what we want here.
    pub async fn count_by_status(&self, status: &LeadStatus) -> Result<i64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&mut conn)
            .await?;

        Ok(total.0)
    }

    /// Dashboard aggregation: four independent `count_by_status` queries,
    /// one per fixed status. Statuses outside the fixed four are never
    /// reported even when present in storage.
    pub async fn status_breakdown(&self) -> Result<StatusBreakdown, StoreError> {
        let mut breakdown = StatusBreakdown::default();
        for status in &LeadStatus::FIXED {
            let total = self.count_by_status(status).await?;
            match status {
                LeadStatus::New => breakdown.new = total,
                LeadStatus::Contacted => breakdown.contacted = total,
                LeadStatus::Won => breakdown.won = total,
                LeadStatus::Lost => breakdown.lost = total,
                LeadStatus::Other(_) => {}
            }
        }
        Ok(breakdown)
    }
}
