use chrono;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,            // TEXT, required
    pub email: Option<String>,   // TEXT, optional
    pub phone: Option<String>,   // TEXT, optional
    pub company: Option<String>, // TEXT, optional
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, sqlx::FromRow)]
pub struct Lead {
    pub id: i64,
    pub customer_name: String, // TEXT, required; free text, not a foreign key
    pub value: f64,            // REAL, defaults to 0.0
    pub status: String,        // TEXT as stored; see status::LeadStatus
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Raw form payload for creating a customer. Every field is optional here;
/// presence of `name` is checked by the store, nothing else is validated.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
}

/// Raw form payload for creating a lead. `value` and `status` arrive as the
/// strings the form submitted; coercion happens in `LeadStore::add`.
#[derive(Debug, Default, Deserialize)]
pub struct LeadDraft {
    pub customer_name: Option<String>,
    pub value: Option<String>,
    pub status: Option<String>,
}
