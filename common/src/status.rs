use std::fmt;

/// Lead status label. The four fixed variants are the ones the dashboard
/// reports; anything else a form submits is kept verbatim as `Other` so the
/// write path never rejects a status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeadStatus {
    New,
    Contacted,
    Won,
    Lost,
    Other(String),
}

impl LeadStatus {
    /// The reportable statuses, in dashboard order. `Other` values count
    /// toward the lead total but never appear in the breakdown.
    pub const FIXED: [LeadStatus; 4] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
            LeadStatus::Other(s) => s,
        }
    }
}

// Matching is exact and case-sensitive: "won" is Other, not Won.
impl From<&str> for LeadStatus {
    fn from(s: &str) -> Self {
        match s {
            "New" => LeadStatus::New,
            "Contacted" => LeadStatus::Contacted,
            "Won" => LeadStatus::Won,
            "Lost" => LeadStatus::Lost,
            other => LeadStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
