use serde::Serialize;

/// Identifies which of the three page predicates produced an outcome.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Availability,
    NamePresence,
    LinkPresence,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Availability => "availability",
            CheckKind::NamePresence => "name_presence",
            CheckKind::LinkPresence => "link_presence",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of one predicate evaluation against one fresh fetch.
#[derive(Serialize, Debug, Clone)]
pub struct CheckOutcome {
    pub kind: CheckKind,
    pub successful: bool,
    pub details: String,
    /// Time to complete the GET, when a response arrived at all.
    pub response_time_ms: Option<i32>,
    pub timestamp_unix_ms: i64,
}

impl CheckOutcome {
    pub fn new(
        kind: CheckKind,
        successful: bool,
        details: String,
        response_time_ms: Option<i32>,
    ) -> Self {
        Self {
            kind,
            successful,
            details,
            response_time_ms,
            timestamp_unix_ms: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// All outcomes from one run of the three checks.
#[derive(Serialize, Debug, Clone)]
pub struct RunReport {
    pub target_url: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl RunReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.successful)
    }

    pub fn failed(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.successful)
    }
}
