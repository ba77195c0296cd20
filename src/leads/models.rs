use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lead status in the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    New,
    #[serde(rename = "Follow Up")]
    FollowUp,
    Prospect,
    Won,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::FollowUp => "Follow Up",
            LeadStatus::Prospect => "Prospect",
            LeadStatus::Won => "Won",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "New" => Some(LeadStatus::New),
            "Follow Up" => Some(LeadStatus::FollowUp),
            "Prospect" => Some(LeadStatus::Prospect),
            "Won" => Some(LeadStatus::Won),
            _ => None,
        }
    }

    pub fn columns() -> &'static [LeadStatus] {
        &[
            LeadStatus::New,
            LeadStatus::FollowUp,
            LeadStatus::Prospect,
            LeadStatus::Won,
        ]
    }

    /// Badge style shown for this status
    pub fn badge_style(&self) -> BadgeStyle {
        match self {
            LeadStatus::New => BadgeStyle::New,
            LeadStatus::FollowUp => BadgeStyle::Production,
            LeadStatus::Prospect => BadgeStyle::Artwork,
            LeadStatus::Won => BadgeStyle::Shipped,
        }
    }
}

/// Identity of a column. Columns configured with a label outside the
/// known statuses are kept as `Custom` and render an unstyled badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Known(LeadStatus),
    Custom(String),
}

impl StatusLabel {
    /// Parse a label as displayed on a column. Returns `None` for blank text.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        Some(match LeadStatus::from_str(s) {
            Some(status) => StatusLabel::Known(status),
            None => StatusLabel::Custom(s.to_string()),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            StatusLabel::Known(status) => status.as_str(),
            StatusLabel::Custom(label) => label,
        }
    }

    pub fn badge_style(&self) -> BadgeStyle {
        match self {
            StatusLabel::Known(status) => status.badge_style(),
            StatusLabel::Custom(_) => BadgeStyle::Unstyled,
        }
    }

    /// Badge text and style for a card living in this column
    pub fn badge(&self) -> StatusBadge {
        StatusBadge {
            text: self.as_str().to_string(),
            style: self.badge_style(),
        }
    }
}

impl From<LeadStatus> for StatusLabel {
    fn from(status: LeadStatus) -> Self {
        StatusLabel::Known(status)
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusLabel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StatusLabel::parse(&raw).ok_or_else(|| serde::de::Error::custom("status label must not be empty"))
    }
}

/// Visual style of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    New,
    Production,
    Artwork,
    Shipped,
    Unstyled,
}

impl BadgeStyle {
    pub fn token(&self) -> &'static str {
        match self {
            BadgeStyle::New => "status-new",
            BadgeStyle::Production => "status-production",
            BadgeStyle::Artwork => "status-artwork",
            BadgeStyle::Shipped => "status-shipped",
            BadgeStyle::Unstyled => "status-unstyled",
        }
    }
}

/// Rendered status badge on a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBadge {
    pub text: String,
    pub style: BadgeStyle,
}

/// Monetary value of a lead, kept as the amount the user typed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DealValue(String);

impl DealValue {
    /// Returns `None` when the input is blank or not an amount
    pub fn parse(input: &str) -> Option<Self> {
        let amount = input.trim().trim_start_matches('$').trim();
        let is_amount = amount.chars().all(Self::accepts) && amount.chars().any(|c| c.is_ascii_digit());
        is_amount.then(|| Self(amount.to_string()))
    }

    pub fn amount(&self) -> &str {
        &self.0
    }

    /// Keystrokes accepted by the value field
    pub fn accepts(c: char) -> bool {
        c.is_ascii_digit() || c == '.' || c == ','
    }
}

impl fmt::Display for DealValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// A lead card on the kanban board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub company: String,
    pub description: String,
    pub value: Option<DealValue>,
    pub created_at: DateTime<Utc>,
    pub status: StatusLabel,
    pub badge: StatusBadge,
}

impl Lead {
    pub fn new(name: impl Into<String>, company: impl Into<String>, status: StatusLabel) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            company: company.into(),
            description: String::new(),
            value: None,
            created_at: Utc::now(),
            badge: status.badge(),
            status,
        }
    }

    /// Avatar glyph: first character of the name, upper-cased
    pub fn avatar(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Rewrite both the status and the rendered badge
    pub fn set_status(&mut self, status: StatusLabel) {
        self.badge = status.badge();
        self.status = status;
    }

    pub fn time_label(&self, now: DateTime<Utc>) -> String {
        time_label(self.created_at, now)
    }
}

/// Relative label for recent timestamps, absolute date after a week
pub fn time_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    if elapsed < Duration::minutes(1) {
        "Just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.num_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed < Duration::days(7) {
        format!("{}d ago", elapsed.num_days())
    } else {
        at.format("%b %d").to_string()
    }
}
