//! Leads present when the board opens.
//!
//! A seed file plays the role of the leads already on the page before any
//! interaction. It is read once at start-up and never written back.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::Path;

/// A lead as written in a seed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedLead {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub value: Option<String>,
    /// Column label the lead starts in
    pub status: String,
    /// RFC 3339, quoted or as a native TOML datetime
    #[serde(default, deserialize_with = "deserialize_created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Text(DateTime<Utc>),
    Toml(toml::value::Datetime),
}

fn deserialize_created_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<Timestamp>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Timestamp::Text(at)) => Ok(Some(at)),
        Some(Timestamp::Toml(at)) => DateTime::parse_from_rfc3339(&at.to_string())
            .map(|at| Some(at.with_timezone(&Utc)))
            .map_err(|_| de::Error::custom(format!("created_at {} needs a date, a time and a UTC offset", at))),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub leads: Vec<SeedLead>,
}

/// Load seed leads from a `.toml` or `.json` file
pub fn load(path: &Path) -> Result<Vec<SeedLead>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {:?}", path))?;
    let file = parse(&content, path)?;
    tracing::info!(path = %path.display(), count = file.leads.len(), "loaded seed leads");
    Ok(file.leads)
}

fn parse(content: &str, path: &Path) -> Result<SeedFile> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON seed file {:?}", path)),
        Some("toml") | None => toml::from_str(content)
            .with_context(|| format!("Failed to parse TOML seed file {:?}", path)),
        Some(other) => anyhow::bail!("Unsupported seed file extension: .{}", other),
    }
}

/// Built-in leads used when no seed file is given
pub fn demo_leads() -> Vec<SeedLead> {
    let now = Utc::now();
    let lead = |name: &str, company: &str, description: &str, value: Option<&str>, status: &str, age: Duration| SeedLead {
        name: name.to_string(),
        company: company.to_string(),
        description: description.to_string(),
        value: value.map(str::to_string),
        status: status.to_string(),
        created_at: Some(now - age),
    };

    vec![
        lead("Sarah Mitchell", "Brightline Apparel", "Wants quote on 500 custom tees for spring event", Some("2,400"), "New", Duration::minutes(12)),
        lead("Marcus Chen", "Peak Fitness Co", "Inquired about DTF transfers for gym merch", None, "New", Duration::hours(3)),
        lead("Elena Rodriguez", "Coastal Coffee", "Follow up on sample pack sent last week", Some("850"), "Follow Up", Duration::days(1)),
        lead("James Walker", "Ridgeview High School", "Needs pricing for team uniforms, call back Friday", Some("3,200"), "Follow Up", Duration::days(2)),
        lead("Priya Patel", "Bloom Events", "Reviewing proposal for wedding favors", Some("1,150"), "Prospect", Duration::days(4)),
        lead("Tom Becker", "Becker Landscaping", "Signed for 200 polos with embroidered logo", Some("4,800"), "Won", Duration::days(9)),
    ]
}
