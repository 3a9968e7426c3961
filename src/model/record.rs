//! User records as delivered by the record source

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a record. Sources send either strings or numbers.
pub type RecordId = String;

/// Role of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Member,
    Admin,
    Moderator,
    Guest,
    /// A role outside the known set, kept exactly as loaded
    Other(String),
}

impl Role {
    /// The roles offered by the edit dialog
    pub fn selectable() -> [Role; 4] {
        [Role::Member, Role::Admin, Role::Moderator, Role::Guest]
    }

    /// Parse a role name case-insensitively, keeping unknown values verbatim
    pub fn parse(value: &str) -> Role {
        match value.trim().to_lowercase().as_str() {
            "member" => Role::Member,
            "admin" => Role::Admin,
            "moderator" => Role::Moderator,
            "guest" => Role::Guest,
            _ => Role::Other(value.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Guest => "guest",
            Role::Other(raw) => raw,
        }
    }

    /// Next selectable role, wrapping around. Unknown roles move to the first.
    pub fn next(&self) -> Role {
        let roles = Role::selectable();
        match roles.iter().position(|r| r == self) {
            Some(i) => roles[(i + 1) % roles.len()].clone(),
            None => roles[0].clone(),
        }
    }

    /// Previous selectable role, wrapping around
    pub fn previous(&self) -> Role {
        let roles = Role::selectable();
        match roles.iter().position(|r| r == self) {
            Some(0) | None => roles[roles.len() - 1].clone(),
            Some(i) => roles[i - 1].clone(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single user entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRecord", into = "RawRecord")]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    /// Role text as loaded, when it differs from `role.label()`
    role_text: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, name: &str, email: &str, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            role_text: None,
        }
    }

    /// Role as shown to the user: the loaded text until the role is edited
    pub fn role_label(&self) -> &str {
        self.role_text.as_deref().unwrap_or(self.role.label())
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.role_text = None;
    }

    /// Case-insensitive substring match on name, email or role.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.role_label().to_lowercase().contains(needle)
    }
}

/// Wire shape of a record. Fields other than `id` are taken as they come:
/// missing or `null` becomes empty, other non-string values keep their JSON text.
#[derive(Serialize, Deserialize)]
struct RawRecord {
    #[serde(deserialize_with = "id_from_string_or_number")]
    id: RecordId,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    role: Option<String>,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        let (role, role_text) = match raw.role {
            Some(text) => {
                let role = Role::parse(&text);
                let role_text = (text != role.label()).then_some(text);
                (role, role_text)
            }
            None => (Role::default(), None),
        };
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            email: raw.email.unwrap_or_default(),
            role,
            role_text,
        }
    }
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        let role = record.role_label().to_string();
        Self {
            id: record.id,
            name: Some(record.name),
            email: Some(record.email),
            role: Some(role),
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Partial field changes for an open edit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl RecordPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    /// Merge the set fields into `record`
    pub fn apply_to(self, record: &mut Record) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(email) = self.email {
            record.email = email;
        }
        if let Some(role) = self.role {
            record.set_role(role);
        }
    }
}
