//! Resource kinds and the record type shared by every kind.
//!
//! A [`Record`] is deliberately schemaless: apart from its identity and
//! timestamps it is a flat JSON attribute map, so the same type carries a
//! State, a Place or a Review.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Timestamp layout used by `to_dict` and the file storage format.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Key holding the class name in serialized records.
pub const CLASS_KEY: &str = "__class__";

/// Keys owned by the storage layer. They never come from a request body.
pub const RESERVED_KEYS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_KEY];

/// The six resource kinds exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceKind {
    State,
    City,
    Amenity,
    User,
    Place,
    Review,
}

impl ResourceKind {
    /// Every kind, in declaration order.
    pub const ALL: [ResourceKind; 6] = [
        Self::State,
        Self::City,
        Self::Amenity,
        Self::User,
        Self::Place,
        Self::Review,
    ];

    /// Class name as written in `__class__` and storage keys.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::User => "User",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Error returned when a class name does not match any kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource class: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// A stored instance of any resource kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: ResourceKind,
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: Map<String, Value>,
}

impl Record {
    /// Create a fresh record with a new id and both timestamps set to now.
    ///
    /// Reserved keys present in `attributes` are dropped.
    pub fn new(kind: ResourceKind, attributes: Map<String, Value>) -> Self {
        let now = Utc::now();
        let mut record = Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: Map::new(),
        };
        for (key, value) in attributes {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                record.attributes.insert(key, value);
            }
        }
        record
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Look up an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attribute as a string slice, if it is a JSON string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Assign an attribute, overwriting any previous value.
    ///
    /// Reserved keys are ignored so identity and timestamps stay intact.
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return;
        }
        self.attributes.insert(key, value);
    }

    /// Flat JSON representation including id, timestamps and class name.
    pub fn to_dict(&self) -> Map<String, Value> {
        let mut dict = self.attributes.clone();
        dict.insert("id".to_string(), Value::String(self.id.clone()));
        dict.insert(
            "created_at".to_string(),
            Value::String(format_timestamp(self.created_at)),
        );
        dict.insert(
            "updated_at".to_string(),
            Value::String(format_timestamp(self.updated_at)),
        );
        dict.insert(
            CLASS_KEY.to_string(),
            Value::String(self.kind.class_name().to_string()),
        );
        dict
    }

    /// Rebuild a record from its `to_dict` form.
    pub fn from_dict(mut dict: Map<String, Value>) -> Result<Self, RecordError> {
        let kind = take_string(&mut dict, CLASS_KEY)?
            .parse::<ResourceKind>()
            .map_err(|e| RecordError::Invalid(e.to_string()))?;
        let id = take_string(&mut dict, "id")?;
        let created_at = parse_timestamp(&take_string(&mut dict, "created_at")?)?;
        let updated_at = parse_timestamp(&take_string(&mut dict, "updated_at")?)?;

        Ok(Self {
            kind,
            id,
            created_at,
            updated_at,
            attributes: dict,
        })
    }
}

/// Errors raised while decoding a serialized record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid record: {0}")]
    Invalid(String),
}

fn take_string(dict: &mut Map<String, Value>, key: &'static str) -> Result<String, RecordError> {
    match dict.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(RecordError::Invalid(format!(
            "`{key}` must be a string, got {other}"
        ))),
        None => Err(RecordError::MissingField(key)),
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RecordError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| RecordError::Invalid(format!("bad timestamp {raw:?}: {e}")))
}
