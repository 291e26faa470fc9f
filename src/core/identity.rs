//! Layer 1: Identity atoms
//!
//! BookId: catalog identifier, canonical-string with numeric coercion
//! CopyId / ShipmentId / ReportId: per-entity identifiers
//! ActorId: attribution recorded on log entries

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{CoreError, InvalidId};

/// Catalog book identifier.
///
/// Baseline data mixes string and numeric ids for the same records, so the
/// canonical form is the string rendering and deserialization accepts both.
/// Two `BookId`s are equal iff their canonical strings are equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidId::Book {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(s))
        }
    }

    /// Constructor for ids baked into the crate (seed data, placeholders),
    /// which are known non-empty.
    pub(crate) fn from_trusted(s: &'static str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical-string comparison against an untyped id, matching the
    /// loose equality the console uses for query parameters.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl serde::de::Visitor<'_> for Visitor {
            type Value = BookId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer book id")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<BookId, E> {
                BookId::new(v).map_err(E::custom)
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<BookId, E> {
                Ok(BookId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<BookId, E> {
                Ok(BookId(v.to_string()))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

impl fmt::Debug for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BookId({:?})", self.0)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_id {
    ($name:ident, $variant:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
                let s = s.into();
                if s.trim().is_empty() {
                    Err(InvalidId::$variant {
                        raw: s,
                        reason: "empty".into(),
                    }
                    .into())
                } else {
                    Ok(Self(s))
                }
            }

            #[allow(dead_code)]
            pub(crate) fn from_trusted(s: &'static str) -> Self {
                Self(s.to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({:?})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id!(CopyId, Copy, "Physical copy identifier in the shelving queue.");
string_id!(ShipmentId, Shipment, "Inter-branch shipment identifier.");
string_id!(
    ActorId,
    Actor,
    "Attribution string recorded on activity-log entries."
);

/// Shipment report identifier.
///
/// Assigned from the originating `ShipmentId` but a distinct identity space:
/// resolving a report never reaches back into the shipment.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    pub fn new(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.trim().is_empty() {
            Err(InvalidId::Report {
                raw: s,
                reason: "empty".into(),
            }
            .into())
        } else {
            Ok(Self(s))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&ShipmentId> for ReportId {
    fn from(id: &ShipmentId) -> Self {
        Self(id.as_str().to_string())
    }
}

impl fmt::Debug for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReportId({:?})", self.0)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
