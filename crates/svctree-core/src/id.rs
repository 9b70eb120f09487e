//! ID generation for catalog entities
//!
//! Hash-based IDs, unique within a running session.
//! Format: prefix-xxxxxxxx (8 lowercase alphanumeric chars)

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use uuid::Uuid;

pub const DEFAULT_CATEGORY_PREFIX: &str = "cat";
pub const DEFAULT_SERVICE_PREFIX: &str = "svc";

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Identifier of a category (e.g. `cat1`, `cat-4k2m9q0z`)
    CategoryId
}

string_id! {
    /// Identifier of a service (e.g. `svc1`, `svc-0x7gh3ba`)
    ServiceId
}

/// Generate a random ID with the given prefix
///
/// Uses UUID + timestamp hash, encoded as base32 lowercase.
/// May collide in principle; [`IdGenerator`] re-draws when it does.
pub fn generate_id(prefix: &str) -> String {
    let uuid = Uuid::new_v4();
    let timestamp = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);

    let mut hasher = Sha256::new();
    hasher.update(uuid.as_bytes());
    hasher.update(timestamp.to_le_bytes());

    let hash = hasher.finalize();

    // 5 bytes = 40 bits = exactly 8 base32 chars, no padding
    let encoded = base32::encode(base32::Alphabet::Crockford, &hash[..5]).to_lowercase();

    format!("{}-{}", prefix, encoded)
}

/// Session-scoped ID source shared by both stores
///
/// Remembers every ID it has handed out or been told about, so a fresh ID
/// never repeats an earlier one or a seed ID.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    category_prefix: String,
    service_prefix: String,
    known: HashSet<String>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::with_prefixes(DEFAULT_CATEGORY_PREFIX, DEFAULT_SERVICE_PREFIX)
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefixes(category_prefix: &str, service_prefix: &str) -> Self {
        Self {
            category_prefix: category_prefix.to_string(),
            service_prefix: service_prefix.to_string(),
            known: HashSet::new(),
        }
    }

    /// Mark an externally assigned ID as taken
    ///
    /// Returns false if it was already known.
    pub fn reserve(&mut self, id: impl AsRef<str>) -> bool {
        self.known.insert(id.as_ref().to_string())
    }

    pub fn is_known(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    pub fn next_category_id(&mut self) -> CategoryId {
        CategoryId(draw_unique(&mut self.known, &self.category_prefix))
    }

    pub fn next_service_id(&mut self) -> ServiceId {
        ServiceId(draw_unique(&mut self.known, &self.service_prefix))
    }
}

fn draw_unique(known: &mut HashSet<String>, prefix: &str) -> String {
    loop {
        let id = generate_id(prefix);
        if known.insert(id.clone()) {
            return id;
        }
    }
}
