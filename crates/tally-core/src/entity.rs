//! Voteable entity names and the fixed registration set.
//!
//! An [`Entity`] is only a syntactically valid name; membership in the
//! registered set is decided by the counter store. [`EntityRegistry`] holds the
//! server-owned list in configured order; stores create counters in that
//! order.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, TallyError};

/// Matches the `company_name VARCHAR(50)` column.
pub const MAX_ENTITY_LEN: usize = 50;

/// A well-formed entity name: 1..=50 ASCII letters, digits, `-` or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Entity(String);

impl Entity {
    /// Validate and wrap a raw name. Input is not trimmed or case-folded.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(TallyError::InvalidRequest("entity name must not be empty".into()));
        }
        if raw.len() > MAX_ENTITY_LEN {
            return Err(TallyError::InvalidRequest(format!(
                "entity name longer than {MAX_ENTITY_LEN} bytes"
            )));
        }
        if let Some(c) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TallyError::InvalidRequest(format!(
                "entity name contains invalid character {c:?}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Entity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, duplicate-free set of registered entities.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
}

impl EntityRegistry {
    /// Build from raw names, keeping the given order.
    /// Fails on an invalid or duplicated name, or on an empty list.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entities: Vec<Entity> = Vec::new();
        for name in names {
            let entity = Entity::parse(name.as_ref())
                .map_err(|e| TallyError::Config(format!("registered entity rejected: {e}")))?;
            if entities.contains(&entity) {
                return Err(TallyError::Config(format!("duplicate entity: {entity}")));
            }
            entities.push(entity);
        }
        if entities.is_empty() {
            return Err(TallyError::Config("entity set must not be empty".into()));
        }
        Ok(Self { entities })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityRegistry {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
