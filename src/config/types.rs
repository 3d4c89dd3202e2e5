// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment section types.
//!
//! ```text
//! [env]                          env:
//! TESTVAR_DEFAULT_VAL = "BAR"      TESTVAR_DEFAULT_VAL: BAR
//! TESTVAR_WHITELIST = false        TESTVAR_WHITELIST: ~
//!
//! "BAR"        → EnvDefault::Literal("BAR")
//! ~ / false    → EnvDefault::PassThroughOnly
//! ```

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::core::env::container::Env;

/// Default rule for a declared environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvDefault {
    /// Use this value unless the host environment provides one.
    /// An empty string is a real value, not an absence.
    Literal(String),
    /// Only forward the host value; never invent one.
    PassThroughOnly,
}

impl EnvDefault {
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::PassThroughOnly => None,
        }
    }
}

impl Serialize for EnvDefault {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Literal(value) => serializer.serialize_str(value),
            Self::PassThroughOnly => serializer.serialize_none(),
        }
    }
}

struct EnvDefaultVisitor;

impl<'de> Visitor<'de> for EnvDefaultVisitor {
    type Value = EnvDefault;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string default, or null/false for pass-through only")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(EnvDefault::Literal(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(EnvDefault::Literal(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(EnvDefault::Literal(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(EnvDefault::Literal(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(EnvDefault::Literal(v.to_string()))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        if v {
            Err(E::custom(
                "`true` is not a valid env default; use a string, or false/null for pass-through only",
            ))
        } else {
            Ok(EnvDefault::PassThroughOnly)
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvDefault::PassThroughOnly)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvDefault::PassThroughOnly)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(Self)
    }
}

impl<'de> Deserialize<'de> for EnvDefault {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EnvDefaultVisitor)
    }
}

/// Declared environment variables in declaration order.
///
/// Names are unique; re-declaring a name replaces its default but keeps the
/// position of the first declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSection {
    entries: Vec<(String, EnvDefault)>,
}

impl EnvSection {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a variable, replacing the default of an existing declaration.
    pub fn declare(&mut self, name: impl Into<String>, default: EnvDefault) -> &mut Self {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = default;
        } else {
            self.entries.push((name, default));
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnvDefault> {
        self.entries
            .iter()
            .find_map(|(n, default)| (n == name).then_some(default))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvDefault)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces every default with the value captured in `resolved`.
    ///
    /// Variables the resolution omitted become [`EnvDefault::PassThroughOnly`].
    #[must_use]
    pub fn captured_from(&self, resolved: &Env) -> Self {
        self.names()
            .map(|name| {
                let default = resolved
                    .get_os(name)
                    .map_or(EnvDefault::PassThroughOnly, |value| {
                        EnvDefault::literal(value.to_string_lossy())
                    });
                (name.to_owned(), default)
            })
            .collect()
    }
}

impl<N: Into<String>> FromIterator<(N, EnvDefault)> for EnvSection {
    fn from_iter<I: IntoIterator<Item = (N, EnvDefault)>>(iter: I) -> Self {
        let mut section = Self::new();
        for (name, default) in iter {
            section.declare(name, default);
        }
        section
    }
}

impl Serialize for EnvSection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, default) in self.iter() {
            map.serialize_entry(name, default)?;
        }
        map.end()
    }
}

struct EnvSectionVisitor;

impl<'de> Visitor<'de> for EnvSectionVisitor {
    type Value = EnvSection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of variable names to defaults")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut section = EnvSection::new();
        while let Some((name, default)) = access.next_entry::<String, EnvDefault>()? {
            section.declare(name, default);
        }
        Ok(section)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvSection::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(EnvSection::new())
    }
}

impl<'de> Deserialize<'de> for EnvSection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EnvSectionVisitor)
    }
}
