//! The base record: the single source of truth behind every view.

use serde::Serialize;

use crate::{Map, Value};

/// The closed set of fields stored in the base record.
///
/// Variants are declared in storage order, which is also the order in which
/// views built from [`BaseField::ALL`] expose them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseField {
    Id,
    Name,
    Surname,
    State,
    Date,
}

impl BaseField {
    pub const ALL: [BaseField; 5] = [
        BaseField::Id,
        BaseField::Name,
        BaseField::Surname,
        BaseField::State,
        BaseField::Date,
    ];

    /// The key under which this field is stored and exposed by passthrough
    /// views.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Surname => "surname",
            Self::State => "state",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for BaseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields that only exist in derived views and are computed from one or more
/// base fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AdditionalField {
    FormattedDate,
    FullName,
}

impl AdditionalField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FormattedDate => "formattedDate",
            Self::FullName => "fullName",
        }
    }
}

impl std::fmt::Display for AdditionalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A partial update to the base record produced by a single write-action.
pub type Patch = Map<BaseField, Value>;

/// An immutable snapshot of the base record.
///
/// Records are never modified in place: [`Record::merge`] produces a new
/// record, which the store then swaps in wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record(Map<BaseField, Value>);

impl Record {
    /// Returns the value stored under the given field, if any.
    pub fn get(&self, field: BaseField) -> Option<&Value> {
        self.0.get(&field)
    }

    /// Returns the value stored under the given field, or [`Value::Null`] if
    /// the field has never been written.
    pub fn get_or_null(&self, field: BaseField) -> Value {
        self.get(field).cloned().unwrap_or_default()
    }

    /// Applies the given patches, in order, on top of a copy of this record.
    /// Where patches overlap, the last one wins.
    pub fn merge<I>(&self, patches: I) -> Self
    where
        I: IntoIterator<Item = Patch>,
    {
        let mut merged = self.0.clone();
        for patch in patches {
            merged.extend(patch);
        }
        Self(merged)
    }
}

impl FromIterator<(BaseField, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (BaseField, Value)>>(iter: T) -> Self {
        Self(Map::from_iter(iter))
    }
}
