//! Field descriptors: the pair of transforms that translate a single field
//! between a view's shape and the base record's shape.

use crate::{AdditionalField, BaseField, Error, Patch, Record, Value};

/// Maps an external (view-shaped) value to a partial base record patch.
pub type WriteAction = Box<dyn Fn(&Value) -> Result<Patch, Error>>;

/// Maps the current base record to an external (view-shaped) value.
pub type ReadAction = Box<dyn Fn(&Record) -> Value>;

/// The stored code of an active user.
pub const STATE_ACTIVE_CODE: f64 = 1.0;
/// The stored code of any user that is not active.
pub const STATE_PASSIVE_CODE: f64 = 0.0;
pub const STATE_ACTIVE_LABEL: &str = "active";
pub const STATE_PASSIVE_LABEL: &str = "passive";

/// A single field exposed by a view.
pub struct Field {
    name: String,
    write: WriteAction,
    read: ReadAction,
}

impl Field {
    /// Constructor.
    pub fn new<N, W, R>(name: N, write: W, read: R) -> Self
    where
        N: AsRef<str>,
        W: Fn(&Value) -> Result<Patch, Error> + 'static,
        R: Fn(&Record) -> Value + 'static,
    {
        Self {
            name: name.as_ref().to_string(),
            write: Box::new(write),
            read: Box::new(read),
        }
    }

    /// A field that exposes the given base field as-is, under the same name.
    pub fn passthrough(field: BaseField) -> Self {
        Self::new(
            field.as_str(),
            move |value| Ok(Patch::from_iter([(field, value.clone())])),
            move |record| record.get_or_null(field),
        )
    }

    /// Combines the name and surname into a single space-separated string.
    ///
    /// Writing splits the input on single spaces: the first token becomes the
    /// name and the second the surname. A missing token is stored as
    /// [`Value::Null`] and any tokens past the second are ignored.
    pub fn full_name() -> Self {
        let name = AdditionalField::FullName.as_str();
        Self::new(
            name,
            move |value| {
                let full_name = value.as_str().ok_or_else(|| Error::UnexpectedType {
                    field: name.to_string(),
                    expected: "string",
                    got: value.type_name().to_string(),
                })?;
                let mut tokens = full_name.split(' ').map(Value::from);
                Ok(Patch::from_iter([
                    (BaseField::Name, tokens.next().unwrap_or_default()),
                    (BaseField::Surname, tokens.next().unwrap_or_default()),
                ]))
            },
            |record| {
                Value::String(format!(
                    "{} {}",
                    record.get_or_null(BaseField::Name),
                    record.get_or_null(BaseField::Surname)
                ))
            },
        )
    }

    /// Exposes the numeric date as a string.
    ///
    /// Input that doesn't parse as a number is stored as NaN.
    pub fn formatted_date() -> Self {
        Self::new(
            AdditionalField::FormattedDate.as_str(),
            |value| {
                Ok(Patch::from_iter([(
                    BaseField::Date,
                    Value::Number(value.to_number()),
                )]))
            },
            |record| match record.get(BaseField::Date) {
                Some(date) => Value::String(date.to_string()),
                None => Value::Null,
            },
        )
    }

    /// Maps the coded state to a human-readable label.
    ///
    /// Only the exact string `"active"` maps to the active code; anything else
    /// is stored as passive. Likewise any stored code other than the active
    /// one reads back as `"passive"`.
    pub fn labelled_state() -> Self {
        Self::new(
            BaseField::State.as_str(),
            |value| {
                let code = match value.as_str() {
                    Some(STATE_ACTIVE_LABEL) => STATE_ACTIVE_CODE,
                    _ => STATE_PASSIVE_CODE,
                };
                Ok(Patch::from_iter([(BaseField::State, Value::Number(code))]))
            },
            |record| match record.get(BaseField::State) {
                Some(Value::Number(code)) if *code == STATE_ACTIVE_CODE => {
                    Value::from(STATE_ACTIVE_LABEL)
                }
                _ => Value::from(STATE_PASSIVE_LABEL),
            },
        )
    }

    /// The external name of this field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Translates an external value into a base record patch.
    pub fn write(&self, value: &Value) -> Result<Patch, Error> {
        (self.write)(value)
    }

    /// Computes this field's external value from the given base record.
    pub fn read(&self, record: &Record) -> Value {
        (self.read)(record)
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}
