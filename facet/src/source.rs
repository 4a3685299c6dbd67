//! Data source handling.

use crate::{BaseField, Error, Value, ViewData};

/// A source of user records, shaped according to the API view.
pub trait UserSource {
    /// Fetch the current user record.
    fn fetch_user(&self) -> Result<ViewData, Error>;
}

/// A stand-in for the user REST API that always returns the same record.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubUserApi;

impl UserSource for StubUserApi {
    fn fetch_user(&self) -> Result<ViewData, Error> {
        Ok(ViewData::from_iter(
            [
                (BaseField::Id, Value::from(5_i64)),
                (BaseField::Name, Value::from("alex")),
                (BaseField::Surname, Value::from("fen")),
                (BaseField::State, Value::from(1_i64)),
                (BaseField::Date, Value::from(2048_i64)),
            ]
            .map(|(field, value)| (field.as_str().to_string(), value)),
        ))
    }
}
