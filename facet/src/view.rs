//! View definitions.

use std::str::FromStr;

use log::trace;

use crate::{BaseField, Error, Field};

/// The names of the views that Facet knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewName {
    /// Exposes the base record as-is.
    Api,
    /// A human-friendly projection of the base record.
    Application,
}

impl ViewName {
    pub const ALL: [ViewName; 2] = [ViewName::Api, ViewName::Application];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Application => "application",
        }
    }
}

impl AsRef<str> for ViewName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ViewName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Ok(match lower.as_ref() {
            "api" => Self::Api,
            "application" | "app" => Self::Application,
            _ => return Err(Error::NoSuchView(s.to_string())),
        })
    }
}

/// A view is a named, alternately shaped projection of the base record.
///
/// Its fields are kept in insertion order. A slot holding `None` marks a field
/// that was intentionally removed from the view: it keeps its position but is
/// neither read nor written.
#[derive(Debug)]
pub struct View {
    name: String,
    slots: Vec<(String, Option<Field>)>,
}

impl View {
    /// Constructor for an empty view.
    pub fn new<N: AsRef<str>>(name: N) -> Self {
        Self {
            name: name.as_ref().to_string(),
            slots: Vec::new(),
        }
    }

    /// Builds a view that passes each of the given base fields through
    /// unchanged.
    pub fn boilerplate<N, I>(name: N, fields: I) -> Self
    where
        N: AsRef<str>,
        I: IntoIterator<Item = BaseField>,
    {
        let mut view = Self::new(name);
        view.slots = fields
            .into_iter()
            .map(|field| (field.as_str().to_string(), Some(Field::passthrough(field))))
            .collect();
        view
    }

    /// Obtain the name of this view.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// An iterator over the fields exposed by this view, in order. Removed
    /// fields are skipped.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.slots.iter().filter_map(|(_, field)| field.as_ref())
    }

    /// The names of all fields exposed by this view, in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields().map(Field::name).collect()
    }

    /// Get the field with the given name, if this view exposes it.
    pub fn field<N: AsRef<str>>(&self, name: N) -> Option<&Field> {
        let name = name.as_ref();
        self.fields().find(|field| field.name() == name)
    }

    /// Whether or not this view exposes a field with the given name.
    pub fn exposes<N: AsRef<str>>(&self, name: N) -> bool {
        self.field(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|(slot, _)| slot == name)
    }

    /// Removes the field with the given name from this view, keeping an empty
    /// slot in its place.
    pub fn remove_field<N: AsRef<str>>(&mut self, name: N) -> Result<(), Error> {
        let name = name.as_ref();
        let idx = self
            .position(name)
            .ok_or_else(|| Error::NoSuchField(self.name.clone(), name.to_string()))?;
        self.slots[idx].1 = None;
        trace!("Removed field {} from view {}", name, self.name);
        Ok(())
    }

    /// Replaces the existing field whose name matches that of the given
    /// field.
    pub fn alter_field(&mut self, field: Field) -> Result<(), Error> {
        let idx = self
            .position(field.name())
            .ok_or_else(|| Error::NoSuchField(self.name.clone(), field.name().to_string()))?;
        trace!("Altered field {} in view {}", field.name(), self.name);
        self.slots[idx].1 = Some(field);
        Ok(())
    }

    /// Appends the given field to this view.
    pub fn add_field(&mut self, field: Field) -> Result<(), Error> {
        if self.position(field.name()).is_some() {
            return Err(Error::FieldAlreadyExists(
                self.name.clone(),
                field.name().to_string(),
            ));
        }
        trace!("Added field {} to view {}", field.name(), self.name);
        self.slots.push((field.name().to_string(), Some(field)));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn view_name_parsing() {
        assert_eq!(ViewName::from_str("api").unwrap(), ViewName::Api);
        assert_eq!(ViewName::from_str("Application").unwrap(), ViewName::Application);
        assert!(matches!(
            ViewName::from_str("admin"),
            Err(Error::NoSuchView(_))
        ));
    }

    #[test]
    fn boilerplate_exposes_base_fields_in_order() {
        let view = View::boilerplate("test", BaseField::ALL);
        assert_eq!(view.name(), "test");
        assert_eq!(
            view.field_names(),
            vec!["id", "name", "surname", "state", "date"]
        );
    }

    #[test]
    fn setup_mutators() {
        let mut view = View::boilerplate("test", BaseField::ALL);
        view.remove_field("id").unwrap();
        assert!(!view.exposes("id"));

        view.alter_field(Field::labelled_state()).unwrap();
        view.add_field(Field::full_name()).unwrap();
        assert_eq!(
            view.field_names(),
            vec!["name", "surname", "state", "date", "fullName"]
        );

        // A removed field's slot can be filled again.
        view.alter_field(Field::passthrough(BaseField::Id)).unwrap();
        assert!(view.exposes("id"));
    }

    #[test]
    fn setup_mutators_check_field_existence() {
        let mut view = View::boilerplate("test", BaseField::ALL);
        assert!(matches!(
            view.remove_field("fullName"),
            Err(Error::NoSuchField(_, _))
        ));
        assert!(matches!(
            view.alter_field(Field::formatted_date()),
            Err(Error::NoSuchField(_, _))
        ));
        assert!(matches!(
            view.add_field(Field::passthrough(BaseField::Name)),
            Err(Error::FieldAlreadyExists(_, _))
        ));
    }
}
