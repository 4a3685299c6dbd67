//! The set of views through which the base record can be accessed.

use log::debug;

use crate::{BaseField, Error, Field, Map, View, ViewName};

/// Named views, built once at startup and never modified afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    views: Map<String, View>,
}

impl Registry {
    /// Constructor for an empty registry.
    pub fn new() -> Self {
        Self { views: Map::new() }
    }

    /// A registry holding both the API and application views.
    pub fn predefined() -> Result<Self, Error> {
        Self::new()
            .with(Self::api_view())?
            .with(Self::application_view()?)
    }

    /// Convenience method for constructing a registry.
    pub fn with(mut self, view: View) -> Result<Self, Error> {
        self.register(view)?;
        Ok(self)
    }

    /// Adds the given view, returning an error if a view with the same name
    /// already exists.
    pub fn register(&mut self, view: View) -> Result<(), Error> {
        let name = view.name().to_string();
        if self.views.contains_key(&name) {
            return Err(Error::ViewAlreadyExists(name));
        }
        debug!("Registered view {} with fields {:?}", name, view.field_names());
        self.views.insert(name, view);
        Ok(())
    }

    /// Get the view with the given name.
    pub fn get<N: AsRef<str>>(&self, name: N) -> Result<&View, Error> {
        let name = name.as_ref();
        self.views
            .get(name)
            .ok_or_else(|| Error::NoSuchView(name.to_string()))
    }

    /// The names of all registered views, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    /// The API view passes every base field through unchanged.
    pub fn api_view() -> View {
        View::boilerplate(ViewName::Api, BaseField::ALL)
    }

    /// The application view hides the identifier, labels the state and adds
    /// the derived `formattedDate` and `fullName` fields.
    pub fn application_view() -> Result<View, Error> {
        let mut view = View::boilerplate(ViewName::Application, BaseField::ALL);
        view.remove_field(BaseField::Id.as_str())?;
        view.add_field(Field::formatted_date())?;
        view.add_field(Field::full_name())?;
        view.alter_field(Field::labelled_state())?;
        Ok(view)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::AdditionalField;

    #[test]
    fn predefined_registry_holds_both_views() {
        let registry = Registry::predefined().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["api", "application"]);
        assert!(registry.get(ViewName::Api).is_ok());
        assert!(matches!(registry.get("admin"), Err(Error::NoSuchView(_))));
    }

    #[test]
    fn duplicate_views_are_rejected() {
        let result = Registry::new()
            .with(Registry::api_view())
            .and_then(|r| r.with(Registry::api_view()));
        assert!(matches!(result, Err(Error::ViewAlreadyExists(_))));
    }

    #[test]
    fn application_view_shape() {
        let view = Registry::application_view().unwrap();
        assert_eq!(
            view.field_names(),
            vec!["name", "surname", "state", "date", "formattedDate", "fullName"]
        );
    }

    #[test]
    fn api_view_hides_derived_fields() {
        let view = Registry::api_view();
        assert!(view.exposes("id"));
        assert!(!view.exposes(AdditionalField::FullName.as_str()));
        assert!(!view.exposes(AdditionalField::FormattedDate.as_str()));
    }
}
