//! A facade that walks through loading a user record and updating it through
//! a different view than the one it was loaded through.

use eyre::{Result, WrapErr};
use log::{debug, info};
use serde::Serialize;

use crate::{AdditionalField, BaseField, Map, RecordStore, UserSource, Value, ViewData, ViewName};

/// The patch applied through the application view when none is configured.
pub fn default_patch() -> ViewData {
    ViewData::from_iter([
        (
            AdditionalField::FormattedDate.as_str().to_string(),
            Value::from("34"),
        ),
        (BaseField::State.as_str().to_string(), Value::from("passive")),
        (
            AdditionalField::FullName.as_str().to_string(),
            Value::from("fen ok"),
        ),
    ])
}

/// The state of every reported view at one point in the walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub label: String,
    /// View-shaped data, keyed by view name.
    pub views: Map<String, ViewData>,
}

/// Everything observed during a single walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Walkthrough {
    /// The record as returned by the data source.
    pub fetched: ViewData,
    /// The patch written through the application view.
    pub patch: ViewData,
    pub stages: Vec<Stage>,
}

/// Coordinates a user data source and a record store.
#[derive(Debug)]
pub struct UserService<S> {
    source: S,
    store: RecordStore,
}

impl<S: UserSource> UserService<S> {
    /// Constructor.
    pub fn new(source: S, store: RecordStore) -> Self {
        Self { source, store }
    }

    /// Access the underlying record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Loads the user from the source through the API view, then applies the
    /// given patch through the application view. The given views are read
    /// after each of the two steps.
    pub fn run<N: AsRef<str>>(&mut self, patch: ViewData, views: &[N]) -> Result<Walkthrough> {
        let fetched = self.source.fetch_user().wrap_err("failed to fetch user")?;
        info!("Fetched user: {:?}", fetched);

        self.store.write(ViewName::Api, &fetched)?;
        let loaded = self.stage("loaded", views)?;

        debug!("Applying patch through the application view: {:?}", patch);
        self.store
            .write(ViewName::Application, &patch)
            .wrap_err("failed to apply patch")?;
        let patched = self.stage("patched", views)?;

        Ok(Walkthrough {
            fetched,
            patch,
            stages: vec![loaded, patched],
        })
    }

    fn stage<N: AsRef<str>>(&self, label: &str, views: &[N]) -> Result<Stage> {
        let mut data = Map::new();
        for view in views {
            let view = view.as_ref();
            let view_data = self.store.read(view)?;
            info!("[{}] {} view: {:?}", label, view, view_data);
            data.insert(view.to_string(), view_data);
        }
        Ok(Stage {
            label: label.to_string(),
            views: data,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{value::view_data_from_json, Config, StubUserApi};
    use serde_json::json;

    fn walkthrough(patch: ViewData) -> Walkthrough {
        let store = RecordStore::predefined().unwrap();
        let mut service = UserService::new(StubUserApi, store);
        service.run(patch, &ViewName::ALL).unwrap()
    }

    #[test]
    fn default_walkthrough() {
        let result = walkthrough(default_patch());
        assert_eq!(result.stages.len(), 2);

        let loaded = &result.stages[0];
        assert_eq!(loaded.label, "loaded");
        assert_eq!(loaded.views["api"], result.fetched);
        assert_eq!(
            serde_json::to_value(&loaded.views["application"]).unwrap(),
            json!({
                "name": "alex",
                "surname": "fen",
                "fullName": "alex fen",
                "state": "active",
                "date": 2048,
                "formattedDate": "2048",
            })
        );

        let patched = &result.stages[1];
        assert_eq!(patched.label, "patched");
        assert_eq!(
            serde_json::to_value(&patched.views["api"]).unwrap(),
            json!({"id": 5, "name": "fen", "surname": "ok", "state": 0, "date": 34})
        );
        let app = &patched.views["application"];
        for (name, value) in &result.patch {
            assert_eq!(app.get(name), Some(value));
        }
        assert!(!app.contains_key("id"));
    }

    #[test]
    fn configured_patch_and_views() {
        let config = Config {
            patch: view_data_from_json(json!({"state": "inactive"})).unwrap(),
            views: vec!["app".to_string()],
        };
        let store = RecordStore::predefined().unwrap();
        let mut service = UserService::new(StubUserApi, store);
        let views = config.view_names().unwrap();
        let result = service.run(config.patch, &views).unwrap();
        let patched = &result.stages[1];
        assert_eq!(patched.views.len(), 1);
        assert_eq!(
            patched.views["application"].get("state"),
            Some(&Value::from("passive"))
        );
        assert_eq!(
            service.store().record().get(BaseField::State),
            Some(&Value::from(0_i64))
        );
    }

    #[test]
    fn unknown_views_fail_the_run() {
        let store = RecordStore::predefined().unwrap();
        let mut service = UserService::new(StubUserApi, store);
        assert!(service.run(default_patch(), &["admin"]).is_err());
    }
}
