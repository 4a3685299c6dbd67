//! Facet keeps several differently shaped views of a single record
//! consistent.
//!
//! A single base record is stored in a [`RecordStore`]. It can only be read
//! and written through a [`View`], each of which translates between its own
//! field shape and that of the base record by way of per-field read and write
//! transforms (see [`Field`]). For Facet's command line walkthrough, see the
//! `facet-cli` crate.

mod config;
mod error;
mod field;
mod record;
mod registry;
mod service;
mod source;
mod store;
pub mod value;
mod view;

pub use config::Config;
pub use error::Error;
pub use field::{
    Field, ReadAction, WriteAction, STATE_ACTIVE_CODE, STATE_ACTIVE_LABEL, STATE_PASSIVE_CODE,
    STATE_PASSIVE_LABEL,
};
pub use record::{AdditionalField, BaseField, Patch, Record};
pub use registry::Registry;
pub use service::{default_patch, Stage, UserService, Walkthrough};
pub use source::{StubUserApi, UserSource};
pub use store::RecordStore;
pub use value::{Map, Value, ViewData};
pub use view::{View, ViewName};
