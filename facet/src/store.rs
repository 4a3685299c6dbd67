//! The record store keeps the base record and mediates all access to it
//! through views.

use log::{debug, trace};

use crate::{Error, Patch, Record, Registry, View, ViewData};

/// Holds the single base record along with the views through which it may be
/// read and written.
#[derive(Debug)]
pub struct RecordStore {
    registry: Registry,
    base: Record,
}

impl RecordStore {
    /// Constructor. The base record starts out empty.
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            base: Record::default(),
        }
    }

    /// Constructs a store exposing the predefined API and application views.
    pub fn predefined() -> Result<Self, Error> {
        Ok(Self::new(Registry::predefined()?))
    }

    /// The current base record.
    pub fn record(&self) -> &Record {
        &self.base
    }

    /// The views through which this store can be accessed.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Writes the given view-shaped data through the named view.
    ///
    /// Each field exposed by the view that is also present in `data` produces
    /// a patch. All patches are merged, in view order, onto a fresh copy of the
    /// base record which then replaces the current one. Entries in `data` that
    /// the view doesn't expose are ignored.
    ///
    /// Returns whether the base record was replaced. If any field fails to
    /// produce a patch, the base record is left untouched.
    ///
    /// No consistency checks are performed across fields, so when two fields
    /// touch the same base field the later one in view order wins.
    pub fn write<N: AsRef<str>>(&mut self, view: N, data: &ViewData) -> Result<bool, Error> {
        let view = self.registry.get(view)?;
        let patches = collect_patches(view, data)?;
        if patches.is_empty() {
            debug!("Nothing to write through view {}", view.name());
            return Ok(false);
        }
        debug!(
            "Writing {} field(s) through view {}",
            patches.len(),
            view.name()
        );
        self.base = self.base.merge(patches);
        trace!("Base record is now {:?}", self.base);
        Ok(true)
    }

    /// Reads the base record through the named view.
    pub fn read<N: AsRef<str>>(&self, view: N) -> Result<ViewData, Error> {
        let view = self.registry.get(view)?;
        let data = view
            .fields()
            .map(|field| (field.name().to_string(), field.read(&self.base)))
            .collect::<ViewData>();
        trace!("Read through view {}: {:?}", view.name(), data);
        Ok(data)
    }
}

fn collect_patches(view: &View, data: &ViewData) -> Result<Vec<Patch>, Error> {
    view.fields()
        .filter_map(|field| data.get(field.name()).map(|value| field.write(value)))
        .collect()
}
