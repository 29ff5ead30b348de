use api::{ApiError, ProductDirectory};
use dioxus::prelude::*;

use crate::platform::{Directory, Session};

/// Centralized product state for the dashboard.
///
/// Provided as `Signal<Inventory>` via context in `DashboardView`. Operations
/// run on a clone of `directory` and only its collection is written back
/// through [`Inventory::commit`], so a failed request never touches what is on
/// screen and a filter typed meanwhile survives.
#[derive(Clone, Default)]
pub struct Inventory {
    pub directory: Option<Directory>,
    pub loading: bool,
    /// Bumped on every commit.
    pub revision: u64,
}

impl Inventory {
    /// Build a directory on the session's client and fetch the collection.
    ///
    /// The directory is returned even when the fetch fails, so the view can
    /// still offer a retry.
    pub async fn load(session: &Session) -> (Directory, Option<ApiError>) {
        let mut directory = ProductDirectory::new(session.api().clone());
        let error = directory.refresh().await.err();
        (directory, error)
    }

    /// A copy of the directory to run an operation against.
    pub fn snapshot(&self) -> Option<Directory> {
        self.directory.clone()
    }

    /// Write back the collection of a copy an operation ran on.
    pub fn commit(&mut self, updated: Directory) {
        match self.directory.as_mut() {
            Some(live) => live.adopt_collection(updated),
            None => self.directory = Some(updated),
        }
        self.loading = false;
        self.revision += 1;
    }
}

/// Consume the `Signal<Inventory>` from context.
pub fn use_inventory() -> Signal<Inventory> {
    use_context::<Signal<Inventory>>()
}
