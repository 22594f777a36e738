//! App registry: the set of installable apps, keyed by [`ApplicationId`].

use desktop_app_contract::{AppCategory, AppDescriptor, ApplicationId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Registry lookup and registration failures.
pub enum RegistryError {
    /// An app with this id is already registered. The first registration stays active.
    #[error("app `{0}` is already registered")]
    DuplicateAppId(ApplicationId),
    /// No app with this id is registered.
    #[error("app `{0}` is not registered")]
    NotFound(ApplicationId),
}

#[derive(Debug, Default, Clone)]
/// Registered app descriptors in registration order.
///
/// There is no removal; descriptors live as long as the registry.
pub struct AppRegistry {
    apps: Vec<AppDescriptor>,
    revision: u64,
}

impl AppRegistry {
    /// Adds `descriptor` unless its id is taken.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateAppId`] and leaves the registry unchanged when the id
    /// already exists.
    pub fn register(&mut self, descriptor: AppDescriptor) -> Result<(), RegistryError> {
        if self.contains(&descriptor.id) {
            return Err(RegistryError::DuplicateAppId(descriptor.id));
        }
        self.apps.push(descriptor);
        self.revision += 1;
        Ok(())
    }

    /// Registers every descriptor, collecting duplicate-id failures instead of stopping.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = AppDescriptor>,
    ) -> Vec<RegistryError> {
        descriptors
            .into_iter()
            .filter_map(|descriptor| self.register(descriptor).err())
            .collect()
    }

    /// Returns the descriptor registered under `app_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for unknown ids.
    pub fn lookup(&self, app_id: &ApplicationId) -> Result<&AppDescriptor, RegistryError> {
        self.apps
            .iter()
            .find(|app| &app.id == app_id)
            .ok_or_else(|| RegistryError::NotFound(app_id.clone()))
    }

    pub fn contains(&self, app_id: &ApplicationId) -> bool {
        self.apps.iter().any(|app| &app.id == app_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Apps tagged with `category`, in registration order.
    pub fn apps_in_category(&self, category: AppCategory) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter().filter(move |app| app.category == category)
    }

    /// Distinct categories in order of first registration.
    pub fn categories(&self) -> Vec<AppCategory> {
        let mut categories = Vec::new();
        for app in &self.apps {
            if !categories.contains(&app.category) {
                categories.push(app.category);
            }
        }
        categories
    }

    /// Bumped on every successful registration so views can tell when launchers changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
