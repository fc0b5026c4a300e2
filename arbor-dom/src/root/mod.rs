mod registry;
mod snapshot;

pub use registry::{Root, RootRegistry};
pub use snapshot::{ContainerSnapshot, RegistrySnapshot, RootSnapshot, TreeSnapshot};
