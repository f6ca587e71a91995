//! Listing source implementations.
//!
//! Each module provides a struct implementing [`crate::adapter::SourceAdapter`].
//! Only [`PlacesAdapter`] performs I/O; the others are extension points.

pub mod directory;
pub mod filings;
pub mod places;
pub mod registry;

pub use directory::DirectoryAdapter;
pub use filings::FilingsAdapter;
pub use places::PlacesAdapter;
pub use registry::RegistryAdapter;
