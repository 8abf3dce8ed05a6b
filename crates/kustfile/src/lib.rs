//! Creation of kustomization files, with auto-detection of the Kubernetes
//! resources in a directory tree.

pub mod create;
pub mod detect;
pub mod kustomization;
pub mod kvpair;
pub mod paths;
pub mod probe;
pub mod store;

pub use create::{create, CreateError, CreateOptions};
pub use kustomization::Kustomization;
pub use store::{KustomizationFile, StoreError};
