// System Layer
pub mod executor;
pub mod launcher;
pub mod lister;

pub use executor::OperationExecutor;
pub use launcher::{Launcher, SystemLauncher};
pub use lister::DirectoryLister;

#[cfg(test)]
pub use launcher::RecordingLauncher;
