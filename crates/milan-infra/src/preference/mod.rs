//! Preference store adapters.

pub mod file;

pub use file::FilePreferenceStore;
