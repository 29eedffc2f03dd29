//! Concrete settings-store backends.

pub mod gsettings;

pub use gsettings::GSettings;
