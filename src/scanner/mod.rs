//! System scans feeding the declaration builders.

pub mod desktop;
