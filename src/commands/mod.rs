//! Request/response entry points exposed to the UI process.

pub mod providers;
