pub mod auth;
pub mod leads;
pub mod probes;
pub mod ui;
