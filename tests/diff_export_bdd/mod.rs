//! Support modules for the diff export BDD tests.

pub(crate) mod state;

pub(crate) use state::DiffExportState;
