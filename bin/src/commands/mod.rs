//! CLI command implementations.

pub(crate) mod columns;
pub(crate) mod fetch;
