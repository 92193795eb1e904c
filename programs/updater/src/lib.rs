//! The `tm-client-updater` program: reads a config of chain pairs and prints the
//! update-client transaction body for each of them.

#![deny(clippy::nursery, clippy::pedantic, missing_docs)]

pub mod cli;
pub mod observability;
pub mod updater;
