//! paylog turns a copied purchase history into a dataset and explores it: totals, date and
//! channel filters, and tables grouped by day, month and channel.

pub mod args;
pub mod commands;
mod config;
mod error;
pub mod extract;
pub mod handlers;
pub mod help;
pub mod model;
pub mod query;
pub mod scheduler;
pub mod session;
pub mod store;
mod utils;
pub mod validate;
pub mod view;

#[cfg(test)]
mod test;

pub use config::Config;
pub use error::{Error, ErrorType, Result};
