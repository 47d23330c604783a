//! rusty-bnb library - listing store, statistics engine and shell
//!
//! The binary is a thin wrapper around [`app::ListingShell`]; everything is
//! exposed here so the shell, the sample generator and the tests share it.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use app::ListingShell;
pub use config::Config;
pub use data::filter::{FilterCriteria, NumericRange};
pub use data::model::{Listing, ListingStore};
pub use data::stats::{ColumnStatistics, Description, Dispersion, HostRank, Summary};
pub use error::DataError;
