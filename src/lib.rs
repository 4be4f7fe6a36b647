pub mod adapters;
pub mod config;
pub mod domain;
pub mod export;
pub mod router;
pub mod utils;
pub mod views;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{http::ApiClient, storage::LocalStorage};
pub use config::Settings;
pub use domain::ports::DrugApi;
pub use router::{Route, Router};
pub use utils::error::{DrugNetError, Result};
pub use views::{Rendered, ViewInput};
