//! Static site builder around `mdsite-core`.
//!
//! The binary (`mdsite`) is a thin clap front end; configuration loading and
//! site generation live here so they can be tested directly.

pub mod config;
pub mod site;

pub use config::{normalize_base_path, ConfigError, Overrides, SiteConfig};
pub use site::{build_site, check_destination, render_page, BuildReport, SiteError, Template};
