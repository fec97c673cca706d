//! This module contains code relevant to the service's runtime, most notably
//! [`Config`].

pub mod config;
pub use config::Config;
