//! Configuration module

mod fallbacks;
mod site;

pub use fallbacks::Fallbacks;
pub use site::SiteConfig;
