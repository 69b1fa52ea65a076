#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod index;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;

#[cfg(feature = "cli")]
pub use cli::run;
