pub mod config;
pub mod logging;

pub mod artifact;
pub mod fetch;
pub mod generate;
pub mod merge;
pub mod normalize;
pub mod registry;
