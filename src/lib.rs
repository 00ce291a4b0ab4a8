pub mod cli;
pub mod error;
pub mod fetch;
pub mod model;
pub mod palette;
pub mod render;
