//! Terminal front end for the paginated artwork table.

pub mod logging;
pub mod render;
pub mod repl;
pub mod settings;
