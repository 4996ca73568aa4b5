//! Command-line support helpers.
//!
//! - [`file_list`]: expands `--dir` arguments into the `.prg` files below them

pub mod file_list;

pub use file_list::{create_file_list, is_prg};
