pub mod formatter;

pub use formatter::{format_report, format_weights, should_use_colors};
