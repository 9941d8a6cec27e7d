pub mod report;

pub use report::{print_report, render, render_summary, render_table};
