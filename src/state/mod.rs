/// State management module
///
/// This module handles all session-scoped application state, including:
/// - Navigation and selection drill-down (nav.rs)
/// - The current generation run lifecycle (run.rs)

pub mod nav;
pub mod run;
