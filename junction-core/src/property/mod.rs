//! Property-based tests for the merge walk and bridge search.
//!
//! Runs generated point clouds through the library and compares the results
//! against a naive relabelling oracle that shares no code with the forest.

mod oracle;
mod strategies;
#[cfg(test)]
mod tests;
