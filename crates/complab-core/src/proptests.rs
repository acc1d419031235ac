//! Property-based tests for the data model.
