//! Property-based tests for the algebraic number core.

mod ran_properties;
mod sample_properties;
