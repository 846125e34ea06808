//! Property-based testing for the header conversion invariants
//!
//! Generators and invariant checks over arbitrary header bytes and
//! conversion configurations.

mod transform_invariants;
