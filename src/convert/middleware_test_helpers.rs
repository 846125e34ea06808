//! Test helpers specific to middleware testing
//!
//! The harness mounts the conversion middleware in front of the echo
//! handler, so each response reports the headers the downstream saw.
