//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; this
//! module gives them one home for test-only utilities.

pub mod fake_authority;
