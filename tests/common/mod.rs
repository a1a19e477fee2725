//! Common test utilities and fixtures for the salted-aead test suite.
//!
//! Shared test data, key material and random helpers used across the
//! functional, compatibility, stress and property-based suites.

pub mod fixtures;
