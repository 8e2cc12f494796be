//! Utility functions shared by request payloads.

pub mod validation;
