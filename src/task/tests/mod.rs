//! Unit tests for the task domain, policy, and lifecycle service.

mod policy_tests;
mod timekeeping_tests;
pub(crate) mod support;
