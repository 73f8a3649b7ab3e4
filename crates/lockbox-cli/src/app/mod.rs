//! Application-level utilities for the Lockbox CLI.
//!
//! This module provides:
//! - Application context for unified CLI + config handling
//! - Password handling with retry logic

mod context;
mod unlock;

pub use context::AppContext;
pub use unlock::unlock_with_retry;
