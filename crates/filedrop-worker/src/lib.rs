//! Filedrop Worker
//!
//! Runs the post-upload follow-ups (record write, downstream invocation, temp-file release)
//! off the request path.

pub mod follow_up;

pub use follow_up::{FollowUpConfig, FollowUpRunner};
