//! Browser networking glue for the `labkit` client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `backend` performs HTTP exchanges with `gloo-net`, `events` turns
//! transport side effects into reactive signal updates.

pub mod backend;
pub mod events;
