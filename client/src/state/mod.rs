//! Reactive UI state provided through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each struct here is held in an `RwSignal` created by `App`. Values are
//! plain data so they can be unit tested without a reactive runtime.

pub mod auth;
pub mod toast;
