//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read and write shared state from Leptos context providers
//! installed by `App`.

pub mod guard;
pub mod nav_menu;
pub mod toast_stack;
