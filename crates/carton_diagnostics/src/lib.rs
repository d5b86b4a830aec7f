//! Build-message capture with named, nestable job scopes.
//!
//! Recoverable build problems (compile errors, circular dependencies) are
//! recorded into a [`BuildMessages`] capture rather than raised, so a build
//! can continue past one failing package and report everything at the end.
//! Each message is attributed to the innermost active job, a named scope
//! such as `building package foo`.

#![warn(missing_docs)]

pub mod capture;
pub mod message;

pub use capture::BuildMessages;
pub use message::BuildMessage;
