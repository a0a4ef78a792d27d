//! FFI bindings for the Goaltrack GUI shell.

pub mod api;
