//! Builtins installed into every realm: the function prototype's call,
//! apply and bind, and the console object.

pub mod console;
pub mod core;
pub mod function;

pub use self::core::register_builtins;
