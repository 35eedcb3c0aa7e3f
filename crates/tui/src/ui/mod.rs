pub mod components;
pub mod runtime;
