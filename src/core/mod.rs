//! Core application primitives (scanner, scheduler, HTTP surface)

pub mod http;
pub mod retry;
pub mod scanner;
pub mod scheduler;

pub use http::*;
pub use retry::*;
pub use scanner::*;
pub use scheduler::*;
