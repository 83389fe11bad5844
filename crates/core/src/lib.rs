#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod validator;

pub use time::{Clock, Mark};
