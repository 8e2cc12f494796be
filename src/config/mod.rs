//! Runtime settings from the environment plus shared constants
//! (error causes, cookie names, pagination limits).

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
