mod capture;
mod class;
mod command;
mod core;
mod field;
mod parameter;

pub use self::core::*;
pub use capture::*;
pub use class::*;
pub use command::*;
pub use field::*;
pub use parameter::*;
