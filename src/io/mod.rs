pub mod input;
pub mod m2;
pub mod output;

pub use input::*;
pub use m2::*;
pub use output::*;
