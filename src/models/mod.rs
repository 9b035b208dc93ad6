pub mod coref;
pub mod edit;
pub mod record;
pub mod sentence;
pub mod token;

pub use coref::*;
pub use edit::*;
pub use record::*;
pub use sentence::*;
pub use token::*;
