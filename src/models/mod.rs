pub mod battle;
pub mod error;
pub mod league;
pub mod reference;
pub mod tier;
pub mod trainer;

pub use battle::*;
pub use error::*;
pub use league::*;
pub use reference::*;
pub use tier::*;
pub use trainer::*;
