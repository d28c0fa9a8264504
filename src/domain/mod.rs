pub mod activity;
pub mod attendance;
pub mod contribution;
pub mod member;
pub mod reports;

pub use activity::*;
pub use attendance::*;
pub use contribution::*;
pub use member::*;
pub use reports::*;
