pub mod user;
pub mod announcement;
pub mod feedback;
pub mod tag;
pub mod display;

pub use user::*;
pub use announcement::*;
pub use feedback::*;
pub use tag::*;
pub use display::*;
