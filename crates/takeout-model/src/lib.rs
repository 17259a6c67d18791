pub mod bookmark;
pub mod added_at;

pub use bookmark::*;
pub use added_at::*;
