pub mod analyze;
pub mod feedback;
pub mod render;

pub use analyze::*;
pub use feedback::*;
pub use render::*;
