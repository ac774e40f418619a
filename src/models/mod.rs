pub mod feedback;
pub mod input;
pub mod metrics;
pub mod personality;
pub mod session;

pub use feedback::*;
pub use input::*;
pub use metrics::*;
pub use personality::*;
pub use session::*;
