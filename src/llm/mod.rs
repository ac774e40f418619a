pub mod client;
pub mod gemini;
pub mod personality;
pub mod prompts;
pub mod response;
pub mod validation;

pub use client::*;
pub use gemini::*;
pub use personality::*;
pub use prompts::*;
pub use response::*;
pub use validation::*;
