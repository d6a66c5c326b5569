pub mod ai;
pub mod math;
pub mod providers;

pub use ai::{AiDelegate, AiError, ShortAnswerDelegate};
pub use math::MathError;
