pub mod compiler;
pub mod generator;
pub mod runner;
pub mod scoring;

pub use compiler::compile;
pub use generator::{TestSession, generate};
pub use runner::{ModeState, Phase, TestRunner, UserSession};
pub use scoring::{Answer, correct_letters, grade, is_multi_answer};
