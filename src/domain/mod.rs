pub mod question;
pub mod result;
pub mod test_config;

pub use question::{Choice, Question, QuestionBank, QuestionMeta};
pub use result::{AnswerDetail, TestResult, format_compact, format_hms};
pub use test_config::{QuestionSelection, SortOrder, TestConfig, TestMode};
