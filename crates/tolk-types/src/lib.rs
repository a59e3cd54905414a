pub mod error;
pub mod forms;
pub mod submission;

pub use error::{Rule, SubmissionErrors, ValidationError};
pub use forms::Form;
pub use submission::{StoreMessageValue, Submitted, ValidMessageValue};
