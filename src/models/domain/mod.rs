pub mod question;
pub mod quiz;
pub mod submission;
pub mod user;
pub use question::Question;
pub use quiz::Quiz;
pub use submission::Submission;
pub use user::User;
