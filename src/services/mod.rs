pub mod quiz_service;
pub mod scoring;
pub mod slug_service;
pub mod submission_service;
pub mod user_service;
