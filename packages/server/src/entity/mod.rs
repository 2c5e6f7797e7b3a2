pub mod candidate;
pub mod candidate_interview;
pub mod interview;
pub mod interview_question;
pub mod question;
pub mod video;
