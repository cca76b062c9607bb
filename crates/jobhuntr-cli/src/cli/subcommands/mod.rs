mod application;
mod interview;
mod opportunity;

pub use application::ApplicationCommands;
pub use interview::InterviewCommands;
pub use opportunity::OpportunityCommands;
