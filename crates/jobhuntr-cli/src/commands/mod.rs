pub mod application;
pub mod dispatch;
pub mod interview;
pub mod opportunity;
pub mod reconcile;
