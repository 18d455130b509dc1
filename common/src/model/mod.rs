pub mod alert;
pub mod investigation;
pub mod record;
pub mod session;
