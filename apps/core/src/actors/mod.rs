pub mod companion;
pub mod messages;
pub mod traits;
