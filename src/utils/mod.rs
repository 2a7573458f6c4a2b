pub mod crypto;
pub mod mask;
pub mod time;
pub mod token;
