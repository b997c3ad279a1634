pub mod base;
pub mod console;

pub use base::BaseChannel;
