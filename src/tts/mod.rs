pub mod interface;
pub mod client;
pub mod factory;

pub use interface::{TTSError, TTSInterface, TTSRequest};
pub use factory::TTSFactory;
