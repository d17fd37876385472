pub mod interface;
pub mod gemini;
pub mod factory;

pub use interface::{TranslateError, TranslateInterface, TranslateRequest, TranslateResponse};
pub use factory::TranslateFactory;
