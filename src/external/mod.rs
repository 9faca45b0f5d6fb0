pub mod fulfillment;
pub mod giftshow;
pub mod mock;

pub use fulfillment::*;
pub use giftshow::*;
pub use mock::*;
