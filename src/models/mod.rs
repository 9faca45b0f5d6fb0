pub mod banner;
pub mod claim;
pub mod common;
pub mod draw;
pub mod giftshow;
pub mod participation_code;
pub mod prize;
pub mod winner;

pub use banner::*;
pub use claim::*;
pub use common::*;
pub use draw::*;
pub use giftshow::*;
pub use participation_code::*;
pub use prize::*;
pub use winner::*;
