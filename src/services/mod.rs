pub mod claim_service;
pub mod code_service;
pub mod draw_service;
pub mod prize_service;
pub mod winner_service;

pub use claim_service::*;
pub use code_service::*;
pub use draw_service::*;
pub use prize_service::*;
pub use winner_service::*;
