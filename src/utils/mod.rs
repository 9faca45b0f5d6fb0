pub mod code_generator;
pub mod pagination;
pub mod phone;
pub mod retry;

pub use code_generator::{generate_event_code, generate_tr_id};
pub use pagination::*;
pub use phone::{mask_phone, normalize_kr_mobile};
pub use retry::{Attempt, RetryPolicy};
