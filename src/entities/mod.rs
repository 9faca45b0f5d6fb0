pub mod participation_codes;
pub mod prizes;
pub mod winners;

pub use participation_codes as participation_code_entity;
pub use prizes as prize_entity;
pub use winners as winner_entity;
pub use winners::{CLAIM_PENDING_PREFIX, ClaimStatus};
