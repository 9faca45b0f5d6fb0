use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const CODE_SUFFIX_LEN: usize = 8;

/// 참여 코드 후보 생성: `<prefix><8자리 대문자/숫자>` (예: EVENT-AB12CD34)
pub fn generate_event_code(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_SUFFIX_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}{suffix}")
}

/// 기프트쇼 tr_id: `rb_<epoch millis 뒤 8자리>_<랜덤 6자리>`, 항상 18자 (제한 20자)
pub fn generate_tr_id() -> String {
    let millis = Utc::now().timestamp_millis().rem_euclid(100_000_000);
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("rb_{millis:08}_{random}")
}
