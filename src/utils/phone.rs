use regex::Regex;
use std::sync::OnceLock;

/// 010/011/016/017/018/019 + 8자리
fn mobile_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^01[016789]\d{8}$").expect("valid mobile regex"))
}

/// 숫자 이외 문자를 제거한 뒤 국내 휴대폰 번호 형식인지 확인
///
/// `"010-1234-5678"` -> `Some("01012345678")`
pub fn normalize_kr_mobile(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if mobile_regex().is_match(&digits) {
        Some(digits)
    } else {
        None
    }
}

/// 로그용 마스킹: 01012345678 -> 010****5678
pub fn mask_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 7 {
        return "*".repeat(digits.len());
    }
    let head = &digits[..3];
    let tail = &digits[digits.len() - 4..];
    format!("{head}{}{tail}", "*".repeat(digits.len() - 7))
}
