//! Coupon and discount-code generation

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Random suffix length; ~2 billion combinations, collisions are
/// handled by regeneration anyway
const SUFFIX_LEN: usize = 6;

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect()
}

fn is_taken(code: &str, existing: &[String]) -> bool {
    existing.iter().any(|c| c == code)
}

/// Mint a website discount code, e.g. `FITCOACH20-4QX9ZA`.
/// Regenerates until the code is distinct from every existing one.
pub fn generate_discount_code(discount_percent: u8, existing: &[String]) -> String {
    loop {
        let code = format!("FITCOACH{}-{}", discount_percent, random_suffix());
        if !is_taken(&code, existing) {
            return code;
        }
    }
}

/// Mint a shop coupon code from the item name, e.g. `YOGAMATP-7BC2KD`
pub fn generate_coupon_code(item_name: &str, existing: &[String]) -> String {
    let prefix: String = item_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(8)
        .collect();
    loop {
        let code = format!("{}-{}", prefix, random_suffix());
        if !is_taken(&code, existing) {
            return code;
        }
    }
}

/// Referral share code, e.g. `FITCOACHALICE8F2K`
pub fn generate_referral_code(user_name: &str) -> String {
    let name: String = user_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(|c| (c as char).to_ascii_uppercase())
        .collect();
    format!("FITCOACH{}{}", name, suffix)
}
