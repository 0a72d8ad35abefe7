//! Voucher code generation.

use rand::Rng;

/// Constant tag that makes codes recognizable in carts and support logs.
pub const CODE_PREFIX: &str = "COUPON-";

/// Uppercase base-36 alphabet. Eight random characters give ~2.8e12
/// combinations, so collisions are handled for correctness, not because
/// they are expected.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Draw a fresh random code: the constant prefix plus `length` characters
/// from the alphabet.
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(CODE_PREFIX.len() + length);
    code.push_str(CODE_PREFIX);
    for _ in 0..length {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        code.push(CODE_ALPHABET[idx] as char);
    }
    code
}
