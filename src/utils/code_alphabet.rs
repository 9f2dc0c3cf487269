// Short code alphabet with visually ambiguous characters removed

use rand::{thread_rng, Rng};

/// Uppercase without `I`, lowercase without `l`, digits without `1`
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz234567890";

/// Lookup table for membership checks (true for alphabet bytes)
static MEMBER_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0;
    while i < CODE_ALPHABET.len() {
        table[CODE_ALPHABET[i] as usize] = true;
        i += 1;
    }
    table
};

/// Number of symbols in the alphabet
#[inline]
pub fn alphabet_size() -> usize {
    CODE_ALPHABET.len()
}

/// True if every byte of `code` belongs to the alphabet
#[inline]
pub fn is_valid_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| MEMBER_TABLE[b as usize])
}

/// Draw `length` characters independently and uniformly from the alphabet
pub fn random_code(length: usize) -> String {
    let mut rng = thread_rng();
    let mut result = String::with_capacity(length);

    for _ in 0..length {
        let idx = rng.gen_range(0..CODE_ALPHABET.len());
        result.push(CODE_ALPHABET[idx] as char);
    }

    result
}
