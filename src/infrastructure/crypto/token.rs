//! Auth token key generation

use rand::Rng;

/// Number of random bytes in a token key (hex-encoded to twice as many chars)
const TOKEN_KEY_BYTES: usize = 20;

/// Generate a new opaque token key: 40 lowercase hex characters.
pub fn generate_token_key() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; TOKEN_KEY_BYTES] = rng.gen();
    hex::encode(random_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_forty_hex_chars() {
        let key = generate_token_key();
        assert_eq!(key.len(), TOKEN_KEY_BYTES * 2);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(generate_token_key(), generate_token_key());
    }
}
