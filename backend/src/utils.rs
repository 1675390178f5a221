use std::fmt::LowerHex;

use sha2::{Digest, Sha512};
use uuid::Uuid;

pub fn get_hash(text: String) -> String {
    format!("{:x}", hash_prepare(text))
}

fn hash_prepare(text: String) -> impl LowerHex {
    let mut hasher = Sha512::new();
    hasher.update(text);
    hasher.finalize()
}

pub fn new_token(username: &str) -> String {
    get_hash(format!("{username}-{}", Uuid::new_v4()))
}
