use rand::random;
use uuid::{Builder, Uuid};

/// Generates a random (version 4) uuid.
pub fn generate() -> Uuid {
    Builder::from_random_bytes(random::<[u8; 16]>()).into_uuid()
}
