use sha2::{Digest, Sha256};

use crate::codec::write_state;
use crate::types::{GameState, Input};

/// SHA-256 over the deterministic fields of the state (terrain excluded),
/// fed field by field with no intermediate buffer.
/// MUST match SHA-256(encode_state(s)).
pub fn state_hash(s: &GameState) -> [u8; 32] {
    let mut h = Sha256::new();
    write_state(s, &mut |bytes: &[u8]| h.update(bytes));
    h.finalize().into()
}

/// 32-bit desync checksum: the first four bytes of `state_hash`, little-endian.
pub fn checksum(s: &GameState) -> u32 {
    let d = state_hash(s);
    u32::from_le_bytes([d[0], d[1], d[2], d[3]])
}

/// SHA-256 of the full input transcript, 3 bytes per player per tick.
pub fn hash_transcript(transcript: &[[Input; 2]]) -> [u8; 32] {
    transcript
        .iter()
        .flatten()
        .fold(Sha256::new(), |h, input| h.chain_update(input_bytes(input)))
        .finalize()
        .into()
}

#[inline]
fn input_bytes(input: &Input) -> [u8; 3] {
    [input.angle_delta as u8, input.power_delta as u8, input.fire as u8]
}

/// SHA-256 commitment of the seed, little-endian.
pub fn hash_seed(seed: u32) -> [u8; 32] {
    Sha256::digest(seed.to_le_bytes()).into()
}
