//! Zobrist keys, generated at compile time from a fixed xorshift stream.

const SEED: u64 = 0x2D35_8DCC_AA6C_78A5;

const PIECE_KEYS: usize = 12 * 64;
const TOTAL_KEYS: usize = PIECE_KEYS + 1 + 16 + 8;

const fn xorshift64(mut state: u64) -> u64 {
    state ^= state << 13;
    state ^= state >> 7;
    state ^= state << 17;
    state
}

static KEYS: [u64; TOTAL_KEYS] = {
    let mut keys = [0u64; TOTAL_KEYS];
    let mut state = SEED;
    let mut i = 0;
    while i < TOTAL_KEYS {
        state = xorshift64(state);
        keys[i] = state;
        i += 1;
    }
    keys
};

/// Key for a piece (`Piece::index()`, 0..12) on a square.
#[inline]
pub(crate) fn piece_square(piece: usize, square: usize) -> u64 {
    KEYS[piece * 64 + square]
}

/// Key XORed in when Black is to move.
#[inline]
pub(crate) fn side_to_move() -> u64 {
    KEYS[PIECE_KEYS]
}

/// Key for a castling-rights configuration (`CastleRights::bits()`, 0..16).
#[inline]
pub(crate) fn castling(bits: u8) -> u64 {
    KEYS[PIECE_KEYS + 1 + bits as usize]
}

/// Key for the file of the en passant square.
#[inline]
pub(crate) fn en_passant_file(file: u8) -> u64 {
    KEYS[PIECE_KEYS + 17 + file as usize]
}

#[cfg(test)]
mod tests {
    use super::KEYS;

    #[test]
    fn keys_are_distinct_and_nonzero() {
        let mut sorted = KEYS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), KEYS.len());
        assert!(KEYS.iter().all(|&k| k != 0));
    }
}
