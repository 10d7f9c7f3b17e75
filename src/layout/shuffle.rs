//! Deterministic, seeded shuffling of book ids
//!
//! The order depends only on the set of ids and the seed string, never on
//! input order, process, or host. Not cryptographic: it exists so that
//! acquisition order does not show through as visible clustering.

use crate::catalog::BookId;

const OFFSET_BASIS: u32 = 2_166_136_261;
const PRIME: u32 = 16_777_619;

/// 32-bit running hash of `"{seed}:{id}"`, one round per character code
pub fn shuffle_key(seed: &str, id: BookId) -> u32 {
    let id = id.to_string();
    seed.chars()
        .chain(std::iter::once(':'))
        .chain(id.chars())
        .fold(OFFSET_BASIS, |hash, ch| (hash ^ ch as u32).wrapping_mul(PRIME))
}

/// Order ids by their seeded key; equal keys fall back to ascending id.
pub fn stable_shuffle(ids: &[BookId], seed: &str) -> Vec<BookId> {
    let mut keyed: Vec<(u32, BookId)> = ids.iter().map(|&id| (shuffle_key(seed, id), id)).collect();
    keyed.sort_unstable();
    keyed.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_matches_reference_values() {
        // FNV-1a over "a:1": h = ((basis ^ c) * prime) mod 2^32 per character
        let mut h: u64 = 2_166_136_261;
        for c in "a:1".chars() {
            h ^= c as u64;
            h = (h * 16_777_619) & 0xFFFF_FFFF;
        }
        assert_eq!(shuffle_key("a", 1), h as u32);
    }

    #[test]
    fn test_independent_of_input_order() {
        let forward: Vec<BookId> = (1..=50).collect();
        let backward: Vec<BookId> = (1..=50).rev().collect();
        assert_eq!(
            stable_shuffle(&forward, "floor:sub"),
            stable_shuffle(&backward, "floor:sub")
        );
    }

    #[test]
    fn test_is_a_permutation() {
        let ids: Vec<BookId> = vec![5, 3, 99, 1024, 7];
        let mut shuffled = stable_shuffle(&ids, "seed");
        shuffled.sort();
        assert_eq!(shuffled, vec![3, 5, 7, 99, 1024]);
    }

    #[test]
    fn test_seed_changes_order() {
        let ids: Vec<BookId> = (1..=40).collect();
        assert_ne!(stable_shuffle(&ids, "one"), stable_shuffle(&ids, "two"));
    }

    #[test]
    fn test_duplicates_kept_adjacent() {
        let shuffled = stable_shuffle(&[4, 9, 4], "dup");
        assert_eq!(shuffled.len(), 3);
        let first = shuffled.iter().position(|&id| id == 4).unwrap();
        assert_eq!(shuffled[first + 1], 4);
    }

    #[test]
    fn test_non_ascii_seed() {
        // characters above 0xFF feed their full code point into the hash
        assert_ne!(shuffle_key("Sci‑Fi", 1), shuffle_key("Sci-Fi", 1));
    }

    #[test]
    fn test_empty_input() {
        assert!(stable_shuffle(&[], "empty").is_empty());
    }
}
