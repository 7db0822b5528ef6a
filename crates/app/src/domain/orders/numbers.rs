//! Order numbers

use std::fmt::Debug;

use mockall::automock;
use rand::seq::SliceRandom;

/// Length of a generated order number.
pub const ORDER_NUMBER_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Source of candidate order numbers. Uniqueness is enforced by storage.
#[automock]
pub trait OrderNumberSource: Debug + Send + Sync {
    /// Produce a new candidate.
    fn next_number(&self) -> String;
}

/// Uniformly random numbers over `A-Z0-9`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderNumbers;

impl OrderNumberSource for RandomOrderNumbers {
    fn next_number(&self) -> String {
        let mut rng = rand::thread_rng();

        (0..ORDER_NUMBER_LEN)
            .filter_map(|_| ALPHABET.choose(&mut rng).copied().map(char::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_numbers_are_eight_uppercase_alphanumerics() {
        for _ in 0..256 {
            let number = RandomOrderNumbers.next_number();

            assert_eq!(number.len(), ORDER_NUMBER_LEN);
            assert!(
                number
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()),
                "unexpected character in {number}"
            );
        }
    }

    #[test]
    fn random_numbers_vary() {
        let a = RandomOrderNumbers.next_number();
        let b = RandomOrderNumbers.next_number();
        let c = RandomOrderNumbers.next_number();

        assert!(a != b || b != c, "three identical draws from 36^8");
    }
}
