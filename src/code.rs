//! This module contains the serial code of a DFA.
//!
//! The code is a single line that lists the transition table row by row, one base-36 digit per
//! target state, followed by one finality character per state (`t` or `f`, case-insensitive).
//! The state count and the alphabet size are given separately.
//!
//! The two-state automaton over `{a, b}` with the transitions `(0,a)=1, (0,b)=0, (1,a)=0,
//! (1,b)=1` and the final state 1 has the code `1001ft`.

use crate::{dfa::MAX_ALPHABET_SIZE, ConvexError, ConvexErrorKind, Dfa, Result};

const RADIX: u32 = 36;

macro_rules! invalid_code {
    ($($arg:tt)*) => {
        ConvexError::new(ConvexErrorKind::InvalidCode(format!($($arg)*)))
    };
}

impl Dfa {
    /// Parse a DFA from its serial code.
    ///
    /// ```
    /// use convex_automata::Dfa;
    /// let dfa = Dfa::from_code("1001ft", 2, 2).unwrap();
    /// assert!(dfa.accepts(&[0, 1, 1]).unwrap());
    /// assert!(!dfa.accepts(&[0, 0]).unwrap());
    /// ```
    pub fn from_code(code: &str, state_count: usize, alphabet_size: usize) -> Result<Self> {
        if alphabet_size > MAX_ALPHABET_SIZE {
            return Err(invalid_code!(
                "alphabet size too large (greater than {})",
                MAX_ALPHABET_SIZE
            ));
        }
        let code: Vec<char> = code.trim().chars().collect();
        let expected_len = state_count * alphabet_size + state_count;
        if code.is_empty() || code.len() != expected_len {
            return Err(invalid_code!(
                "code has {} characters, expected {}",
                code.len(),
                expected_len
            ));
        }
        let (code_transitions, code_suffix) = code.split_at(state_count * alphabet_size);

        let final_flags = code_suffix
            .iter()
            .map(|c| match c.to_ascii_lowercase() {
                't' => Ok(true),
                'f' => Ok(false),
                _ => Err(invalid_code!("unknown finality character '{}'", c)),
            })
            .collect::<Result<Vec<bool>>>()?;

        let targets = code_transitions
            .iter()
            .enumerate()
            .map(|(index, c)| match c.to_digit(RADIX) {
                Some(target) if (target as usize) < state_count => Ok(target as usize),
                _ => Err(invalid_code!(
                    "invalid transition '{}' at index {}",
                    c,
                    index
                )),
            })
            .collect::<Result<Vec<usize>>>()?;
        let transitions = targets
            .chunks(alphabet_size.max(1))
            .map(|row| row.to_vec())
            .collect();

        Dfa::new(state_count, alphabet_size, transitions, final_flags)
    }

    /// Create the serial code of the DFA.
    /// Fails if the DFA has more states than a single base-36 digit can address.
    pub fn to_code(&self) -> Result<String> {
        if self.state_count() > RADIX as usize {
            return Err(invalid_code!(
                "{} states can't be encoded with base-{} digits",
                self.state_count(),
                RADIX
            ));
        }
        let mut code = String::with_capacity(self.state_count() * (self.alphabet_size() + 1));
        for target in self.transitions().iter().flatten() {
            if let Some(digit) = char::from_digit(*target as u32, RADIX) {
                code.push(digit);
            }
        }
        code.extend(
            self.final_flags()
                .iter()
                .map(|is_final| if *is_final { 't' } else { 'f' }),
        );
        Ok(code)
    }
}
