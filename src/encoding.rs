//! Sequence compression into the four-letter alphabet.
//!
//! Every encoded sequence is exactly `max_dim` codes long: the real residues
//! first, then [`SENTINEL`] padding up to the end.

use std::fmt;

use crate::AlignerError;

/// Code reserved for "no residue here".
pub const SENTINEL: u8 = 4;

const ALPHABET: [u8; 4] = *b"ACGT";

#[inline]
pub fn encode_base(symbol: u8) -> Option<u8> {
    match symbol {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

#[inline]
pub fn decode_base(code: u8) -> Option<char> {
    ALPHABET.get(code as usize).map(|&b| char::from(b))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSequence {
    codes: Vec<u8>,
    length: usize,
}

impl EncodedSequence {
    /// Compresses `raw` and pads it with sentinels to `max_dim` codes.
    pub fn encode(raw: impl AsRef<[u8]>, max_dim: usize) -> Result<Self, AlignerError> {
        let raw = raw.as_ref();
        if raw.len() > max_dim {
            return Err(AlignerError::InvalidLength {
                length: raw.len(),
                max_dim,
            });
        }

        let mut codes = Vec::with_capacity(max_dim);
        for (position, &symbol) in raw.iter().enumerate() {
            let code = encode_base(symbol).ok_or(AlignerError::InvalidSymbol {
                symbol: char::from(symbol),
                position,
            })?;
            codes.push(code);
        }
        codes.resize(max_dim, SENTINEL);

        Ok(Self {
            codes,
            length: raw.len(),
        })
    }

    /// Wraps codes that are already compressed. Every code must be a real
    /// residue (0..=3); the sentinel is only ever added as padding.
    pub fn from_codes(codes: &[u8], max_dim: usize) -> Result<Self, AlignerError> {
        if codes.len() > max_dim {
            return Err(AlignerError::InvalidLength {
                length: codes.len(),
                max_dim,
            });
        }
        if let Some(position) = codes.iter().position(|&c| c >= SENTINEL) {
            return Err(AlignerError::InvalidSymbol {
                symbol: char::from(codes[position]),
                position,
            });
        }

        let mut padded = codes.to_vec();
        padded.resize(max_dim, SENTINEL);
        Ok(Self {
            codes: padded,
            length: codes.len(),
        })
    }

    /// Number of real residues.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn max_dim(&self) -> usize {
        self.codes.len()
    }

    /// All `max_dim` codes, padding included.
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn residues(&self) -> &[u8] {
        &self.codes[..self.length]
    }
}

impl fmt::Display for EncodedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &code in self.residues() {
            write!(f, "{}", decode_base(code).unwrap_or('-'))?;
        }
        Ok(())
    }
}

/// One unit of work: a target and a database sequence encoded to the same
/// `max_dim`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPair {
    pub target: EncodedSequence,
    pub database: EncodedSequence,
}

impl AlignmentPair {
    pub fn new(target: EncodedSequence, database: EncodedSequence) -> Self {
        Self { target, database }
    }

    pub fn encode(
        target: impl AsRef<[u8]>,
        database: impl AsRef<[u8]>,
        max_dim: usize,
    ) -> Result<Self, AlignerError> {
        Ok(Self {
            target: EncodedSequence::encode(target, max_dim)?,
            database: EncodedSequence::encode(database, max_dim)?,
        })
    }

    pub fn len_t(&self) -> usize {
        self.target.len()
    }

    pub fn len_d(&self) -> usize {
        self.database.len()
    }
}
