use std::fmt::{Display, Error, Formatter};

use super::{RingError, RingResult};

pub const BYTE_SIZE: usize = 8;

// Bit sequence
// One 8 character binary string per UTF-8 byte of the payload, in byte order
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitSequence {
    groups: Vec<String>,
}

impl BitSequence {
    /// Wraps raw bit groups without checking them. Use [`BitSequence::unpack`] to validate.
    pub fn from_groups(groups: Vec<String>) -> Self {
        Self { groups }
    }

    // Number of groups, which is the byte count for a packed payload
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn bit_len(&self) -> usize {
        self.groups.iter().map(String::len).sum()
    }

    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(String::as_str)
    }

    pub fn bits(&self) -> impl Iterator<Item = char> + '_ {
        self.groups.iter().flat_map(|g| g.chars())
    }

    pub fn unpack(&self) -> RingResult<Vec<u8>> {
        self.groups
            .iter()
            .map(|g| {
                if g.len() != BYTE_SIZE || !g.bytes().all(|b| b == b'0' || b == b'1') {
                    return Err(RingError::InvalidBits);
                }
                u8::from_str_radix(g, 2).map_err(|_| RingError::InvalidBits)
            })
            .collect()
    }
}

impl Display for BitSequence {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        self.groups.iter().try_for_each(|g| f.write_str(g))
    }
}

// Bit packer
//------------------------------------------------------------------------------

pub fn pack(text: &str) -> BitSequence {
    let groups = text.as_bytes().iter().map(|b| format!("{b:08b}")).collect();
    BitSequence { groups }
}
