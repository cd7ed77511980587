//! Baby-step/giant-step decryption table.
//!
//! The table maps a compressed curve point (the giant step `m1 * 2^15 * B`)
//! to its signed giant-step index `m1`. At the canonical parameters
//! (`GIANT_BITS = 25`) it holds `2^25` entries, each a 32-byte key plus a
//! 4-byte value — roughly 1.1 GiB. A general-purpose hash map keyed by
//! owned strings or byte vectors would add a pointer, a length, and an
//! allocation per entry on top of that; at this scale the overhead alone
//! would roughly double the table's memory footprint. This module instead
//! implements a flat open-addressing table: one contiguous buffer, no
//! per-entry allocation, keyed directly on the raw 32-byte encoding.

use std::io::{self, Read, Write};

/// A single slot in the table.
#[derive(Clone, Copy)]
enum Slot {
    Empty,
    Occupied([u8; 32], i32),
}

/// Open-addressing hash table mapping compressed curve points to signed
/// giant-step indices.
///
/// Built by [`precompute_decrypt_table`](super::scheme::precompute_decrypt_table)
/// or read back with [`load_table`](super::scheme::load_table); opaque to
/// callers beyond that.
pub struct DecryptTable {
    slots: Vec<Slot>,
    mask: usize,
    len: usize,
}

/// Folds a 32-byte point encoding into a 64-bit hash.
///
/// Curve point encodings are already uniformly distributed over their
/// 32 bytes, so a cheap fold of the bytes is sufficient; no cryptographic
/// hash is needed here.
fn hash_key(key: &[u8; 32]) -> u64 {
    let mut h = 0xcbf29ce484222325u64;
    for chunk in key.chunks_exact(8) {
        let word = u64::from_le_bytes(chunk.try_into().expect("8-byte chunk"));
        h ^= word;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

impl DecryptTable {
    /// Creates an empty table sized to hold at least `capacity` entries at
    /// a load factor of roughly one half.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let slot_count = (capacity.max(1) * 2).next_power_of_two();

        Self {
            slots: vec![Slot::Empty; slot_count],
            mask: slot_count - 1,
            len: 0,
        }
    }

    /// Inserts `key -> value`, overwriting any previous value for `key`.
    pub(crate) fn insert(&mut self, key: [u8; 32], value: i32) {
        let mut idx = (hash_key(&key) as usize) & self.mask;

        loop {
            match self.slots[idx] {
                Slot::Empty => {
                    self.slots[idx] = Slot::Occupied(key, value);
                    self.len += 1;
                    return;
                }
                Slot::Occupied(k, _) if k == key => {
                    self.slots[idx] = Slot::Occupied(key, value);
                    return;
                }
                Slot::Occupied(..) => {
                    idx = (idx + 1) & self.mask;
                }
            }
        }
    }

    /// Looks up `key`, returning its giant-step index if present.
    pub(crate) fn get(&self, key: &[u8; 32]) -> Option<i32> {
        let mut idx = (hash_key(key) as usize) & self.mask;

        loop {
            match self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k, v) if &k == key => return Some(v),
                Slot::Occupied(..) => idx = (idx + 1) & self.mask,
                #[allow(unreachable_patterns)]
                _ => return None,
            }
        }
    }

    /// Number of entries stored in the table.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Writes the table to `writer` as an 8-byte little-endian entry count
    /// followed by that many `(32-byte key, 4-byte little-endian value)`
    /// records.
    pub(crate) fn save<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&(self.len as u64).to_le_bytes())?;

        for slot in &self.slots {
            if let Slot::Occupied(key, value) = slot {
                writer.write_all(key)?;
                writer.write_all(&value.to_le_bytes())?;
            }
        }

        Ok(())
    }

    /// Reads a table previously written by [`DecryptTable::save`].
    pub(crate) fn load<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut count_bytes = [0u8; 8];
        reader.read_exact(&mut count_bytes)?;
        let count = u64::from_le_bytes(count_bytes) as usize;

        let mut table = Self::with_capacity(count);

        let mut key = [0u8; 32];
        let mut value_bytes = [0u8; 4];
        for _ in 0..count {
            reader.read_exact(&mut key)?;
            reader.read_exact(&mut value_bytes)?;
            table.insert(key, i32::from_le_bytes(value_bytes));
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_and_looks_up_entries() {
        let mut table = DecryptTable::with_capacity(16);

        let mut key_a = [0u8; 32];
        key_a[0] = 1;
        let mut key_b = [0u8; 32];
        key_b[0] = 2;

        table.insert(key_a, 7);
        table.insert(key_b, -3);

        assert_eq!(table.get(&key_a), Some(7));
        assert_eq!(table.get(&key_b), Some(-3));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn missing_key_returns_none() {
        let table = DecryptTable::with_capacity(16);
        assert_eq!(table.get(&[9u8; 32]), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let mut table = DecryptTable::with_capacity(8);
        for i in 0..8i32 {
            let mut key = [0u8; 32];
            key[0] = i as u8;
            table.insert(key, i - 4);
        }

        let mut buf = Vec::new();
        table.save(&mut buf).unwrap();

        let loaded = DecryptTable::load(&buf[..]).unwrap();
        assert_eq!(loaded.len(), table.len());

        for i in 0..8i32 {
            let mut key = [0u8; 32];
            key[0] = i as u8;
            assert_eq!(loaded.get(&key), Some(i - 4));
        }
    }
}
