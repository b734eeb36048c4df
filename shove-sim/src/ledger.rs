//! Binary ledger of simulated games.
//!
//! Format:
//! - Header (40 bytes):
//!   - Magic: "SHV1" (4 bytes)
//!   - Version: u32 LE (4 bytes)
//!   - Entry count: u64 LE (8 bytes)
//!   - Checksum: u64 LE xxhash of data section (8 bytes)
//!   - Board size, players, trios per player, wilds per size: u8 each (4 bytes)
//!   - Policy: u8 (1 byte)
//!   - Reserved: 3 bytes (zeros)
//!   - Move cap: u32 LE (4 bytes)
//!   - Reserved: 4 bytes (zeros)
//! - Data section (entry_count × 16 bytes):
//!   - Seed: u64 LE (8 bytes)
//!   - Fingerprint: u64 LE (8 bytes)
//!
//! Entries are sorted by seed.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use shove_core::GameConfig;
use xxhash_rust::xxh64::xxh64;

use crate::policy::Policy;

const MAGIC: &[u8; 4] = b"SHV1";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 40;
const ENTRY_SIZE: usize = 16;

/// Seeds and final-state fingerprints of one simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    pub config: GameConfig,
    pub policy: Policy,
    pub max_moves: u32,
    pub entries: Vec<(u64, u64)>,
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn le_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[..4]);
    u32::from_le_bytes(buf)
}

fn le_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

impl Ledger {
    pub fn new(config: GameConfig, policy: Policy, max_moves: u32) -> Self {
        Ledger { config, policy, max_moves, entries: Vec::new() }
    }

    pub fn push(&mut self, seed: u64, fingerprint: u64) {
        self.entries.push((seed, fingerprint));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save the ledger to a binary file.
    pub fn save(&self, path: &Path) -> io::Result<usize> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|&(seed, _)| seed);

        let count = entries.len();

        // Build data section
        let mut data = Vec::with_capacity(count * ENTRY_SIZE);
        for (seed, fingerprint) in &entries {
            data.extend_from_slice(&seed.to_le_bytes());
            data.extend_from_slice(&fingerprint.to_le_bytes());
        }

        let checksum = xxh64(&data, 0);

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        // Header
        writer.write_all(MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;
        writer.write_all(&(count as u64).to_le_bytes())?;
        writer.write_all(&checksum.to_le_bytes())?;
        writer.write_all(&[
            self.config.board_size,
            self.config.players,
            self.config.trios_per_player,
            self.config.wilds_per_size,
            self.policy.code(),
            0,
            0,
            0,
        ])?;
        writer.write_all(&self.max_moves.to_le_bytes())?;
        writer.write_all(&[0u8; 4])?; // Reserved

        // Data
        writer.write_all(&data)?;
        writer.flush()?;

        Ok(count)
    }

    /// Load a ledger from a binary file.
    pub fn load(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        if &header[0..4] != MAGIC {
            return Err(invalid("Invalid ledger magic"));
        }
        let version = le_u32(&header[4..8]);
        if version != VERSION {
            return Err(invalid(format!("Unsupported ledger version: {}", version)));
        }

        let count = le_u64(&header[8..16]);
        let expected_len = usize::try_from(count)
            .ok()
            .and_then(|n| n.checked_mul(ENTRY_SIZE))
            .ok_or_else(|| invalid(format!("Ledger entry count {} is too large", count)))?;
        let stored_checksum = le_u64(&header[16..24]);
        let config = GameConfig {
            board_size: header[24],
            players: header[25],
            trios_per_player: header[26],
            wilds_per_size: header[27],
        };
        config
            .validate()
            .map_err(|e| invalid(format!("Invalid ledger config: {}", e)))?;
        let policy = Policy::from_code(header[28])
            .ok_or_else(|| invalid(format!("Unknown policy code: {}", header[28])))?;
        let max_moves = le_u32(&header[32..36]);

        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        if data.len() != expected_len {
            return Err(invalid(format!(
                "Ledger data is {} bytes, expected {}",
                data.len(),
                expected_len
            )));
        }
        if xxh64(&data, 0) != stored_checksum {
            return Err(invalid("Ledger checksum mismatch"));
        }

        let entries = data
            .chunks_exact(ENTRY_SIZE)
            .map(|entry| (le_u64(&entry[0..8]), le_u64(&entry[8..16])))
            .collect();

        Ok(Ledger { config, policy, max_moves, entries })
    }

    /// Get file size for a given number of entries.
    pub fn estimate_size(count: usize) -> usize {
        HEADER_SIZE + count * ENTRY_SIZE
    }
}
