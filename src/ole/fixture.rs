//! Test-only compound file builder.
//!
//! Produces version 3 (512-byte sector) compound files with a flat root
//! storage. Streams below the 4096-byte cutoff go to the mini stream, larger
//! ones get regular sectors, so both read paths of `OleFile` are exercised.

use super::consts::*;

const SECTOR: usize = 512;
/// FAT value marking a sector that holds the FAT itself
const FATSECT: u32 = 0xFFFF_FFFD;
const MINI_SECTOR: usize = 64;
const MINI_CUTOFF: usize = 4096;

#[derive(Debug, Default)]
pub struct CompoundFileBuilder {
    streams: Vec<(String, Vec<u8>)>,
}

struct Allocation {
    fat: Vec<u32>,
    sectors: Vec<u8>,
}

impl Allocation {
    /// Append `data` as a fresh sector chain; returns its first sector.
    fn push_chain(&mut self, data: &[u8]) -> u32 {
        if data.is_empty() {
            return ENDOFCHAIN;
        }
        let start = self.fat.len() as u32;
        let count = data.len().div_ceil(SECTOR);
        for i in 0..count {
            let next = if i + 1 == count { ENDOFCHAIN } else { start + i as u32 + 1 };
            self.fat.push(next);
        }
        let mut padded = data.to_vec();
        padded.resize(count * SECTOR, 0);
        self.sectors.extend_from_slice(&padded);
        start
    }
}

impl CompoundFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level stream. Insertion order is directory order.
    pub fn stream(mut self, name: &str, data: &[u8]) -> Self {
        self.streams.push((name.to_string(), data.to_vec()));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut alloc = Allocation {
            fat: Vec::new(),
            sectors: Vec::new(),
        };

        // (start sector, size) per stream, in insertion order
        let mut placements = Vec::with_capacity(self.streams.len());
        let mut ministream = Vec::new();
        let mut minifat: Vec<u32> = Vec::new();

        for (_, data) in &self.streams {
            if data.len() >= MINI_CUTOFF {
                placements.push((alloc.push_chain(data), data.len()));
            } else if data.is_empty() {
                placements.push((ENDOFCHAIN, 0));
            } else {
                let start = minifat.len() as u32;
                let count = data.len().div_ceil(MINI_SECTOR);
                for i in 0..count {
                    let next = if i + 1 == count { ENDOFCHAIN } else { start + i as u32 + 1 };
                    minifat.push(next);
                }
                ministream.extend_from_slice(data);
                ministream.resize(minifat.len() * MINI_SECTOR, 0);
                placements.push((start, data.len()));
            }
        }

        let ministream_start = alloc.push_chain(&ministream);
        let minifat_bytes: Vec<u8> = minifat.iter().flat_map(|v| v.to_le_bytes()).collect();
        let minifat_start = alloc.push_chain(&minifat_bytes);
        let minifat_sectors = minifat_bytes.len().div_ceil(SECTOR) as u32;

        let mut directory = directory_entry("Root Entry", STGTY_ROOT, ministream_start, ministream.len() as u64);
        if !self.streams.is_empty() {
            directory[76..80].copy_from_slice(&1u32.to_le_bytes());
        }
        for (index, ((name, _), (start, size))) in self.streams.iter().zip(&placements).enumerate() {
            let mut entry = directory_entry(name, STGTY_STREAM, *start, *size as u64);
            if index + 1 < self.streams.len() {
                let right = index as u32 + 2;
                entry[72..76].copy_from_slice(&right.to_le_bytes());
            }
            directory.extend_from_slice(&entry);
        }
        while directory.len() % SECTOR != 0 {
            directory.extend_from_slice(&unused_entry());
        }
        let dir_start = alloc.push_chain(&directory);

        // FAT sectors must also describe themselves
        let per_sector = SECTOR / 4;
        let mut fat_count = 1;
        while (alloc.fat.len() + fat_count).div_ceil(per_sector) > fat_count {
            fat_count += 1;
        }
        assert!(fat_count <= HEADER_DIFAT_ENTRIES, "fixture does not emit DIFAT sectors");
        let fat_start = alloc.fat.len() as u32;
        alloc.fat.extend(std::iter::repeat_n(FATSECT, fat_count));
        alloc.fat.resize(fat_count * per_sector, FREESECT);
        let fat_bytes: Vec<u8> = alloc.fat.iter().flat_map(|v| v.to_le_bytes()).collect();

        let mut header = vec![0u8; HEADER_SIZE];
        header[0..8].copy_from_slice(MAGIC);
        header[24..26].copy_from_slice(&0x003Eu16.to_le_bytes());
        header[26..28].copy_from_slice(&3u16.to_le_bytes());
        header[28..30].copy_from_slice(&0xFFFEu16.to_le_bytes());
        header[30..32].copy_from_slice(&9u16.to_le_bytes());
        header[32..34].copy_from_slice(&6u16.to_le_bytes());
        header[44..48].copy_from_slice(&(fat_count as u32).to_le_bytes());
        header[48..52].copy_from_slice(&dir_start.to_le_bytes());
        header[56..60].copy_from_slice(&(MINI_CUTOFF as u32).to_le_bytes());
        header[60..64].copy_from_slice(&minifat_start.to_le_bytes());
        header[64..68].copy_from_slice(&minifat_sectors.to_le_bytes());
        header[68..72].copy_from_slice(&ENDOFCHAIN.to_le_bytes());
        for i in 0..HEADER_DIFAT_ENTRIES {
            let id = if i < fat_count { fat_start + i as u32 } else { FREESECT };
            header[76 + i * 4..80 + i * 4].copy_from_slice(&id.to_le_bytes());
        }

        let mut file = header;
        file.extend_from_slice(&alloc.sectors);
        file.extend_from_slice(&fat_bytes);
        file
    }
}

fn directory_entry(name: &str, entry_type: u8, start: u32, size: u64) -> Vec<u8> {
    let mut entry = unused_entry();
    let units: Vec<u16> = name.encode_utf16().take(31).collect();
    for (i, unit) in units.iter().enumerate() {
        entry[i * 2..i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
    entry[64..66].copy_from_slice(&(((units.len() + 1) * 2) as u16).to_le_bytes());
    entry[66] = entry_type;
    entry[67] = 1;
    entry[116..120].copy_from_slice(&start.to_le_bytes());
    entry[120..128].copy_from_slice(&size.to_le_bytes());
    entry
}

fn unused_entry() -> Vec<u8> {
    let mut entry = vec![0u8; DIRENTRY_SIZE];
    entry[68..80].fill(0xFF);
    entry
}
