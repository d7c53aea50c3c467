use super::consts::*;
use crate::common::binary::{BinaryError, decode_utf16le, read_u16_le, read_u32_le};
use std::io::{self, Read, Seek, SeekFrom};
use thiserror::Error;
use zerocopy::{FromBytes, LE, U16, U32, U64};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Raw OLE directory entry structure (128 bytes)
///
/// This represents the on-disk format of a directory entry.
/// Based on the Microsoft Compound File Binary Format specification.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct RawDirectoryEntry {
    /// Entry name in UTF-16LE (64 bytes, null-padded)
    name: [u8; 64],
    /// Length of name in bytes (including null terminator)
    name_len: U16<LE>,
    /// Entry type (1 = storage, 2 = stream, 5 = root)
    entry_type: u8,
    /// Node color (0 = red, 1 = black)
    node_color: u8,
    /// Left sibling SID
    sid_left: U32<LE>,
    /// Right sibling SID
    sid_right: U32<LE>,
    /// Child SID
    sid_child: U32<LE>,
    /// CLSID (16 bytes)
    clsid: [u8; 16],
    /// State bits
    state_bits: U32<LE>,
    /// Creation time (FILETIME)
    creation_time: U64<LE>,
    /// Modified time (FILETIME)
    modified_time: U64<LE>,
    /// Starting sector
    start_sector: U32<LE>,
    /// Stream size
    stream_size: U64<LE>,
}

/// Read-only view of an OLE2 structured storage file.
///
/// Only the allocation tables and the directory are loaded eagerly; stream
/// contents are read from the underlying reader on request.
#[derive(Debug)]
pub struct OleFile<R: Read + Seek> {
    /// File handle or reader
    reader: R,
    /// Total file size in bytes
    file_size: u64,
    /// Sector size (512 or 4096 bytes)
    sector_size: usize,
    /// Mini sector size (typically 64 bytes)
    mini_sector_size: usize,
    /// File Allocation Table - maps sector to next sector in chain
    fat: Vec<u32>,
    /// Mini FAT - for streams smaller than the cutoff size
    minifat: Vec<u32>,
    /// Root directory entry
    root: Option<DirectoryEntry>,
    /// All reachable directory entries indexed by SID
    dir_entries: Vec<Option<DirectoryEntry>>,
    /// Mini stream data (loaded on demand)
    ministream: Option<Vec<u8>>,
}

/// Represents an OLE directory entry (stream or storage)
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Entry name (UTF-16 decoded to UTF-8)
    pub name: String,
    /// Entry type (stream, storage, root, etc.)
    pub entry_type: u8,
    /// Index of left sibling in red-black tree
    pub sid_left: u32,
    /// Index of right sibling in red-black tree
    pub sid_right: u32,
    /// Index of child node in red-black tree
    pub sid_child: u32,
    /// First sector of the stream
    pub start_sector: u32,
    /// Size of the stream in bytes
    pub size: u64,
    /// Whether this stream is in MiniFAT
    pub is_minifat: bool,
}

impl DirectoryEntry {
    #[inline]
    pub fn is_stream(&self) -> bool {
        self.entry_type == STGTY_STREAM
    }
}

/// Error types for OLE file parsing
#[derive(Debug, Error)]
pub enum OleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Invalid data: {0}")]
    InvalidData(#[from] BinaryError),
    #[error("Not an OLE file")]
    NotOleFile,
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Stream not found: {0}")]
    StreamNotFound(String),
}

impl<R: Read + Seek> OleFile<R> {
    /// Open and parse an OLE file from a reader
    ///
    /// # Arguments
    /// * `reader` - A reader that implements Read + Seek
    ///
    /// # Returns
    /// * `Result<OleFile<R>, OleError>` - The parsed OLE file or an error
    pub fn open(mut reader: R) -> Result<Self, OleError> {
        let file_size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;

        if file_size < MINIMAL_OLEFILE_SIZE as u64 {
            return Err(OleError::NotOleFile);
        }

        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;

        if &header[0..8] != MAGIC {
            return Err(OleError::NotOleFile);
        }

        let dll_version = read_u16_le(&header, 0x1A)?;
        let byte_order = read_u16_le(&header, 0x1C)?;
        let sector_shift = read_u16_le(&header, 0x1E)?;
        let mini_sector_shift = read_u16_le(&header, 0x20)?;
        let first_dir_sector = read_u32_le(&header, 0x30)?;
        let mini_stream_cutoff = read_u32_le(&header, 0x38)?;
        let first_minifat_sector = read_u32_le(&header, 0x3C)?;
        let num_minifat_sectors = read_u32_le(&header, 0x40)?;
        let first_difat_sector = read_u32_le(&header, 0x44)?;
        let num_difat_sectors = read_u32_le(&header, 0x48)?;

        // Validate byte order (must be little-endian)
        if byte_order != 0xFFFE {
            return Err(OleError::InvalidFormat("Invalid byte order".to_string()));
        }

        let sector_size = match (dll_version, sector_shift) {
            (3, 9) => 512,
            (4, 12) => 4096,
            _ => return Err(OleError::InvalidFormat("Sector size mismatch".to_string())),
        };
        if mini_sector_shift != 6 {
            return Err(OleError::InvalidFormat(format!(
                "Unsupported mini sector shift {}",
                mini_sector_shift
            )));
        }

        let mut ole = OleFile {
            reader,
            file_size,
            sector_size,
            mini_sector_size: 1 << mini_sector_shift,
            fat: Vec::new(),
            minifat: Vec::new(),
            root: None,
            dir_entries: Vec::new(),
            ministream: None,
        };

        ole.load_fat(&header, first_difat_sector, num_difat_sectors)?;
        ole.load_directory(first_dir_sector, mini_stream_cutoff)?;

        if num_minifat_sectors > 0 {
            ole.load_minifat(first_minifat_sector)?;
        }

        Ok(ole)
    }

    /// Load the File Allocation Table (FAT)
    ///
    /// The first 109 FAT sector indexes are stored in the header, additional
    /// indexes live in the DIFAT chain.
    fn load_fat(
        &mut self,
        header: &[u8; HEADER_SIZE],
        first_difat_sector: u32,
        num_difat_sectors: u32,
    ) -> Result<(), OleError> {
        let mut fat_sectors = Vec::new();
        for i in 0..HEADER_DIFAT_ENTRIES {
            let sector = read_u32_le(header, 0x4C + i * 4)?;
            if sector == FREESECT || sector == ENDOFCHAIN {
                break;
            }
            fat_sectors.push(sector);
        }

        let entries_per_sector = self.sector_size / 4;
        // No chain can name more sectors than the file holds
        let sector_count = (self.file_size / self.sector_size as u64) as usize;
        let mut visited = vec![false; sector_count];
        let mut difat_sector = first_difat_sector;
        for _ in 0..(num_difat_sectors as usize).min(sector_count) {
            if difat_sector == ENDOFCHAIN || difat_sector == FREESECT {
                break;
            }
            match visited.get_mut(difat_sector as usize) {
                Some(seen) if !*seen => *seen = true,
                _ => {
                    return Err(OleError::CorruptedFile(format!(
                        "Invalid DIFAT chain at sector {}",
                        difat_sector
                    )));
                },
            }
            let sector_data = self.read_sector(difat_sector)?;

            // Last slot holds the next DIFAT sector
            for i in 0..entries_per_sector - 1 {
                let sector = read_u32_le(&sector_data, i * 4)?;
                if sector == FREESECT || sector == ENDOFCHAIN {
                    break;
                }
                fat_sectors.push(sector);
            }
            difat_sector = read_u32_le(&sector_data, (entries_per_sector - 1) * 4)?;
        }

        if fat_sectors.len() > sector_count {
            return Err(OleError::CorruptedFile(format!(
                "{} FAT sectors declared in a file of {} sectors",
                fat_sectors.len(),
                sector_count
            )));
        }

        self.fat.reserve(fat_sectors.len() * entries_per_sector);
        for &sector_id in &fat_sectors {
            let sector_data = self.read_sector(sector_id)?;
            for i in 0..entries_per_sector {
                self.fat.push(read_u32_le(&sector_data, i * 4)?);
            }
        }

        Ok(())
    }

    /// Load the Mini FAT (for small streams)
    fn load_minifat(&mut self, first_minifat_sector: u32) -> Result<(), OleError> {
        let minifat_data = self.read_stream_from_fat(first_minifat_sector, None)?;
        self.minifat = minifat_data
            .chunks_exact(4)
            .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(())
    }

    /// Load directory entries reachable from the root
    fn load_directory(&mut self, first_dir_sector: u32, mini_stream_cutoff: u32) -> Result<(), OleError> {
        let dir_data = self.read_stream_from_fat(first_dir_sector, None)?;

        let num_entries = dir_data.len() / DIRENTRY_SIZE;
        if num_entries == 0 {
            return Err(OleError::CorruptedFile("Empty directory".to_string()));
        }
        self.dir_entries = vec![None; num_entries];

        let root = parse_directory_entry(&dir_data[0..DIRENTRY_SIZE], self.sector_size, mini_stream_cutoff)?;
        if root.entry_type != STGTY_ROOT {
            return Err(OleError::CorruptedFile("First directory entry is not the root".to_string()));
        }

        // Walk the sibling/child links without recursion; each SID is parsed once
        let mut pending = vec![root.sid_child];
        self.dir_entries[0] = Some(root.clone());
        self.root = Some(root);

        while let Some(sid) = pending.pop() {
            if sid == NOSTREAM {
                continue;
            }
            let index = sid as usize;
            if index >= num_entries {
                return Err(OleError::CorruptedFile(
                    "Invalid directory entry index".to_string(),
                ));
            }
            if self.dir_entries[index].is_some() {
                continue;
            }

            let offset = index * DIRENTRY_SIZE;
            let entry = parse_directory_entry(
                &dir_data[offset..offset + DIRENTRY_SIZE],
                self.sector_size,
                mini_stream_cutoff,
            )?;
            pending.extend([entry.sid_left, entry.sid_right, entry.sid_child]);
            self.dir_entries[index] = Some(entry);
        }

        Ok(())
    }

    /// Read a single sector from the file
    fn read_sector(&mut self, sector_id: u32) -> Result<Vec<u8>, OleError> {
        // Sector position in file: (sector_id + 1) * sector_size
        let position = ((sector_id as u64) + 1) * (self.sector_size as u64);
        if position + self.sector_size as u64 > self.file_size {
            return Err(OleError::CorruptedFile(format!(
                "Sector {} lies beyond the end of the file",
                sector_id
            )));
        }
        self.reader.seek(SeekFrom::Start(position))?;

        let mut buffer = vec![0u8; self.sector_size];
        self.reader.read_exact(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a stream by following the FAT chain, stopping once `limit` bytes are collected.
    fn read_stream_from_fat(
        &mut self,
        start_sector: u32,
        limit: Option<usize>,
    ) -> Result<Vec<u8>, OleError> {
        let mut data = Vec::new();
        let mut sector = start_sector;
        // A chain can never be longer than the table itself; anything longer is a cycle
        let mut remaining_hops = self.fat.len();

        while sector != ENDOFCHAIN {
            if limit.is_some_and(|limit| data.len() >= limit) {
                break;
            }
            if sector as usize >= self.fat.len() || remaining_hops == 0 {
                return Err(OleError::CorruptedFile(
                    "Invalid sector chain in FAT".to_string(),
                ));
            }
            remaining_hops -= 1;

            let sector_data = self.read_sector(sector)?;
            data.extend_from_slice(&sector_data);
            sector = self.fat[sector as usize];
        }

        Ok(data)
    }

    /// Read a stream by following the MiniFAT chain
    fn read_stream_from_minifat(
        &mut self,
        start_sector: u32,
        size: usize,
    ) -> Result<Vec<u8>, OleError> {
        if self.ministream.is_none() {
            let root_start = self
                .root
                .as_ref()
                .map(|root| root.start_sector)
                .ok_or_else(|| OleError::CorruptedFile("No root entry".to_string()))?;
            let ministream_data = self.read_stream_from_fat(root_start, None)?;
            self.ministream = Some(ministream_data);
        }

        let ministream = self.ministream.as_deref().unwrap_or_default();
        let mut data = Vec::with_capacity(size);
        let mut sector = start_sector;
        let mut remaining_hops = self.minifat.len();

        while sector != ENDOFCHAIN && data.len() < size {
            if sector as usize >= self.minifat.len() || remaining_hops == 0 {
                return Err(OleError::CorruptedFile(
                    "Invalid sector chain in MiniFAT".to_string(),
                ));
            }
            remaining_hops -= 1;

            let position = (sector as usize) * self.mini_sector_size;
            let chunk = ministream
                .get(position..position + self.mini_sector_size)
                .ok_or_else(|| OleError::CorruptedFile("Mini sector out of bounds".to_string()))?;
            data.extend_from_slice(chunk);

            sector = self.minifat[sector as usize];
        }

        data.truncate(size);
        Ok(data)
    }

    /// List all entries directly under the root storage, in directory order.
    ///
    /// In-order walk with an explicit stack; a sibling chain can be as long
    /// as the whole directory.
    pub fn root_entries(&self) -> Vec<DirectoryEntry> {
        let mut entries = Vec::new();
        let Some(root) = &self.root else {
            return entries;
        };

        let mut visited = vec![false; self.dir_entries.len()];
        let mut stack: Vec<&DirectoryEntry> = Vec::new();
        let mut current = root.sid_child;

        loop {
            while let Some(Some(entry)) = self.dir_entries.get(current as usize)
                && !std::mem::replace(&mut visited[current as usize], true)
            {
                stack.push(entry);
                current = entry.sid_left;
            }

            let Some(entry) = stack.pop() else {
                break;
            };
            entries.push(entry.clone());
            current = entry.sid_right;
        }

        entries
    }

    /// Find a top-level entry by name (case-insensitive, as names are in CFB)
    pub fn find_root_entry(&self, name: &str) -> Option<DirectoryEntry> {
        self.root_entries()
            .into_iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// Check if a top-level stream exists
    pub fn exists(&self, name: &str) -> bool {
        self.find_root_entry(name).is_some_and(|entry| entry.is_stream())
    }

    /// Open a top-level stream by name and return its contents
    pub fn open_stream(&mut self, name: &str) -> Result<Vec<u8>, OleError> {
        let entry = self.stream_entry(name)?;
        self.read_entry(&entry, entry.size as usize)
    }

    /// Read at most `len` bytes from the start of a top-level stream.
    ///
    /// Only the sectors needed to cover the prefix are read.
    pub fn open_stream_prefix(&mut self, name: &str, len: usize) -> Result<Vec<u8>, OleError> {
        let entry = self.stream_entry(name)?;
        let wanted = len.min(entry.size as usize);
        self.read_entry(&entry, wanted)
    }

    fn stream_entry(&self, name: &str) -> Result<DirectoryEntry, OleError> {
        let entry = self
            .find_root_entry(name)
            .ok_or_else(|| OleError::StreamNotFound(name.to_string()))?;
        if !entry.is_stream() {
            return Err(OleError::InvalidFormat(format!("{} is not a stream", name)));
        }
        Ok(entry)
    }

    fn read_entry(&mut self, entry: &DirectoryEntry, len: usize) -> Result<Vec<u8>, OleError> {
        if entry.is_minifat {
            self.read_stream_from_minifat(entry.start_sector, len)
        } else {
            let mut data = self.read_stream_from_fat(entry.start_sector, Some(len))?;
            data.truncate(len);
            Ok(data)
        }
    }

    /// Get the root entry name
    pub fn root_name(&self) -> Option<&str> {
        self.root.as_ref().map(|r| r.name.as_str())
    }
}

/// Parse a single directory entry from 128 bytes
fn parse_directory_entry(
    data: &[u8],
    sector_size: usize,
    mini_stream_cutoff: u32,
) -> Result<DirectoryEntry, OleError> {
    let raw = RawDirectoryEntry::read_from_bytes(data)
        .map_err(|_| OleError::InvalidFormat("Failed to parse directory entry".to_string()))?;

    let name_len = raw.name_len.get() as usize;
    let name = decode_utf16le(&raw.name[0..name_len.saturating_sub(2).min(64)]);

    // 512-byte sector files only use the low 32 bits of the size
    let size = if sector_size == 512 {
        raw.stream_size.get() & 0xFFFFFFFF
    } else {
        raw.stream_size.get()
    };

    let is_minifat = raw.entry_type == STGTY_STREAM && size < mini_stream_cutoff as u64;

    Ok(DirectoryEntry {
        name,
        entry_type: raw.entry_type,
        sid_left: raw.sid_left.get(),
        sid_right: raw.sid_right.get(),
        sid_child: raw.sid_child.get(),
        start_sector: raw.start_sector.get(),
        size,
        is_minifat,
    })
}
