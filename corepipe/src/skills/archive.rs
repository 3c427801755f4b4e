// /////////////////////////////////////////////////////////////////////////////
// Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Hardened Skill Archive Reader
//!
//! Parses a skill artifact (a ZIP containing a top-level `SKILL.md`) under
//! limits sized to stop a ZIP bomb before a single byte of the archive is
//! decompressed to disk: a compressed-size cap, a file-count cap, a
//! per-entry compression-ratio cap, a total-uncompressed-size cap, and a
//! bounded reader around the one file this core actually extracts.
//!
//! Hashes the whole artifact with SHA-256 (lowercase hex) and reaches for
//! the `zip` crate to read the archive half — the ecosystem's standard
//! reader for this format.

use corepipe_domain::error::CoreError;
use sha2::{Digest, Sha256};
use std::io::Read;

const MAX_COMPRESSED_BYTES: u64 = 100 * 1024 * 1024;
const MAX_FILE_COUNT: usize = 10_000;
const MAX_COMPRESSION_RATIO: u64 = 100;
const MAX_UNCOMPRESSED_TOTAL_BYTES: u64 = 500 * 1024 * 1024;
const MAX_SKILL_MD_BYTES: u64 = 1024 * 1024;
const SKILL_MD_ENTRY_NAME: &str = "SKILL.md";

/// The pieces the push pipeline needs out of a validated artifact.
pub struct ExtractedSkill {
    /// Lowercase 64-char hex SHA-256 of the raw artifact bytes.
    pub version_hash: String,
    pub skill_md: String,
}

/// Computes the content hash and extracts `SKILL.md`, enforcing every
/// archive-bomb guard before any entry is decompressed.
pub fn extract_skill(artifact: &[u8]) -> Result<ExtractedSkill, CoreError> {
    if artifact.len() as u64 > MAX_COMPRESSED_BYTES {
        return Err(CoreError::invalid_argument("artifact exceeds the 100 MiB compressed size limit"));
    }

    let version_hash = sha256_hex(artifact);

    let cursor = std::io::Cursor::new(artifact);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|err| CoreError::invalid_argument(format!("artifact is not a valid zip archive: {err}")))?;

    if archive.len() > MAX_FILE_COUNT {
        return Err(CoreError::invalid_argument("artifact exceeds the 10000 file count limit"));
    }

    let mut total_uncompressed: u64 = 0;
    let mut skill_md_index = None;

    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|err| CoreError::invalid_argument(format!("corrupt zip entry: {err}")))?;

        let name = entry.name().to_string();
        if name.bytes().any(|b| b < 0x20 || b == 0x7f) {
            return Err(CoreError::invalid_argument("artifact contains a filename with a control byte"));
        }
        if entry.enclosed_name().is_none() {
            return Err(CoreError::invalid_argument("artifact contains a path-escaping entry"));
        }
        let is_symlink = entry.unix_mode().map(|mode| mode & 0o170000 == 0o120000).unwrap_or(false);
        if is_symlink {
            return Err(CoreError::invalid_argument("artifact contains a symlink entry"));
        }

        let compressed = entry.compressed_size();
        let uncompressed = entry.size();
        total_uncompressed = total_uncompressed.saturating_add(uncompressed);
        if total_uncompressed > MAX_UNCOMPRESSED_TOTAL_BYTES {
            return Err(CoreError::invalid_argument("artifact exceeds the 500 MiB total uncompressed size limit"));
        }
        if compressed > 0 && uncompressed / compressed > MAX_COMPRESSION_RATIO {
            return Err(CoreError::invalid_argument("artifact entry exceeds the 100:1 compression ratio limit"));
        }

        if name == SKILL_MD_ENTRY_NAME {
            skill_md_index = Some(i);
        }
    }

    let index = skill_md_index
        .ok_or_else(|| CoreError::invalid_argument("artifact is missing a top-level SKILL.md"))?;

    let entry = archive
        .by_index(index)
        .map_err(|err| CoreError::invalid_argument(format!("corrupt zip entry: {err}")))?;

    let mut limited = entry.take(MAX_SKILL_MD_BYTES + 1);
    let mut buf = Vec::new();
    limited
        .read_to_end(&mut buf)
        .map_err(|err| CoreError::invalid_argument(format!("failed reading SKILL.md: {err}")))?;

    if buf.len() as u64 > MAX_SKILL_MD_BYTES {
        return Err(CoreError::invalid_argument("SKILL.md too large"));
    }
    if buf.is_empty() {
        return Err(CoreError::invalid_argument("SKILL.md is empty"));
    }

    let skill_md = String::from_utf8(buf).map_err(|_| CoreError::invalid_argument("SKILL.md is not valid UTF-8"))?;

    Ok(ExtractedSkill { version_hash, skill_md })
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = std::io::Cursor::new(&mut buf);
            let mut writer = zip::ZipWriter::new(cursor);
            let options: zip::write::FileOptions<()> =
                zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
            for (name, contents) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(contents).unwrap();
            }
            writer.finish().unwrap();
        }
        buf
    }

    #[test]
    fn extracts_skill_md_and_hashes_whole_artifact() {
        let zip = build_zip(&[("SKILL.md", b"# Hello")]);
        let extracted = extract_skill(&zip).unwrap();
        assert_eq!(extracted.skill_md, "# Hello");
        assert_eq!(extracted.version_hash, sha256_hex(&zip));
        assert_eq!(extracted.version_hash.len(), 64);
    }

    #[test]
    fn rejects_missing_skill_md() {
        let zip = build_zip(&[("README.md", b"nope")]);
        let err = extract_skill(&zip).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_empty_skill_md() {
        let zip = build_zip(&[("SKILL.md", b"")]);
        let err = extract_skill(&zip).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_non_zip_bytes() {
        let err = extract_skill(b"not a zip").unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_control_byte_in_filename() {
        let zip = build_zip(&[("SKILL.md", b"# ok"), ("bad\x00name", b"x")]);
        let err = extract_skill(&zip).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
    }
}
