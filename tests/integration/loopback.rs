//! Round-trip coverage: join(split(raw)) == raw across the supported grid.

use crate::{opts, random_bytes, repetitive_bytes, TYPES};
use anyhow::{ensure, Result};
use qrpack_core::{join, split, Encoding, FileType, SplitOptions};

fn round_trip(raw: &[u8], file_type: FileType, options: &SplitOptions) -> Result<()> {
    let result = split(raw, file_type, options)?;
    ensure!(result.version <= options.max_version);
    ensure!(result.parts.len() >= options.min_split as usize);

    let joined = join(&result.parts)?;
    ensure!(joined.file_type == file_type, "file type must survive");
    ensure!(joined.raw == raw, "payload must survive");
    Ok(())
}

#[test]
fn grid_of_encodings_sizes_and_versions() -> Result<()> {
    let encodings = [
        None,
        Some(Encoding::Hex),
        Some(Encoding::Base32),
        Some(Encoding::Base32Z),
    ];
    let sizes = [10usize, 100, 2000, 10_000, 50_000];
    let max_versions = [11u8, 29, 40];

    for encoding in encodings {
        for &size in &sizes {
            for &max_version in &max_versions {
                for low_entropy in [true, false] {
                    let raw = if low_entropy {
                        repetitive_bytes(size)
                    } else {
                        random_bytes(size, size as u64)
                    };
                    round_trip(&raw, FileType::Psbt, &opts(encoding, max_version))?;
                }
            }
        }
    }
    Ok(())
}

#[test]
fn every_file_type_survives() -> Result<()> {
    let raw = random_bytes(500, 7);
    for file_type in TYPES {
        round_trip(&raw, file_type, &SplitOptions::default())?;
    }
    // the extension codes too
    for file_type in [FileType::KtRx, FileType::KtTx, FileType::KtPsbt] {
        round_trip(&raw, file_type, &SplitOptions::default())?;
    }
    Ok(())
}

#[test]
fn requested_encoding_only_downgrades_from_z() -> Result<()> {
    // incompressible data under a Z request comes out as plain base-32
    let raw = random_bytes(1000, 99);
    let result = split(&raw, FileType::Binary, &opts(Some(Encoding::Base32Z), 40))?;
    let code = result.parts[0].as_bytes()[2] as char;
    ensure!(code == '2', "Z on incompressible data must fall back to 2, got {code}");

    // hex and plain base-32 requests are always honored verbatim
    for (requested, expect) in [(Encoding::Hex, 'H'), (Encoding::Base32, '2')] {
        let result = split(&repetitive_bytes(1000), FileType::Binary, &opts(Some(requested), 40))?;
        let code = result.parts[0].as_bytes()[2] as char;
        ensure!(code == expect);
    }
    Ok(())
}

#[test]
fn forced_min_split_round_trips() -> Result<()> {
    let raw = random_bytes(4000, 13);
    let options = SplitOptions {
        min_split: 4,
        ..SplitOptions::default()
    };
    let result = split(&raw, FileType::Binary, &options)?;
    ensure!(result.parts.len() >= 4);

    let joined = join(&result.parts)?;
    ensure!(joined.raw == raw);
    Ok(())
}

#[test]
fn single_byte_and_empty_payloads() -> Result<()> {
    round_trip(&[0x00], FileType::Binary, &SplitOptions::default())?;
    round_trip(&[], FileType::Binary, &SplitOptions::default())?;
    Ok(())
}
