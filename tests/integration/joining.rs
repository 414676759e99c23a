//! Transport disorder: join must tolerate any order and any duplication,
//! and refuse anything inconsistent.

use crate::{opts, random_bytes};
use anyhow::{ensure, Result};
use qrpack_core::{join, split, Encoding, Error, FileType, SplitOptions};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn series_of(total: usize) -> (Vec<u8>, Vec<String>) {
    let raw = random_bytes(total, total as u64);
    let result = split(&raw, FileType::Binary, &opts(Some(Encoding::Hex), 11))
        .expect("hex split within version 11");
    assert!(result.parts.len() > 2, "test needs a multi-fragment series");
    (raw, result.parts)
}

#[test]
fn any_permutation_joins() -> Result<()> {
    let (raw, parts) = series_of(2000);
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let mut shuffled = parts.clone();
        shuffled.shuffle(&mut rng);
        let joined = join(&shuffled)?;
        ensure!(joined.raw == raw);
    }
    Ok(())
}

#[test]
fn duplicates_are_harmless() -> Result<()> {
    let (raw, parts) = series_of(1500);

    // every fragment supplied three times, reversed
    let mut tripled: Vec<String> = Vec::new();
    for _ in 0..3 {
        tripled.extend(parts.iter().rev().cloned());
    }
    let joined = join(&tripled)?;
    ensure!(joined.raw == raw);
    Ok(())
}

#[test]
fn each_missing_index_is_reported_exactly() {
    let (_, parts) = series_of(2000);

    for drop in 0..parts.len() {
        let subset: Vec<&String> = parts
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop)
            .map(|(_, p)| p)
            .collect();
        assert_eq!(
            join(&subset),
            Err(Error::MissingFragments(vec![drop as u16])),
            "dropping fragment {drop} must name exactly that index"
        );
    }
}

#[test]
fn mutated_duplicate_is_a_conflict() {
    let (_, parts) = series_of(1500);

    let mut corrupted = parts[1].clone();
    let last = corrupted.pop().unwrap();
    corrupted.push(if last == '0' { '1' } else { '0' });

    let mut set = parts.clone();
    set.push(corrupted);
    assert_eq!(join(&set), Err(Error::ConflictingDuplicate(1)));
}

#[test]
fn two_series_never_merge() {
    let (_, mut parts) = series_of(2000);
    let other = split(
        &random_bytes(100, 5),
        FileType::Json,
        &SplitOptions::default(),
    )
    .unwrap();
    parts.extend(other.parts);
    assert_eq!(join(&parts), Err(Error::InconsistentSeries));
}

#[test]
fn repeated_joins_as_fragments_arrive() {
    // a receiver re-supplies the whole accumulated set after every scan
    let (raw, parts) = series_of(2000);
    let mut collected: Vec<String> = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        collected.push(part.clone());
        let outcome = join(&collected);
        if i + 1 < parts.len() {
            assert!(matches!(outcome, Err(Error::MissingFragments(_))));
        } else {
            assert_eq!(outcome.unwrap().raw, raw);
        }
    }
}

#[test]
fn foreign_text_is_rejected_up_front() {
    let (_, mut parts) = series_of(1500);
    parts.push("https://example.com/not-a-fragment".into());
    assert_eq!(join(&parts), Err(Error::BadMagic));
}
