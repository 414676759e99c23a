//! qrpack-ctl — command-line front end for splitting and joining fragments.
//!
//! Detects the payload's file type from content and extension before calling
//! split, and interprets the type code after join. The core library does
//! neither — fragments in, fragments out.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use qrpack_core::{capacity, join, split, Encoding, FileType, SplitOptions, HEADER_LEN};

// ── File type sniffing ────────────────────────────────────────────────────────

/// Guess the file type from name and content. May replace the payload:
/// an ASCII-hex transaction dump is decoded to its raw bytes first.
fn sniff_file_type(path: &Path, raw: Vec<u8>) -> Result<(FileType, Vec<u8>)> {
    let name = path.to_string_lossy().to_lowercase();

    if name.contains(".psb") {
        if !raw.starts_with(b"psbt\xff") {
            if raw.iter().take(10).all(|b| b.is_ascii_graphic()) {
                bail!(
                    "{} looks like a Base64 or hex armored PSBT — raw binary is required",
                    path.display()
                );
            }
            bail!("{} has a .psb* extension but no PSBT magic", path.display());
        }
        return Ok((FileType::Psbt, raw));
    }

    if raw.starts_with(b"01000000") || raw.starts_with(b"02000000") {
        // transaction saved as ASCII hex
        let text = std::str::from_utf8(&raw).context("hex transaction is not ASCII")?;
        let decoded = hex::decode(text.trim())
            .with_context(|| format!("{} starts like a hex transaction but is not", path.display()))?;
        return Ok((FileType::Txn, decoded));
    }

    if raw.starts_with(&[0x01, 0x00, 0x00, 0x00]) || raw.starts_with(&[0x02, 0x00, 0x00, 0x00]) {
        return Ok((FileType::Txn, raw));
    }

    if raw.first() == Some(&b'{') && raw.last() == Some(&b'}') {
        return Ok((FileType::Json, raw));
    }

    if std::str::from_utf8(&raw).is_ok() {
        return Ok((FileType::UnicodeText, raw));
    }

    Ok((FileType::Binary, raw))
}

// ── Subcommand handlers ───────────────────────────────────────────────────────

struct SplitArgs {
    infile: String,
    outfile: Option<String>,
    opts: SplitOptions,
}

fn cmd_split(args: SplitArgs) -> Result<()> {
    let path = Path::new(&args.infile);
    let raw = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (file_type, raw) = sniff_file_type(path, raw)?;

    let result = split(&raw, file_type, &args.opts)
        .with_context(|| format!("cannot split {}", path.display()))?;

    if result.parts.len() == 1 {
        eprintln!(
            "A single version {} code holds this {} payload.",
            result.version,
            file_type.name()
        );
    } else {
        eprintln!(
            "Use {} codes, each version {}, for this {} payload.",
            result.parts.len(),
            result.version,
            file_type.name()
        );
    }

    let mut text = String::new();
    for part in &result.parts {
        text.push_str(part);
        text.push('\n');
    }
    match args.outfile {
        Some(out) => {
            std::fs::write(&out, text).with_context(|| format!("failed to write {out}"))?
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn cmd_join(infile: Option<String>, outfile: Option<String>) -> Result<()> {
    let text = match &infile {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let parts: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let joined = join(&parts).context("fragment set did not join")?;

    eprintln!(
        "{} fragment(s) joined: {} bytes of {}.",
        parts.len(),
        joined.raw.len(),
        joined.file_type.name()
    );

    match outfile {
        Some(out) => {
            std::fs::write(&out, &joined.raw).with_context(|| format!("failed to write {out}"))?
        }
        None if joined.file_type == FileType::Json => {
            // pretty-print when we know it is JSON and it parses as such
            match serde_json::from_slice::<serde_json::Value>(&joined.raw) {
                Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
                Err(_) => std::io::stdout().write_all(&joined.raw)?,
            }
        }
        None => std::io::stdout().write_all(&joined.raw)?,
    }
    Ok(())
}

fn cmd_table() -> Result<()> {
    let hdr = "Vers | Pixels  | Chars |  Hex |  Base32 | 2xBase32 | 5xBase32 | 10xBase32";
    println!("{hdr}");
    println!("{}", hdr.chars().map(|c| if c == '|' { '|' } else { '-' }).collect::<String>());

    for v in capacity::MIN_VERSION..=capacity::MAX_VERSION {
        let chars = capacity::capacity_chars(v)?;
        let sz = capacity::version_size(v)?;
        let cap = chars - HEADER_LEN;
        let hex_bytes = cap / 2;
        let b32_bytes = (cap / 8) * 5;
        print!(" {v:3} | {sz:3}x{sz:<3} |  {chars:4} | {hex_bytes:4} | {b32_bytes:7}");
        for n in [2usize, 5, 10] {
            print!(" | {:8}", b32_bytes * n);
        }
        println!();
    }
    Ok(())
}

// ── Argument parsing ──────────────────────────────────────────────────────────

fn print_usage() {
    println!("Usage: qrpack-ctl <command> [options]");
    println!();
    println!("Commands:");
    println!("  split <file>    Encode a file as a series of fragments (alias: make)");
    println!("  join [file]     Reassemble fragments (one per line; stdin if no file)");
    println!("  table           Print the per-version capacity table");
    println!();
    println!("Split options:");
    println!("  --encoding H|2|Z    Force an encoding (default: trial compression)");
    println!("  --min-split <n>     Produce at least n fragments (default: 1)");
    println!("  --max-split <n>     Produce at most n fragments (default: 1295)");
    println!("  --min-version <n>   Smallest version to consider (default: 5)");
    println!("  --max-version <n>   Largest version to consider (default: 40)");
    println!();
    println!("Common options:");
    println!("  --out <file>        Write output to a file instead of stdout");
}

fn parse_u16(flag: &str, value: Option<&String>) -> Result<u16> {
    value
        .with_context(|| format!("{flag} requires a value"))?
        .parse()
        .with_context(|| format!("{flag} must be a number"))
}

fn parse_u8(flag: &str, value: Option<&String>) -> Result<u8> {
    value
        .with_context(|| format!("{flag} requires a value"))?
        .parse()
        .with_context(|| format!("{flag} must be a number"))
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut opts = SplitOptions::default();
    let mut outfile: Option<String> = None;
    let mut remaining: Vec<&str> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--encoding" => {
                i += 1;
                let v = args.get(i).context("--encoding requires a value")?;
                let c = match v.chars().next() {
                    Some(c) if v.len() == 1 => c,
                    _ => bail!("--encoding takes a single character: H, 2 or Z"),
                };
                opts.encoding = Some(Encoding::try_from(c)?);
            }
            "--min-split" => {
                i += 1;
                opts.min_split = parse_u16("--min-split", args.get(i))?;
            }
            "--max-split" => {
                i += 1;
                opts.max_split = parse_u16("--max-split", args.get(i))?;
            }
            "--min-version" => {
                i += 1;
                opts.min_version = parse_u8("--min-version", args.get(i))?;
            }
            "--max-version" => {
                i += 1;
                opts.max_version = parse_u8("--max-version", args.get(i))?;
            }
            "--out" => {
                i += 1;
                outfile = Some(args.get(i).context("--out requires a value")?.clone());
            }
            other => remaining.push(other),
        }
        i += 1;
    }

    match remaining.as_slice() {
        ["split", infile] | ["make", infile] => cmd_split(SplitArgs {
            infile: infile.to_string(),
            outfile,
            opts,
        }),
        ["join"] => cmd_join(None, outfile),
        ["join", infile] => cmd_join(Some(infile.to_string()), outfile),
        ["table"] => cmd_table(),
        ["help"] | ["--help"] | ["-h"] | [] => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other.join(" "));
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
