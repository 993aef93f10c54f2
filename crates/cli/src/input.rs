use anyhow::{bail, Context};
use ferrous_wire_codec::hex_dump;
use std::io::{Read, Write};
use tracing::warn;

/// Reads a message from `path`, or stdin when `path` is `None`.
///
/// With `hex` set the input is hex text (see [`parse_hex`]); otherwise it is
/// taken as raw wire bytes. Input longer than `max_len` is cut to `max_len`
/// bytes, the same as a receive buffer of that size would.
pub fn read_message(path: Option<&str>, hex: bool, max_len: usize) -> anyhow::Result<Vec<u8>> {
    let raw = match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {}", path))?,
        None => {
            let mut raw = Vec::new();
            std::io::stdin()
                .read_to_end(&mut raw)
                .context("Failed to read stdin")?;
            raw
        }
    };

    let mut bytes = if hex {
        let text = std::str::from_utf8(&raw).context("Hex input is not valid UTF-8")?;
        parse_hex(text)?
    } else {
        raw
    };

    if bytes.len() > max_len {
        warn!(
            len = bytes.len(),
            max = max_len,
            "Input exceeds max_message_size, truncating"
        );
        bytes.truncate(max_len);
    }

    Ok(bytes)
}

/// Parses hex text into bytes.
///
/// Accepts whitespace-separated or run-together hex digits. Lines in the
/// layout [`hex_dump`] produces are also accepted: the leading offset and the
/// `|ascii|` column are skipped.
pub fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let mut digits = String::new();

    for line in text.lines() {
        let (data, is_dump) = match line.find('|') {
            Some(pos) => (&line[..pos], true),
            None => (line, false),
        };

        let mut tokens = data.split_whitespace();
        if is_dump {
            tokens.next();
        }
        for token in tokens {
            let token = token.strip_prefix("0x").unwrap_or(token);
            digits.push_str(token);
        }
    }

    if digits.len() % 2 != 0 {
        bail!("Hex input has an odd number of digits ({})", digits.len());
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            let pair = digits.get(i..i + 2).context("Hex input is not ASCII")?;
            u8::from_str_radix(pair, 16).with_context(|| format!("Invalid hex byte '{}'", pair))
        })
        .collect()
}

/// Writes an encoded message to stdout, raw or as a hex dump.
pub fn emit(bytes: &[u8], raw: bool) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    if raw {
        stdout.write_all(bytes)?;
    } else {
        stdout.write_all(hex_dump(bytes).as_bytes())?;
    }
    stdout.flush()?;
    Ok(())
}
