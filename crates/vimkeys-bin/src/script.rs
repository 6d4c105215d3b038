//! Key script format.
//!
//! Whitespace-separated tokens, `#` comments to end of line:
//! * `name`  - tap (press then release)
//! * `+name` - press
//! * `-name` - release
//!
//! `name` is a key name (`d`, `esc`, `shift`, `.`) or a raw `0x..` code, the
//! latter for feeding codes outside the key vocabulary.

use anyhow::{Context, Result, bail};
use core_events::{KeyCode, KeyEvent};

fn parse_code(name: &str) -> Result<u16> {
    if let Some(hex) = name.strip_prefix("0x") {
        return u16::from_str_radix(hex, 16).with_context(|| format!("bad raw code {name:?}"));
    }
    Ok(name.parse::<KeyCode>()?.code())
}

fn parse_token(token: &str, out: &mut Vec<KeyEvent>) -> Result<()> {
    let (edge, name) = match token.as_bytes().first() {
        Some(b'+') => (Some(true), &token[1..]),
        Some(b'-') => (Some(false), &token[1..]),
        _ => (None, token),
    };
    if name.is_empty() {
        bail!("missing key name in {token:?}");
    }
    let code = parse_code(name)?;
    match edge {
        Some(pressed) => out.push(KeyEvent::new(code, pressed)),
        None => {
            out.push(KeyEvent::new(code, true));
            out.push(KeyEvent::new(code, false));
        }
    }
    Ok(())
}

pub fn parse(text: &str) -> Result<Vec<KeyEvent>> {
    let mut events = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.split_once('#').map_or(line, |(code, _)| code);
        for token in line.split_whitespace() {
            parse_token(token, &mut events).with_context(|| format!("line {}", idx + 1))?;
        }
    }
    Ok(events)
}
