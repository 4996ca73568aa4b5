//! Public crunch entry points and output assembly.
//!
//! A crunch is a pure function of the input image and [`Options`]:
//!
//! 1. [`Options::validate`] resolves the output [`Mode`] (fails fast on a bad
//!    address; nothing is allocated before that).
//! 2. The payload (input minus its load address) is parsed and encoded.
//! 3. [`assemble`] lays out the final image for the selected mode.
//!
//! Output layouts:
//!
//! | mode        | bytes                                                      |
//! |-------------|------------------------------------------------------------|
//! | plain       | `[load][depack_to][stream]`, load chosen for in-place use  |
//! | relocated   | `[address - len - 2][depack_to][stream]`                   |
//! | executable  | `[$0801][patched decruncher][stream]`                      |

use super::decruncher::{Patch, BASIC_START, DECRUNCHER_LEN};
use super::encode::{encode, Packed};
use super::index::MatchIndex;
use super::parse::parse_with_index;
use super::types::{CrunchError, MAX_INPUT_SIZE, PRG_HEADER_SIZE};
use crate::notify::{Notify, Silent, LEVEL_INFO};

// ─────────────────────────────────────────────────────────────────────────────
// Options
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-facing crunch configuration.
///
/// `address` is the jump target for executables and the destination for
/// relocated images; it is range-checked in every mode. When both flags are
/// set, `executable` takes precedence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub executable: bool,
    pub relocated: bool,
    pub address: i64,
}

impl Options {
    /// Self-extracting image jumping to `address` after decrunching.
    pub fn executable(address: i64) -> Self {
        Self {
            executable: true,
            relocated: false,
            address,
        }
    }

    /// Plain image whose packed data loads to end just below `address`.
    pub fn relocated(address: i64) -> Self {
        Self {
            executable: false,
            relocated: true,
            address,
        }
    }

    /// Check the address and pick the output mode.
    pub fn validate(&self) -> Result<Mode, CrunchError> {
        let address = validate_address(self.address)?;
        Ok(if self.executable {
            Mode::Executable(address)
        } else if self.relocated {
            Mode::Relocated(address)
        } else {
            Mode::Plain
        })
    }
}

/// Validated output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    Relocated(u16),
    Executable(u16),
}

/// Accept `address` only if it fits the 16-bit address space.
pub fn validate_address(address: i64) -> Result<u16, CrunchError> {
    u16::try_from(address).map_err(|_| CrunchError::InvalidAddress(address))
}

/// Parse an address written as decimal, `0x`-prefixed or `$`-prefixed hex.
///
/// Only the syntax is checked here; the range check is [`validate_address`].
pub fn parse_address(s: &str) -> Result<i64, CrunchError> {
    let t = s.trim();
    let (digits, radix) = match t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .or_else(|| t.strip_prefix('$'))
    {
        Some(hex) => (hex, 16),
        None => (t, 10),
    };
    i64::from_str_radix(digits, radix).map_err(|_| CrunchError::InvalidAddressSyntax(s.to_owned()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Crunch to a plain image.
pub fn crunch(data: &[u8]) -> Result<Vec<u8>, CrunchError> {
    crunch_with(data, &Options::default(), &mut Silent)
}

/// Crunch to a self-extracting image that jumps to `address`.
pub fn ecrunch(data: &[u8], address: i64) -> Result<Vec<u8>, CrunchError> {
    crunch_with(data, &Options::executable(address), &mut Silent)
}

/// Crunch to a plain image relocated below `address`.
pub fn rcrunch(data: &[u8], address: i64) -> Result<Vec<u8>, CrunchError> {
    crunch_with(data, &Options::relocated(address), &mut Silent)
}

/// Crunch `data` (a PRG image) with explicit options and diagnostics sink.
pub fn crunch_with(
    data: &[u8],
    options: &Options,
    notify: &mut dyn Notify,
) -> Result<Vec<u8>, CrunchError> {
    Workspace::new().crunch(data, options, notify)
}

/// Split a PRG image into its load address and payload.
pub fn split_prg(data: &[u8]) -> Result<([u8; 2], &[u8]), CrunchError> {
    if data.len() < PRG_HEADER_SIZE {
        return Err(CrunchError::InputTooShort(data.len()));
    }
    let payload = &data[PRG_HEADER_SIZE..];
    if payload.len() > MAX_INPUT_SIZE {
        return Err(CrunchError::InputTooLarge(payload.len()));
    }
    Ok(([data[0], data[1]], payload))
}

// ─────────────────────────────────────────────────────────────────────────────
// Workspace
// ─────────────────────────────────────────────────────────────────────────────

/// Reusable allocation for repeated crunches.
///
/// Holds the two 64 Ki-entry context tables so that crunching many small
/// files does not reallocate them each time. Output never depends on what a
/// workspace was used for before.
#[derive(Debug, Default)]
pub struct Workspace {
    index: Option<MatchIndex>,
}

impl Workspace {
    pub fn new() -> Self {
        Self { index: None }
    }

    pub fn crunch(
        &mut self,
        data: &[u8],
        options: &Options,
        notify: &mut dyn Notify,
    ) -> Result<Vec<u8>, CrunchError> {
        let mode = options.validate()?;
        let (load, payload) = split_prg(data)?;

        let packed = self.pack(payload, notify);
        let image = assemble(load, payload.len(), &packed, mode);

        crate::notify!(
            notify,
            LEVEL_INFO,
            "{} -> {} bytes (stream {}, margin {})",
            data.len(),
            image.len(),
            packed.bytes.len(),
            packed.margin
        );
        Ok(image)
    }

    /// Parse and encode a raw payload (no load address).
    pub fn pack(&mut self, payload: &[u8], notify: &mut dyn Notify) -> Packed {
        let index = self.index.take().unwrap_or_default();
        let (nodes, index) = parse_with_index(payload, index, notify);
        self.index = Some(index);
        encode(payload, &nodes, notify)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output assembler
// ─────────────────────────────────────────────────────────────────────────────

/// Lay out the final image.
///
/// `load` is the source image's load address (also the depack target) and
/// `original_len` the payload size.
pub fn assemble(load: [u8; 2], original_len: usize, packed: &Packed, mode: Mode) -> Vec<u8> {
    let pack_len = packed.bytes.len();

    if let Mode::Executable(jump_to) = mode {
        let code = Patch::new(pack_len, load, jump_to).apply();
        let mut out = Vec::with_capacity(2 + DECRUNCHER_LEN + pack_len);
        out.extend_from_slice(&BASIC_START.to_le_bytes());
        out.extend_from_slice(&code);
        out.extend_from_slice(&packed.bytes);
        return out;
    }

    let start: i64 = match mode {
        Mode::Relocated(address) => address as i64 - pack_len as i64 - 2,
        _ => {
            // Place the stream so that in-place decrunching never overtakes
            // the unread input.
            u16::from_le_bytes(load) as i64 + original_len as i64 - pack_len as i64 - 2
                + packed.margin
        }
    };

    let mut out = Vec::with_capacity(4 + pack_len);
    // The load address wraps within the 64 KiB address space.
    out.extend_from_slice(&(start as u16).to_le_bytes());
    out.extend_from_slice(&load);
    out.extend_from_slice(&packed.bytes);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Cruncher
// ─────────────────────────────────────────────────────────────────────────────

/// A validated crunch job that memoizes its result.
#[derive(Debug)]
pub struct Cruncher<'a> {
    data: &'a [u8],
    options: Options,
    result: Option<Vec<u8>>,
}

impl<'a> Cruncher<'a> {
    /// Validate `options` up front; an invalid address never reaches the engine.
    pub fn new(data: &'a [u8], options: Options) -> Result<Self, CrunchError> {
        options.validate()?;
        split_prg(data)?;
        Ok(Self {
            data,
            options,
            result: None,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Crunch on first call; later calls return the stored image.
    pub fn crunch(&mut self) -> Result<&[u8], CrunchError> {
        self.crunch_with(&mut Silent)
    }

    pub fn crunch_with(&mut self, notify: &mut dyn Notify) -> Result<&[u8], CrunchError> {
        let image = match self.result.take() {
            Some(image) => image,
            None => crunch_with(self.data, &self.options, notify)?,
        };
        Ok(self.result.insert(image).as_slice())
    }

    /// The image produced by the last [`crunch`](Self::crunch), if any.
    pub fn result(&self) -> Option<&[u8]> {
        self.result.as_deref()
    }
}
