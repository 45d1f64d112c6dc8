//! Decoding of run-length encoded Life patterns.
//!
//! The format is the one used by most Life pattern collections:
//!
//! ```text
//! #N Acorn
//! x = 7, y = 3, rule = B3/S23
//! bo5b$3bo3b$2o2b3o!
//! ```
//!
//! Lines starting with `#` are comments. The `x = W, y = H` header centres
//! the pattern: decoding starts at `(-(W / 2), H / 2 + 1)`. In the body, a
//! count prefixes a tag (default 1): `b` is a run of dead cells, `o` a run
//! of live cells, `$` ends the current row (a count skips rows), and `!`
//! ends the pattern. Rows run downwards, towards smaller `y`.

use alloc::vec::Vec;

use crate::life::Cell;

/// Errors from [`decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RleError {
    /// A body line held a character that is not a count or a tag.
    #[error("unexpected character {character:?} on line {line}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// 1-based line number.
        line: usize,
    },

    /// A line starting with `x` is not a valid `x = W, y = H` header.
    #[error("invalid header on line {line}")]
    InvalidHeader {
        /// 1-based line number.
        line: usize,
    },

    /// A run count is larger than [`MAX_RUN`].
    #[error("run count exceeds {MAX_RUN} on line {line}")]
    RunOverflow {
        /// 1-based line number.
        line: usize,
    },
}

/// Largest run count accepted for any tag.
pub const MAX_RUN: i32 = 1 << 20;

struct Decoder {
    origin_x: i32,
    x: i32,
    y: i32,
    run: Option<i32>,
    cells: Vec<Cell>,
}

impl Decoder {
    fn at(x: i32, y: i32) -> Self {
        Self {
            origin_x: x,
            x,
            y,
            run: None,
            cells: Vec::new(),
        }
    }

    fn restart(&mut self, x: i32, y: i32) {
        self.origin_x = x;
        self.x = x;
        self.y = y;
        self.run = None;
    }

    fn take_run(&mut self) -> i32 {
        self.run.take().unwrap_or(1)
    }

    /// Feeds one body character. Returns `false` once the pattern has ended.
    fn feed(&mut self, character: char, line: usize) -> Result<bool, RleError> {
        match character {
            '0'..='9' => {
                let digit = character as i32 - '0' as i32;
                let run = self
                    .run
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|run| run.checked_add(digit))
                    .filter(|&run| run <= MAX_RUN)
                    .ok_or(RleError::RunOverflow { line })?;
                self.run = Some(run);
            }
            'b' => {
                let run = self.take_run();
                self.x = self.x.wrapping_add(run);
            }
            'o' => {
                let run = self.take_run();
                for offset in 0..run {
                    self.cells
                        .push(Cell::new(self.x.wrapping_add(offset), self.y));
                }
                self.x = self.x.wrapping_add(run);
            }
            '$' => {
                let run = self.take_run();
                self.x = self.origin_x;
                self.y = self.y.wrapping_sub(run);
            }
            '!' => return Ok(false),
            c if c.is_whitespace() => {}
            character => return Err(RleError::UnexpectedCharacter { character, line }),
        }
        Ok(true)
    }
}

/// Parses `x = W, y = H[, ...]` into `(W, H)`.
fn parse_header(header: &str) -> Option<(i32, i32)> {
    let mut width = None;
    let mut height = None;
    for field in header.split(',') {
        let (key, value) = field.split_once('=')?;
        match key.trim() {
            "x" => width = Some(value.trim().parse::<i32>().ok()?),
            "y" => height = Some(value.trim().parse::<i32>().ok()?),
            _ => {}
        }
    }

    match (width, height) {
        (Some(w), Some(h)) if w >= 0 && h >= 0 => Some((w, h)),
        _ => None,
    }
}

/// Decodes an RLE pattern into its live cells, in the order they appear.
///
/// Without a header the pattern starts at the origin.
///
/// # Errors
///
/// Returns [`RleError`] on a malformed header, an unknown body character,
/// or an oversized run count.
///
/// # Examples
///
/// ```rust
/// use array_hash::life::Cell;
/// use array_hash::rle;
///
/// let cells = rle::decode("x = 3, y = 1\n3o!")?;
/// assert_eq!(cells, [Cell::new(-1, 1), Cell::new(0, 1), Cell::new(1, 1)]);
/// # Ok::<(), rle::RleError>(())
/// ```
pub fn decode(input: &str) -> Result<Vec<Cell>, RleError> {
    let mut decoder = Decoder::at(0, 0);

    'lines: for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        if text.starts_with('x') {
            let (width, height) = parse_header(text).ok_or(RleError::InvalidHeader { line })?;
            decoder.restart(-(width / 2), height / 2 + 1);
            continue;
        }

        for character in text.chars() {
            if !decoder.feed(character, line)? {
                break 'lines;
            }
        }
    }

    Ok(decoder.cells)
}
