//! Fixed-record binary fixture format.
//!
//! A record is two 80-byte blocks, each holding 20 little-endian `i32`
//! values: the first block carries coefficients, the second the matching
//! exponents. Unused slots hold zero coefficients; trailing zero slots are
//! dropped when a record is loaded.

use std::io::{self, ErrorKind, Read, Write};

use super::{Polynomial, Term};
use crate::error::{Error, Result};

/// Number of term slots in one record.
pub const RECORD_TERMS: usize = 20;

/// Size in bytes of one coefficient or exponent block.
pub const BLOCK_BYTES: usize = RECORD_TERMS * 4;

type Block = [i32; RECORD_TERMS];

/// Reads one 80-byte block. Returns `Ok(None)` if the input is already
/// exhausted, and an `UnexpectedEof` error if it ends inside the block.
fn read_block<R: Read>(reader: &mut R) -> io::Result<Option<Block>> {
    let mut bytes = [0u8; BLOCK_BYTES];
    let mut filled = 0;

    while filled < BLOCK_BYTES {
        match reader.read(&mut bytes[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    match filled {
        0 => Ok(None),
        BLOCK_BYTES => {
            let mut block = [0i32; RECORD_TERMS];
            for (slot, chunk) in block.iter_mut().zip(bytes.chunks_exact(4)) {
                *slot = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            }
            Ok(Some(block))
        }
        n => Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("fixture block truncated after {} of {} bytes", n, BLOCK_BYTES),
        )),
    }
}

fn write_block<W: Write>(writer: &mut W, block: &Block) -> io::Result<()> {
    let mut bytes = [0u8; BLOCK_BYTES];
    for (chunk, value) in bytes.chunks_exact_mut(4).zip(block.iter()) {
        chunk.copy_from_slice(&value.to_le_bytes());
    }
    writer.write_all(&bytes)
}

/// One undecoded record: raw coefficient and exponent slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub coefs: [i32; RECORD_TERMS],
    pub exps: [i32; RECORD_TERMS],
}

impl Record {
    /// Number of slots up to and including the last non-zero coefficient.
    pub fn used(&self) -> usize {
        self.coefs.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1)
    }

    /// Decodes the used slots into a polynomial.
    ///
    /// # Errors
    /// * `Error::OutOfRange` - A used slot carries a negative exponent
    /// * `Error::NonCanonical` - Used slots are not in canonical order or contain a zero coefficient
    pub fn decode(&self) -> Result<Polynomial> {
        let used = self.used();
        let terms = self.coefs[..used]
            .iter()
            .zip(&self.exps[..used])
            .map(|(&coef, &exp)| {
                u32::try_from(exp)
                    .map(|exp| Term::new(i64::from(coef), exp))
                    .map_err(|_| Error::OutOfRange(format!("negative exponent {} in fixture", exp)))
            })
            .collect::<Result<Vec<_>>>()?;

        Polynomial::from_terms(terms)
    }
}

/// Reads one record without decoding it.
///
/// Returns `Ok(None)` if the input ended cleanly before the record, and an
/// `UnexpectedEof` error if it ends inside the record.
pub fn read_record<R: Read>(reader: &mut R) -> io::Result<Option<Record>> {
    let coefs = match read_block(reader)? {
        Some(block) => block,
        None => return Ok(None),
    };
    let exps = read_block(reader)?.ok_or_else(|| {
        io::Error::new(
            ErrorKind::UnexpectedEof,
            "fixture record is missing its exponent block",
        )
    })?;
    Ok(Some(Record { coefs, exps }))
}

/// Reads and decodes one polynomial record.
///
/// # Returns
/// * `Ok(Some(p))` - The decoded polynomial
/// * `Ok(None)` - The input ended cleanly before the record
///
/// # Errors
/// * `Error::Io` - Read failure, or input ending mid-record
/// * `Error::OutOfRange`, `Error::NonCanonical` - See [`Record::decode`]
pub fn read_polynomial<R: Read>(reader: &mut R) -> Result<Option<Polynomial>> {
    match read_record(reader)? {
        Some(record) => record.decode().map(Some),
        None => Ok(None),
    }
}

/// Writes one polynomial record, padding unused slots with zeros.
///
/// # Errors
/// * `Error::TooManyTerms` - More than [`RECORD_TERMS`] terms
/// * `Error::OutOfRange` - A coefficient or exponent does not fit in an `i32`
/// * `Error::Io` - Write failure
pub fn write_polynomial<W: Write>(writer: &mut W, polynomial: &Polynomial) -> Result<()> {
    if polynomial.len() > RECORD_TERMS {
        return Err(Error::TooManyTerms {
            terms: polynomial.len(),
            capacity: RECORD_TERMS,
        });
    }

    let mut coefs = [0i32; RECORD_TERMS];
    let mut exps = [0i32; RECORD_TERMS];
    for (i, term) in polynomial.terms().iter().enumerate() {
        coefs[i] = i32::try_from(term.coef)
            .map_err(|_| Error::OutOfRange(format!("coefficient {} exceeds i32", term.coef)))?;
        exps[i] = i32::try_from(term.exp)
            .map_err(|_| Error::OutOfRange(format!("exponent {} exceeds i32", term.exp)))?;
    }

    write_block(writer, &coefs)?;
    write_block(writer, &exps)?;
    Ok(())
}

/// Iterator over `(dividend, divisor)` record pairs.
///
/// Yields `None` once the input ends cleanly between pairs. Ending between
/// a dividend and its divisor is reported as an error.
#[derive(Debug)]
pub struct FixtureReader<R> {
    reader: R,
    done: bool,
}

impl<R: Read> FixtureReader<R> {
    pub fn new(reader: R) -> Self {
        FixtureReader {
            reader,
            done: false,
        }
    }

    /// Reads the next pair of undecoded records, `Ok(None)` at a clean end
    /// of input. Only I/O failures and truncation are errors here.
    pub fn next_records(&mut self) -> io::Result<Option<(Record, Record)>> {
        let dividend = match read_record(&mut self.reader)? {
            Some(record) => record,
            None => return Ok(None),
        };
        let divisor = read_record(&mut self.reader)?.ok_or_else(|| {
            io::Error::new(ErrorKind::UnexpectedEof, "fixture ends after a dividend")
        })?;
        Ok(Some((dividend, divisor)))
    }

    /// Reads and decodes the next pair, `Ok(None)` at a clean end of input.
    pub fn next_pair(&mut self) -> Result<Option<(Polynomial, Polynomial)>> {
        match self.next_records()? {
            Some((dividend, divisor)) => Ok(Some((dividend.decode()?, divisor.decode()?))),
            None => Ok(None),
        }
    }
}

impl<R: Read> Iterator for FixtureReader<R> {
    type Item = Result<(Polynomial, Polynomial)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_pair() {
            Ok(Some(pair)) => Some(Ok(pair)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
