use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Raw contents of one input file, fully read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSequence {
    source: PathBuf,
    bytes: Vec<u8>,
}

impl ByteSequence {
    pub fn new(source: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The reference/candidate pair handed from loading to comparison.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub reference: ByteSequence,
    pub candidate: ByteSequence,
}

/// One index of the overlapping prefix. Renders candidate first, then reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteEntry {
    pub index: usize,
    pub reference: u8,
    pub candidate: u8,
}

impl ByteEntry {
    pub fn is_match(&self) -> bool {
        self.reference == self.candidate
    }
}

impl fmt::Display for ByteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.is_match() { "==" } else { "!=" };
        write!(
            f,
            "{}: {:#x} {} {:#x}",
            self.index, self.candidate, op, self.reference
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    pub reference_len: usize,
    pub candidate_len: usize,
    pub entries: Vec<ByteEntry>,
    pub identical: bool,
}

impl ComparisonReport {
    pub const LENGTH_MISMATCH_LINE: &'static str = "length does not match";

    pub fn length_matches(&self) -> bool {
        self.reference_len == self.candidate_len
    }

    pub fn is_identical(&self) -> bool {
        self.identical
    }

    pub fn mismatch_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_match()).count()
    }

    pub fn first_mismatch(&self) -> Option<&ByteEntry> {
        self.entries.iter().find(|e| !e.is_match())
    }

    pub fn verdict_line(&self) -> &'static str {
        if self.identical {
            "True"
        } else {
            "False"
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self)
    }
}

/// Optional length line, one line per compared index, then the verdict.
impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.length_matches() {
            writeln!(f, "{}", Self::LENGTH_MISMATCH_LINE)?;
        }
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        writeln!(f, "{}", self.verdict_line())
    }
}
