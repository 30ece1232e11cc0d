use chrono::{DateTime, Utc};
use thiserror::Error;

const TLE_LINE_LEN: usize = 69;
const TLE_CHECKSUM_COL: usize = 68;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected 69 characters, got {found}")]
    LineLength { line: u8, found: usize },
    #[error("line {line}: expected marker \"{line} \"")]
    LineMarker { line: u8 },
    #[error("line {line}: checksum mismatch, computed {computed}, found '{found}'")]
    Checksum { line: u8, computed: u8, found: char },
    #[error("expected two element lines, optionally preceded by a name line")]
    Layout,
    #[error("element decode failed: {0}")]
    Elements(#[from] sgp4::TleError),
}

/// Canonical decoded form of a two-line element set. Immutable once parsed:
/// a value of this type always came from one well-formed line pair.
#[derive(Debug, Clone)]
pub struct OrbitalElements {
    elements: sgp4::Elements,
}

impl OrbitalElements {
    /// Decodes a line pair, validating length, line markers and the modulo-10
    /// checksum of both lines before any field is read.
    pub fn parse(name: Option<&str>, line1: &str, line2: &str) -> Result<Self, ParseError> {
        validate_line(1, line1)?;
        validate_line(2, line2)?;

        let elements =
            sgp4::Elements::from_tle(name.map(String::from), line1.as_bytes(), line2.as_bytes())?;

        Ok(Self { elements })
    }

    /// Accepts a 2-line or 3-line (name first) element block.
    pub fn parse_text(text: &str) -> Result<Self, ParseError> {
        let (name, line1, line2) = split_tle_text(text)?;
        Self::parse(name.as_deref(), &line1, &line2)
    }

    pub fn name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.elements.datetime, Utc)
    }

    /// Mean motion in revolutions per day.
    pub fn mean_motion(&self) -> f64 {
        self.elements.mean_motion
    }

    pub fn eccentricity(&self) -> f64 {
        self.elements.eccentricity
    }

    pub fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }

    pub fn right_ascension_deg(&self) -> f64 {
        self.elements.right_ascension
    }

    pub fn argument_of_perigee_deg(&self) -> f64 {
        self.elements.argument_of_perigee
    }

    pub fn mean_anomaly_deg(&self) -> f64 {
        self.elements.mean_anomaly
    }

    /// Drag term (B*), in units of inverse earth radii.
    pub fn drag_term(&self) -> f64 {
        self.elements.drag_term
    }

    pub fn element_set_number(&self) -> u64 {
        self.elements.element_set_number
    }

    pub(crate) fn raw(&self) -> &sgp4::Elements {
        &self.elements
    }
}

/// Splits raw text into (name, line1, line2) the way multi-line TLE files
/// are laid out. Blank lines and surrounding whitespace are ignored.
pub fn split_tle_text(text: &str) -> Result<(Option<String>, String, String), ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.len() {
        2 => Ok((None, lines[0].to_string(), lines[1].to_string())),
        3 => Ok((
            Some(lines[0].to_string()),
            lines[1].to_string(),
            lines[2].to_string(),
        )),
        _ => Err(ParseError::Layout),
    }
}

fn validate_line(which: u8, line: &str) -> Result<(), ParseError> {
    if line.len() != TLE_LINE_LEN {
        return Err(ParseError::LineLength {
            line: which,
            found: line.len(),
        });
    }

    let bytes = line.as_bytes();
    if bytes[0] != b'0' + which || bytes[1] != b' ' {
        return Err(ParseError::LineMarker { line: which });
    }

    let computed = checksum(bytes);
    if bytes[TLE_CHECKSUM_COL] != b'0' + computed {
        return Err(ParseError::Checksum {
            line: which,
            computed,
            found: bytes[TLE_CHECKSUM_COL] as char,
        });
    }

    Ok(())
}

// Sum of all digits plus one per minus sign over columns 1-68, modulo 10.
fn checksum(line: &[u8]) -> u8 {
    let sum: u32 = line[..TLE_CHECKSUM_COL]
        .iter()
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}
