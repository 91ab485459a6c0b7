//! OD matrix codec.
//!
//! Three document encodings describe the same logical matrix:
//!
//! | Encoding     | Shape                                                        |
//! |--------------|--------------------------------------------------------------|
//! | `Raw`        | one string; rows split by the origin separator, cells by the destination separator |
//! | `Row`        | one entry per origin (by reference), destinations positional  |
//! | `CellByCell` | explicit `(origin, destination, value)` triples; zeros omitted |
//!
//! ```text
//! Raw, "+" / ",":   "0,5,7+3,0,2+1,1,0"
//! Raw, "," / ",":   "0,5,7,3,0,2,1,1,0"        (must be a perfect square)
//! Row, ",":         o=z1 "0,5,7"   o=z2 "3,0,2"   o=z3 "1,1,0"
//! ```
//!
//! Separators are matched literally, so metacharacters such as `+`, `*` or
//! `^` need no escaping.  Document values are vehicles/hour; the decoded
//! matrix holds pcu/hour (`value × pcu`).

use std::fmt;

use tm_core::ZoneId;

use crate::{DemandError, DemandResult, MatrixShapeError, OdMatrix};

// ── Document-side types ───────────────────────────────────────────────────────

/// One origin of a row-delimited matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct RowEntry {
    /// Origin zone reference.
    pub origin: String,
    /// Destination values in zoning order, joined by the row separator.
    pub values: String,
}

/// One cell of a cell-by-cell matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub origin:      String,
    pub destination: String,
    pub value:       f64,
}

/// A matrix as it appears in a demand document.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixEncoding {
    Raw {
        text:                  String,
        origin_separator:      String,
        destination_separator: String,
    },
    Row {
        separator: String,
        rows:      Vec<RowEntry>,
    },
    CellByCell(Vec<Cell>),
}

impl MatrixEncoding {
    pub fn kind(&self) -> MatrixEncodingKind {
        match self {
            MatrixEncoding::Raw { .. }     => MatrixEncodingKind::Raw,
            MatrixEncoding::Row { .. }     => MatrixEncodingKind::Row,
            MatrixEncoding::CellByCell(_)  => MatrixEncodingKind::CellByCell,
        }
    }
}

/// Which encoding a writer emits.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatrixEncodingKind {
    #[default]
    Raw,
    Row,
    CellByCell,
}

impl fmt::Display for MatrixEncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatrixEncodingKind::Raw        => "raw",
            MatrixEncodingKind::Row        => "row",
            MatrixEncodingKind::CellByCell => "cell-by-cell",
        })
    }
}

// ── Number format ─────────────────────────────────────────────────────────────

/// How matrix values are written as text.
///
/// Writing rounds to `decimal_places`, so a value with more fractional digits
/// changes once on its first write and is stable from then on.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    /// Maximum fractional digits; trailing zeros are dropped.
    pub decimal_places:    usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { decimal_separator: '.', decimal_places: 6 }
    }
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        let mut s = format!("{:.*}", self.decimal_places, value);
        if s.contains('.') {
            let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
            s.truncate(trimmed);
        }
        if s == "-0" {
            s = "0".to_owned();
        }
        if self.decimal_separator != '.' {
            s = s.replace('.', &self.decimal_separator.to_string());
        }
        s
    }

    /// Parse one cell.  Values must be finite and non-negative.
    pub fn parse(&self, text: &str) -> DemandResult<f64> {
        let text = text.trim();
        let parsed = if self.decimal_separator == '.' {
            text.parse::<f64>()
        } else {
            text.replace(self.decimal_separator, ".").parse::<f64>()
        };
        match parsed {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
            _ => Err(DemandError::InvalidValue(text.to_owned())),
        }
    }
}

/// Separators and number format used when encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct CodecSettings {
    pub origin_separator:      String,
    pub destination_separator: String,
    pub number:                NumberFormat,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            origin_separator:      "+".to_owned(),
            destination_separator: ",".to_owned(),
            number:                NumberFormat::default(),
        }
    }
}

// ── Decoding ──────────────────────────────────────────────────────────────────

/// Decode `encoding` into a `zone_count × zone_count` matrix in pcu/hour.
///
/// `resolve_zone` maps an origin/destination reference to its zone; it is
/// only consulted by the row and cell-by-cell encodings.
///
/// # Errors
///
/// - [`DemandError::MalformedMatrix`] for any dimension mismatch.
/// - [`DemandError::InvalidValue`] for unparsable or negative cells.
/// - [`DemandError::EmptySeparator`] for an empty separator.
/// - whatever `resolve_zone` returns for unknown references.
pub fn decode<F>(
    encoding: &MatrixEncoding,
    zone_count: usize,
    pcu: f64,
    number: &NumberFormat,
    resolve_zone: F,
) -> DemandResult<OdMatrix>
where
    F: Fn(&str) -> DemandResult<ZoneId>,
{
    check_pcu(pcu)?;
    let separators_ok = match encoding {
        MatrixEncoding::Raw { origin_separator, destination_separator, .. } => {
            !origin_separator.is_empty() && !destination_separator.is_empty()
        }
        MatrixEncoding::Row { separator, .. } => !separator.is_empty(),
        MatrixEncoding::CellByCell(_) => true,
    };
    if !separators_ok {
        return Err(DemandError::EmptySeparator);
    }
    let mut matrix = match encoding {
        MatrixEncoding::Raw { text, origin_separator, destination_separator } => {
            decode_raw(text, origin_separator, destination_separator, zone_count, number)?
        }
        MatrixEncoding::Row { separator, rows } => {
            decode_rows(rows, separator, zone_count, number, &resolve_zone)?
        }
        MatrixEncoding::CellByCell(cells) => decode_cells(cells, zone_count, &resolve_zone)?,
    };
    matrix.scale(pcu);
    Ok(matrix)
}

fn decode_raw(
    text: &str,
    origin_sep: &str,
    dest_sep: &str,
    zone_count: usize,
    number: &NumberFormat,
) -> DemandResult<OdMatrix> {
    let chunks = split_values(text, origin_sep);

    let (size, values) = if origin_sep == dest_sep {
        let count = chunks.len();
        let size = (count as f64).sqrt().round() as usize;
        if size * size != count {
            return Err(MatrixShapeError::NotSquare { count }.into());
        }
        let values = chunks.iter().map(|c| number.parse(c)).collect::<DemandResult<Vec<_>>>()?;
        (size, values)
    } else {
        let size = chunks.len();
        let mut values = Vec::with_capacity(size * size);
        for (i, chunk) in chunks.iter().enumerate() {
            let cells = split_values(chunk, dest_sep);
            if cells.len() != size {
                return Err(MatrixShapeError::RowLength {
                    row:      i + 1,
                    columns:  cells.len(),
                    expected: size,
                }
                .into());
            }
            for cell in cells {
                values.push(number.parse(cell)?);
            }
        }
        (size, values)
    };

    if size != zone_count {
        return Err(MatrixShapeError::ZoneCountMismatch { expected: zone_count, found: size }.into());
    }
    OdMatrix::from_row_major(size, values)
}

fn decode_rows<F>(
    rows: &[RowEntry],
    separator: &str,
    zone_count: usize,
    number: &NumberFormat,
    resolve_zone: &F,
) -> DemandResult<OdMatrix>
where
    F: Fn(&str) -> DemandResult<ZoneId>,
{
    let mut matrix = OdMatrix::zeros(zone_count);
    let mut seen = vec![false; zone_count];
    for (i, row) in rows.iter().enumerate() {
        let origin = resolve_zone(&row.origin)?;
        if std::mem::replace(&mut seen[origin.index()], true) {
            return Err(MatrixShapeError::DuplicateOrigin { origin: row.origin.clone(), row: i + 1 }.into());
        }
        let cells = split_values(&row.values, separator);
        if cells.len() != zone_count {
            return Err(MatrixShapeError::RowLength {
                row:      i + 1,
                columns:  cells.len(),
                expected: zone_count,
            }
            .into());
        }
        for (d, cell) in cells.into_iter().enumerate() {
            matrix.set(origin, ZoneId(d as u32), number.parse(cell)?);
        }
    }
    let found = seen.iter().filter(|&&s| s).count();
    if found != zone_count {
        return Err(MatrixShapeError::MissingOrigins { expected: zone_count, found }.into());
    }
    Ok(matrix)
}

fn decode_cells<F>(cells: &[Cell], zone_count: usize, resolve_zone: &F) -> DemandResult<OdMatrix>
where
    F: Fn(&str) -> DemandResult<ZoneId>,
{
    let mut matrix = OdMatrix::zeros(zone_count);
    let mut seen = vec![false; zone_count * zone_count];
    for cell in cells {
        let origin = resolve_zone(&cell.origin)?;
        let destination = resolve_zone(&cell.destination)?;
        if !(cell.value.is_finite() && cell.value >= 0.0) {
            return Err(DemandError::InvalidValue(cell.value.to_string()));
        }
        if std::mem::replace(&mut seen[origin.index() * zone_count + destination.index()], true) {
            return Err(MatrixShapeError::DuplicateCell {
                origin:      cell.origin.clone(),
                destination: cell.destination.clone(),
            }
            .into());
        }
        matrix.set(origin, destination, cell.value);
    }
    Ok(matrix)
}

/// Split on a literal separator, dropping one trailing empty piece so that
/// `"1,2,"` reads as two values.  Blank input has no values.
fn split_values<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    let mut pieces: Vec<&str> = text.split(separator).collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }
    pieces
}

// ── Encoding ──────────────────────────────────────────────────────────────────

/// Encode a pcu/hour matrix as vehicles/hour in the requested form.
///
/// `zone_ref` produces the document reference of a zone (row and cell-by-cell
/// encodings only).
pub fn encode<F>(
    matrix: &OdMatrix,
    kind: MatrixEncodingKind,
    pcu: f64,
    settings: &CodecSettings,
    zone_ref: F,
) -> DemandResult<MatrixEncoding>
where
    F: Fn(ZoneId) -> String,
{
    check_pcu(pcu)?;
    let fmt = |v: f64| settings.number.format(v / pcu);
    let join_row = |row: &[f64]| {
        row.iter().map(|&v| fmt(v)).collect::<Vec<_>>().join(&settings.destination_separator)
    };

    Ok(match kind {
        MatrixEncodingKind::Raw => MatrixEncoding::Raw {
            text: matrix
                .rows()
                .map(join_row)
                .collect::<Vec<_>>()
                .join(&settings.origin_separator),
            origin_separator:      settings.origin_separator.clone(),
            destination_separator: settings.destination_separator.clone(),
        },
        MatrixEncodingKind::Row => MatrixEncoding::Row {
            separator: settings.destination_separator.clone(),
            rows: matrix
                .rows()
                .enumerate()
                .map(|(o, row)| RowEntry { origin: zone_ref(ZoneId(o as u32)), values: join_row(row) })
                .collect(),
        },
        MatrixEncodingKind::CellByCell => MatrixEncoding::CellByCell(
            matrix
                .non_zero()
                .map(|(o, d, v)| Cell { origin: zone_ref(o), destination: zone_ref(d), value: v / pcu })
                .collect(),
        ),
    })
}

fn check_pcu(pcu: f64) -> DemandResult<()> {
    if pcu.is_finite() && pcu > 0.0 {
        Ok(())
    } else {
        Err(DemandError::InvalidPcu(pcu))
    }
}
