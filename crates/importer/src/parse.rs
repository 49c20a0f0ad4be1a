use descent_core::vector::{Vector3, polar_to_cartesian};
use thiserror::Error;

/// Line formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    /// `x,y,z`
    CartesianVertex,
    /// `r,theta,phi`, converted to Cartesian on parse
    PolarVertex,
    /// a single number; `;` separates fields
    Scalar,
}

/// One successfully parsed record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Parsed {
    Vertex(Vector3),
    Scalar(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("expected {expected} field(s), found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("`{0}` is not a finite number")]
    NotANumber(String),
    #[error("first component {0} is negative")]
    NegativeFirstComponent(f64),
}

impl ParserKind {
    pub fn delimiter(self) -> u8 {
        match self {
            Self::CartesianVertex | Self::PolarVertex => b',',
            Self::Scalar => b';',
        }
    }

    pub fn field_count(self) -> usize {
        match self {
            Self::CartesianVertex | Self::PolarVertex => 3,
            Self::Scalar => 1,
        }
    }

    /// Parse the already-split fields of one record.
    pub fn parse<'a, I>(self, fields: I) -> Result<Parsed, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() != self.field_count() {
            return Err(RecordError::FieldCount {
                expected: self.field_count(),
                found: fields.len(),
            });
        }
        let values = fields
            .iter()
            .map(|field| parse_number(field))
            .collect::<Result<Vec<f64>, _>>()?;

        match self {
            Self::Scalar => Ok(Parsed::Scalar(values[0])),
            Self::CartesianVertex | Self::PolarVertex => {
                let (a, b, c) = (values[0], values[1], values[2]);
                if a < 0.0 {
                    return Err(RecordError::NegativeFirstComponent(a));
                }
                Ok(Parsed::Vertex(if self == Self::PolarVertex {
                    polar_to_cartesian(a, b, c)
                } else {
                    [a, b, c]
                }))
            }
        }
    }

    /// Split and parse a raw text line.
    pub fn parse_line(self, line: &str) -> Result<Parsed, RecordError> {
        let delimiter = char::from(self.delimiter());
        self.parse(line.split(delimiter).map(str::trim))
    }
}

fn parse_number(field: &str) -> Result<f64, RecordError> {
    let trimmed = field.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::NotANumber(trimmed.to_string())),
    }
}
