//! Cell value types

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Fixed display format for instants, used when estimating column widths
pub const INSTANT_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents the value written into a cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    /// Empty cell (written as an empty text cell)
    #[default]
    Empty,

    /// String value
    Text(String),

    /// Boolean value (TRUE/FALSE)
    Boolean(bool),

    /// Numeric value
    Number(Number),

    /// Date and time, stored as a serial date number with the date style
    Instant(NaiveDateTime),

    /// External link shown through its display text
    Hyperlink(Hyperlink),
}

impl CellValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }

    /// Create a new numeric value
    pub fn number<N: Into<Number>>(n: N) -> Self {
        CellValue::Number(n.into())
    }

    /// Create a new boolean value
    pub fn boolean(b: bool) -> Self {
        CellValue::Boolean(b)
    }

    /// Create a new instant value
    pub fn instant(dt: NaiveDateTime) -> Self {
        CellValue::Instant(dt)
    }

    /// Create a hyperlink value; blank display text falls back to the URL
    pub fn hyperlink<S: Into<String>>(url: S, display: Option<&str>) -> Self {
        CellValue::Hyperlink(Hyperlink::new(url, display))
    }

    /// Store any displayable value through its textual representation
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        CellValue::Text(value.to_string())
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Check if the value renders as nothing but whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Hyperlink(link) => link.display.trim().is_empty(),
            _ => false,
        }
    }

    /// Get the hyperlink if this is a hyperlink value
    pub fn as_hyperlink(&self) -> Option<&Hyperlink> {
        match self {
            CellValue::Hyperlink(link) => Some(link),
            _ => None,
        }
    }

    /// Text as a reader would see it rendered, independent of storage encoding
    pub fn display_text(&self) -> String {
        self.to_string()
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Text(_) => "text",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::Instant(_) => "instant",
            CellValue::Hyperlink(_) => "hyperlink",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Instant(dt) => write!(f, "{}", dt.format(INSTANT_DISPLAY_FORMAT)),
            CellValue::Hyperlink(link) => f.write_str(&link.display),
        }
    }
}

/// Numeric cell payload
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Number {
    /// Whole number
    Integer(i64),
    /// Binary floating point
    Float(f64),
    /// Fixed-point decimal
    Decimal(Decimal),
}

impl Number {
    /// Whether the value can be stored as a number at all
    pub fn is_finite(&self) -> bool {
        match self {
            Number::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Number {
    /// Culture-invariant decimal text (no grouping, `.` separator, no exponent)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
            Number::Decimal(d) => write!(f, "{}", d),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Number::Integer(v as i64)
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(Number::Integer)
            .unwrap_or_else(|_| Number::Decimal(Decimal::from(v)))
    }
}

impl From<usize> for Number {
    fn from(v: usize) -> Self {
        Number::from(v as u64)
    }
}

impl From<f32> for Number {
    /// Keeps the shortest decimal form of the `f32` (`0.1f32` stays `0.1`)
    fn from(v: f32) -> Self {
        Number::Float(v.to_string().parse().unwrap_or(v as f64))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl From<Decimal> for Number {
    fn from(v: Decimal) -> Self {
        Number::Decimal(v)
    }
}

/// A hyperlink: target URL plus the text shown in the cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperlink {
    /// Link target
    pub url: String,
    /// Text stored in the cell
    pub display: String,
}

impl Hyperlink {
    /// Create a hyperlink; blank display text falls back to the URL
    pub fn new<S: Into<String>>(url: S, display: Option<&str>) -> Self {
        let url = url.into();
        let display = match display {
            Some(text) if !text.trim().is_empty() => text.to_string(),
            _ => url.clone(),
        };
        Self { url, display }
    }

    /// Check that the target is an absolute URI (`scheme:rest`)
    pub fn validate(&self) -> Result<()> {
        let scheme = self.url.split_once(':').map(|(scheme, _)| scheme);
        let valid = match scheme {
            Some(s) => {
                let mut chars = s.chars();
                chars.next().map_or(false, |c| c.is_ascii_alphabetic())
                    && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            }
            None => false,
        };

        if valid && !self.url.chars().any(char::is_control) {
            Ok(())
        } else {
            Err(Error::InvalidHyperlink(self.url.clone()))
        }
    }
}

// === Conversions used by the row-building APIs ===

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        CellValue::Text(s.clone())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<Number> for CellValue {
    fn from(n: Number) -> Self {
        CellValue::Number(n)
    }
}

macro_rules! cell_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(v: $t) -> Self {
                    CellValue::Number(Number::from(v))
                }
            }
        )*
    };
}

cell_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64, Decimal);

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::Instant(dt)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Instant(d.and_time(NaiveTime::MIN))
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for CellValue {
    fn from(dt: DateTime<Tz>) -> Self {
        CellValue::Instant(dt.naive_local())
    }
}

impl From<Hyperlink> for CellValue {
    fn from(link: Hyperlink) -> Self {
        CellValue::Hyperlink(link)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(CellValue::Empty, Into::into)
    }
}
