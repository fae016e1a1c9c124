//! Coercion of literal lexical forms into Rust values.
//!
//! Strict conversions require the literal datatype to be the XSD datatype of
//! the target (or a datatype the target can represent exactly). The
//! [`Coercion`] options enable the lossy rules: widening across numeric
//! datatypes, reducing floating-point precision, and rounding or truncating
//! fractional values to integers.

use crate::literal::LiteralRef;
use crate::named_node::NamedNodeRef;
use crate::vocab::xsd;

/// Lossy conversion rules accepted by the `to_*` methods of [`LiteralRef`].
///
/// The default allows none of them, so only exact conversions succeed.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Coercion {
    /// Allow conversions that may lose floating-point precision
    /// (`xsd:double` to `f32`, large integers to floats).
    pub reduce_precision: bool,
    /// Allow rounding fractional values to the nearest integer.
    pub round: bool,
    /// Allow discarding the fractional part of a value.
    pub truncate: bool,
}

impl Coercion {
    /// All lossy rules enabled.
    #[inline]
    pub const fn lossy() -> Self {
        Self {
            reduce_precision: true,
            round: true,
            truncate: true,
        }
    }
}

/// An error raised when a literal cannot be coerced to the requested value.
#[derive(Debug, thiserror::Error)]
pub enum LiteralCastError {
    /// The literal datatype does not belong to the requested value space.
    #[error("the datatype {datatype} cannot be read as {target}")]
    DatatypeMismatch {
        datatype: String,
        target: &'static str,
    },
    /// The lexical form does not parse in its own datatype.
    #[error("{value:?} is not a valid {datatype} lexical form")]
    InvalidLexical { value: String, datatype: String },
    /// The value does not fit into the target type.
    #[error("{value:?} does not fit into {target}")]
    OutOfRange {
        value: String,
        target: &'static str,
    },
    /// The conversion would lose information and the matching
    /// [`Coercion`] rule is not enabled.
    #[error("converting {value:?} to {target} loses information")]
    Inexact {
        value: String,
        target: &'static str,
    },
}

fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    datatype == xsd::INTEGER
        || datatype == xsd::BYTE
        || datatype == xsd::SHORT
        || datatype == xsd::INT
        || datatype == xsd::LONG
        || datatype == xsd::UNSIGNED_BYTE
        || datatype == xsd::UNSIGNED_SHORT
        || datatype == xsd::UNSIGNED_INT
        || datatype == xsd::UNSIGNED_LONG
        || datatype == xsd::NON_NEGATIVE_INTEGER
        || datatype == xsd::NON_POSITIVE_INTEGER
        || datatype == xsd::NEGATIVE_INTEGER
        || datatype == xsd::POSITIVE_INTEGER
}

fn mismatch(literal: LiteralRef<'_>, target: &'static str) -> LiteralCastError {
    LiteralCastError::DatatypeMismatch {
        datatype: literal.datatype().as_str().to_owned(),
        target,
    }
}

fn invalid(literal: LiteralRef<'_>) -> LiteralCastError {
    LiteralCastError::InvalidLexical {
        value: literal.value().to_owned(),
        datatype: literal.datatype().as_str().to_owned(),
    }
}

fn out_of_range(literal: LiteralRef<'_>, target: &'static str) -> LiteralCastError {
    LiteralCastError::OutOfRange {
        value: literal.value().to_owned(),
        target,
    }
}

fn inexact(literal: LiteralRef<'_>, target: &'static str) -> LiteralCastError {
    LiteralCastError::Inexact {
        value: literal.value().to_owned(),
        target,
    }
}

/// The signed value of an integer literal, for range checks against any
/// integer target.
fn parse_full_integer(literal: LiteralRef<'_>) -> Result<i128, LiteralCastError> {
    let value = literal.value().trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    value.parse().map_err(|_| invalid(literal))
}

/// The numeric value of a decimal, double or float literal, each parsed
/// against its own lexical space.
fn parse_fractional(literal: LiteralRef<'_>) -> Result<f64, LiteralCastError> {
    if literal.datatype() == xsd::DECIMAL {
        parse_xsd_decimal(literal.value())
    } else {
        parse_xsd_float(literal.value())
    }
    .ok_or_else(|| invalid(literal))
}

/// The integer value of a decimal, double or float literal under the
/// `round`/`truncate` rules.
fn fractional_as_integer(
    literal: LiteralRef<'_>,
    coercion: Coercion,
    target: &'static str,
) -> Result<i128, LiteralCastError> {
    let value = parse_fractional(literal)?;
    let converted = if value.fract() == 0.0 {
        value
    } else if coercion.round {
        value.round()
    } else if coercion.truncate {
        value.trunc()
    } else {
        return Err(inexact(literal, target));
    };
    if !converted.is_finite() || converted < i128::MIN as f64 || converted >= i128::MAX as f64 {
        return Err(out_of_range(literal, target));
    }
    Ok(converted as i128)
}

macro_rules! integer_conversion {
    ($method:ident, $target:ty) => {
        #[doc = concat!("The literal value as `", stringify!($target), "`.")]
        ///
        /// Integer datatypes convert exactly when in range; `xsd:decimal`,
        /// `xsd:double` and `xsd:float` values convert under the
        /// [`Coercion`] `round`/`truncate` rules.
        pub fn $method(self, coercion: Coercion) -> Result<$target, LiteralCastError> {
            let datatype = self.datatype();
            let full = if is_integer_datatype(datatype) {
                parse_full_integer(self)?
            } else if datatype == xsd::DECIMAL
                || datatype == xsd::DOUBLE
                || datatype == xsd::FLOAT
            {
                fractional_as_integer(self, coercion, stringify!($target))?
            } else {
                return Err(mismatch(self, stringify!($target)));
            };
            <$target>::try_from(full).map_err(|_| out_of_range(self, stringify!($target)))
        }
    };
}

impl LiteralRef<'_> {
    /// The literal value as `bool`.
    ///
    /// Requires an `xsd:boolean` literal (`true`, `false`, `1` or `0`).
    pub fn to_boolean(self) -> Result<bool, LiteralCastError> {
        if self.datatype() != xsd::BOOLEAN {
            return Err(mismatch(self, "bool"));
        }
        match self.value().trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(invalid(self)),
        }
    }

    integer_conversion!(to_i8, i8);
    integer_conversion!(to_i16, i16);
    integer_conversion!(to_i32, i32);
    integer_conversion!(to_i64, i64);
    integer_conversion!(to_u8, u8);
    integer_conversion!(to_u16, u16);
    integer_conversion!(to_u32, u32);
    integer_conversion!(to_u64, u64);

    /// The literal value as `f64`.
    ///
    /// Accepts `xsd:double`, `xsd:float`, `xsd:decimal` and the integer
    /// datatypes; integers above 2⁵³ need the `reduce_precision` rule.
    pub fn to_f64(self, coercion: Coercion) -> Result<f64, LiteralCastError> {
        let datatype = self.datatype();
        if datatype == xsd::DOUBLE || datatype == xsd::FLOAT || datatype == xsd::DECIMAL {
            parse_fractional(self)
        } else if is_integer_datatype(datatype) {
            let full = parse_full_integer(self)?;
            let converted = full as f64;
            if converted as i128 != full && !coercion.reduce_precision {
                return Err(inexact(self, "f64"));
            }
            Ok(converted)
        } else {
            Err(mismatch(self, "f64"))
        }
    }

    /// The literal value as `f32`.
    ///
    /// Narrowing from a wider value space needs the `reduce_precision` rule.
    pub fn to_f32(self, coercion: Coercion) -> Result<f32, LiteralCastError> {
        let wide = self.to_f64(coercion)?;
        let narrow = wide as f32;
        // NaN narrows losslessly even though it is not equal to itself
        if f64::from(narrow) != wide
            && !wide.is_nan()
            && self.datatype() != xsd::FLOAT
            && !coercion.reduce_precision
        {
            return Err(inexact(self, "f32"));
        }
        Ok(narrow)
    }
}

/// Parses the XSD float lexical space, which spells the special values
/// `INF`, `-INF` and `NaN` differently from Rust.
fn parse_xsd_float(value: &str) -> Option<f64> {
    match value.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        value => value.parse().ok(),
    }
}

/// Parses the XSD decimal lexical space.
///
/// Unlike floats, decimals admit no exponent and no special values:
/// `(\+|-)? ([0-9]+ (\.[0-9]*)? | \.[0-9]+)`.
fn parse_xsd_decimal(value: &str) -> Option<f64> {
    let value = value.trim();
    let unsigned = value
        .strip_prefix(['+', '-'])
        .unwrap_or(value);
    let (before, after) = match unsigned.split_once('.') {
        Some((before, after)) => (before, after),
        None => (unsigned, ""),
    };
    if before.is_empty() && after.is_empty() {
        return None;
    }
    if !before.bytes().all(|b| b.is_ascii_digit()) || !after.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::literal::Literal;

    #[test]
    fn boolean() {
        let literal = Literal::new_typed_literal("true", xsd::BOOLEAN);
        assert!(literal.as_ref().to_boolean().unwrap());
        let literal = Literal::new_typed_literal("0", xsd::BOOLEAN);
        assert!(!literal.as_ref().to_boolean().unwrap());
        Literal::new_simple_literal("true")
            .as_ref()
            .to_boolean()
            .unwrap_err();
    }

    #[test]
    fn exact_integers() {
        let literal = Literal::new_typed_literal("-42", xsd::INTEGER);
        assert_eq!(literal.as_ref().to_i64(Coercion::default()).unwrap(), -42);
        assert_eq!(literal.as_ref().to_i8(Coercion::default()).unwrap(), -42);
        literal.as_ref().to_u64(Coercion::default()).unwrap_err();
        let literal = Literal::new_typed_literal("300", xsd::UNSIGNED_SHORT);
        assert_eq!(literal.as_ref().to_u16(Coercion::default()).unwrap(), 300);
        assert!(matches!(
            literal.as_ref().to_u8(Coercion::default()),
            Err(LiteralCastError::OutOfRange { .. })
        ));
    }

    #[test]
    fn decimal_narrowing_needs_a_rule() {
        let literal = Literal::new_typed_literal("1.5", xsd::DECIMAL);
        assert!(matches!(
            literal.as_ref().to_i64(Coercion::default()),
            Err(LiteralCastError::Inexact { .. })
        ));
        assert_eq!(
            literal
                .as_ref()
                .to_i64(Coercion {
                    round: true,
                    ..Coercion::default()
                })
                .unwrap(),
            2
        );
        assert_eq!(
            literal
                .as_ref()
                .to_i64(Coercion {
                    truncate: true,
                    ..Coercion::default()
                })
                .unwrap(),
            1
        );
    }

    #[test]
    fn floats() {
        let literal = Literal::new_typed_literal("1.5E1", xsd::DOUBLE);
        assert_eq!(literal.as_ref().to_f64(Coercion::default()).unwrap(), 15.0);
        let literal = Literal::new_typed_literal("-INF", xsd::DOUBLE);
        assert_eq!(
            literal.as_ref().to_f64(Coercion::default()).unwrap(),
            f64::NEG_INFINITY
        );
        let literal = Literal::new_typed_literal("0.1", xsd::DOUBLE);
        assert!(matches!(
            literal.as_ref().to_f32(Coercion::default()),
            Err(LiteralCastError::Inexact { .. })
        ));
        assert!(
            literal
                .as_ref()
                .to_f32(Coercion::lossy())
                .unwrap()
                .is_finite()
        );
    }

    #[test]
    fn nan_narrows_losslessly() {
        let literal = Literal::new_typed_literal("NaN", xsd::DOUBLE);
        assert!(literal.as_ref().to_f64(Coercion::default()).unwrap().is_nan());
        assert!(literal.as_ref().to_f32(Coercion::default()).unwrap().is_nan());
    }

    #[test]
    fn decimal_lexical_space_is_strict() {
        for value in ["1e5", "INF", "-INF", "NaN", "."] {
            let literal = Literal::new_typed_literal(value, xsd::DECIMAL);
            assert!(
                matches!(
                    literal.as_ref().to_f64(Coercion::default()),
                    Err(LiteralCastError::InvalidLexical { .. })
                ),
                "{value:?} should not be a valid xsd:decimal"
            );
        }
        let literal = Literal::new_typed_literal("5.", xsd::DECIMAL);
        assert_eq!(literal.as_ref().to_f64(Coercion::default()).unwrap(), 5.0);
        let literal = Literal::new_typed_literal("-.5", xsd::DECIMAL);
        assert_eq!(literal.as_ref().to_f64(Coercion::default()).unwrap(), -0.5);
    }

    #[test]
    fn integer_to_float_precision() {
        let literal = Literal::new_typed_literal("9007199254740993", xsd::INTEGER);
        assert!(matches!(
            literal.as_ref().to_f64(Coercion::default()),
            Err(LiteralCastError::Inexact { .. })
        ));
        literal.as_ref().to_f64(Coercion::lossy()).unwrap();
    }
}
