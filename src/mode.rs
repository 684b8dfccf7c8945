//! # mode.rs
//!
//! Calculator modes: the numeral base used for input and result formatting,
//! and the angle unit used by trigonometric functions.
//!
//! Both are plain values. They are owned by a [`Session`](crate::session::Session)
//! and handed to [`evaluate`](crate::evaluator::evaluate) explicitly.

#[doc(hidden)]
/// Internal macro to define a named enum together with its names.
///
/// Generates `FromStr` (accepting every listed alias, case-insensitively),
/// `Display` (using the first alias), serde support and `names()`.
/// Also used by [`units`](crate::units) for its categories.
macro_rules! mode_kinds {
    (
        $(#[$meta:meta])*
        $enum_name:ident, $what:expr,
        { $( $variant:ident => [ $display:expr $(, $alias:expr )* ] ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $enum_name {
            $( $variant ),+
        }

        impl $enum_name {
            /// Returns the canonical short name of every variant.
            pub fn names() -> Vec<&'static str> {
                vec![ $( $display ),+ ]
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::CalcError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.trim().to_ascii_lowercase();
                $(
                    if lower == $display $( || lower == $alias )* {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::error::CalcError::input($what, format!("unknown value \"{}\"", s)))
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let s = match self {
                    $( Self::$variant => $display, )+
                };
                write!(f, "{}", s)
            }
        }
    };
}

mode_kinds! {
    /// Numeral base governing valid digit input and result formatting.
    NumeralBase, "base",
    {
        Decimal     => ["dec", "decimal", "10"],
        Binary      => ["bin", "binary", "2"],
        Octal       => ["oct", "octal", "8"],
        Hexadecimal => ["hex", "hexadecimal", "16"],
    }
}

mode_kinds! {
    /// Unit in which trigonometric arguments and inverse results are expressed.
    AngleMode, "angle mode",
    {
        Degrees => ["deg", "degree", "degrees"],
        Radians => ["rad", "radian", "radians"],
    }
}

impl NumeralBase {
    /// Returns the radix of the base.
    pub fn radix(&self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Hexadecimal => 16,
        }
    }

    /// Returns the base with the given radix, if supported.
    pub fn from_radix(radix: u32) -> Option<Self> {
        match radix {
            10 => Some(Self::Decimal),
            2 => Some(Self::Binary),
            8 => Some(Self::Octal),
            16 => Some(Self::Hexadecimal),
            _ => None,
        }
    }

    /// Checks whether `ch` may be typed as a digit in this base.
    ///
    /// Decimal mode also accepts the decimal point; hexadecimal accepts
    /// `A-F` in either case.
    pub fn accepts(&self, ch: char) -> bool {
        match self {
            Self::Decimal => ch.is_ascii_digit() || ch == '.',
            Self::Binary => matches!(ch, '0' | '1'),
            Self::Octal => matches!(ch, '0'..='7'),
            Self::Hexadecimal => ch.is_ascii_hexdigit(),
        }
    }
}

impl Default for NumeralBase {
    fn default() -> Self {
        Self::Decimal
    }
}

impl AngleMode {
    /// Converts an angle in this unit to radians.
    pub fn to_radians(&self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * std::f64::consts::PI / 180.0,
            Self::Radians => x,
        }
    }

    /// Converts an angle in radians to this unit.
    pub fn from_radians(&self, x: f64) -> f64 {
        match self {
            Self::Degrees => x * 180.0 / std::f64::consts::PI,
            Self::Radians => x,
        }
    }
}

impl Default for AngleMode {
    fn default() -> Self {
        Self::Degrees
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::str::FromStr;

    #[test]
    fn test_numeral_base_from_str() {
        assert_eq!(NumeralBase::from_str("hex"), Ok(NumeralBase::Hexadecimal));
        assert_eq!(NumeralBase::from_str("BIN"), Ok(NumeralBase::Binary));
        assert_eq!(NumeralBase::from_str(" 8 "), Ok(NumeralBase::Octal));
        assert_eq!(NumeralBase::from_str("decimal"), Ok(NumeralBase::Decimal));
        assert!(NumeralBase::from_str("base3").is_err());
    }

    #[test]
    fn test_numeral_base_display_and_names() {
        assert_eq!(NumeralBase::Hexadecimal.to_string(), "hex");
        assert_eq!(NumeralBase::names(), vec!["dec", "bin", "oct", "hex"]);
    }

    #[test]
    fn test_radix() {
        for base in [NumeralBase::Decimal, NumeralBase::Binary, NumeralBase::Octal, NumeralBase::Hexadecimal] {
            assert_eq!(NumeralBase::from_radix(base.radix()), Some(base));
        }
        assert_eq!(NumeralBase::from_radix(3), None);
    }

    #[test]
    fn test_accepts() {
        assert!(NumeralBase::Binary.accepts('1'));
        assert!(!NumeralBase::Binary.accepts('2'));
        assert!(NumeralBase::Octal.accepts('7'));
        assert!(!NumeralBase::Octal.accepts('8'));
        assert!(NumeralBase::Decimal.accepts('.'));
        assert!(!NumeralBase::Decimal.accepts('A'));
        assert!(NumeralBase::Hexadecimal.accepts('f'));
        assert!(NumeralBase::Hexadecimal.accepts('F'));
        assert!(!NumeralBase::Hexadecimal.accepts('.'));
    }

    #[test]
    fn test_angle_mode() {
        assert_eq!(AngleMode::from_str("deg"), Ok(AngleMode::Degrees));
        assert_eq!(AngleMode::from_str("Radians"), Ok(AngleMode::Radians));
        assert_abs_diff_eq!(AngleMode::Degrees.to_radians(180.0), std::f64::consts::PI, epsilon = 1.0e-12);
        assert_abs_diff_eq!(AngleMode::Degrees.from_radians(std::f64::consts::FRAC_PI_2), 90.0, epsilon = 1.0e-12);
        assert_eq!(AngleMode::Radians.to_radians(1.5), 1.5);
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&NumeralBase::Hexadecimal).unwrap();
        assert_eq!(json, "\"hexadecimal\"");
        let mode: AngleMode = serde_json::from_str("\"radians\"").unwrap();
        assert_eq!(mode, AngleMode::Radians);
    }
}
