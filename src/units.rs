//! # units.rs
//!
//! Scalar unit conversion inside one category.
//!
//! Linear categories convert through a canonical unit (meter, kilogram,
//! square meter, liter, meter per second) using fixed ratio tables.
//! Temperature is affine and converts through Celsius.
//!
//! Unit names are matched exactly first, then ignoring ASCII case.

use phf::OrderedMap;
use phf_macros::phf_ordered_map;

use crate::error::{CalcError, CalcResult};

/// Meters per unit.
static LENGTH: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Meter" => 1.0,
    "Kilometer" => 1000.0,
    "Centimeter" => 0.01,
    "Millimeter" => 0.001,
    "Mile" => 1609.34,
    "Yard" => 0.9144,
    "Foot" => 0.3048,
    "Inch" => 0.0254,
};

/// Kilograms per unit.
static WEIGHT: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Kilogram" => 1.0,
    "Gram" => 0.001,
    "Milligram" => 0.000001,
    "Pound" => 0.453592,
    "Ounce" => 0.0283495,
    "Ton" => 1000.0,
};

/// Temperature scales. The values are unused; conversion is affine.
static TEMPERATURE: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Celsius" => 1.0,
    "Fahrenheit" => 1.0,
    "Kelvin" => 1.0,
};

/// Square meters per unit.
static AREA: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Square Meter" => 1.0,
    "Square Kilometer" => 1000000.0,
    "Hectare" => 10000.0,
    "Square Mile" => 2589988.0,
    "Acre" => 4046.86,
    "Square Foot" => 0.092903,
};

/// Liters per unit.
static VOLUME: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Liter" => 1.0,
    "Milliliter" => 0.001,
    "Cubic Meter" => 1000.0,
    "Gallon" => 3.78541,
    "Quart" => 0.946353,
    "Pint" => 0.473176,
    "Cup" => 0.236588,
};

/// Meters per second per unit.
static SPEED: OrderedMap<&'static str, f64> = phf_ordered_map! {
    "Meters/sec" => 1.0,
    "Kilometers/hr" => 0.277778,
    "Miles/hr" => 0.44704,
    "Feet/sec" => 0.3048,
    "Knots" => 0.514444,
};

mode_kinds! {
    /// Physical quantity a conversion happens in.
    Category, "category",
    {
        Length      => ["length"],
        Weight      => ["weight", "mass"],
        Temperature => ["temperature", "temp"],
        Area        => ["area"],
        Volume      => ["volume"],
        Speed       => ["speed"],
    }
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Self::Length,
        Self::Weight,
        Self::Temperature,
        Self::Area,
        Self::Volume,
        Self::Speed,
    ];

    fn table(&self) -> &'static OrderedMap<&'static str, f64> {
        match self {
            Self::Length => &LENGTH,
            Self::Weight => &WEIGHT,
            Self::Temperature => &TEMPERATURE,
            Self::Area => &AREA,
            Self::Volume => &VOLUME,
            Self::Speed => &SPEED,
        }
    }

    /// Returns the unit names of the category in display order.
    pub fn units(&self) -> Vec<&'static str> {
        self.table().keys().cloned().collect()
    }

    /// Resolves `unit` to its canonical name and ratio.
    fn lookup(&self, unit: &str) -> CalcResult<(&'static str, f64)> {
        let table = self.table();
        let unit = unit.trim();
        table.get_entry(unit)
            .or_else(|| table.entries().find(|(name, _)| name.eq_ignore_ascii_case(unit)))
            .map(|(name, ratio)| (*name, *ratio))
            .ok_or_else(|| CalcError::UnknownUnit {
                unit: unit.to_string(),
                category: self.to_string(),
            })
    }
}

/// Converts a temperature between two (already resolved) scales through Celsius.
fn convert_temperature(value: f64, from: &str, to: &str) -> f64 {
    if from == to {
        return value;
    }

    let celsius = match from {
        "Fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "Kelvin" => value - 273.15,
        _ => value,
    };

    match to {
        "Fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "Kelvin" => celsius + 273.15,
        _ => celsius,
    }
}

/// Converts `value` from one unit to another inside `category`.
///
/// # Errors
/// [`CalcError::UnknownUnit`] if either name is missing from the category.
///
/// # Example
/// ```rust
/// use calcpad::units::{convert, Category};
///
/// assert_eq!(convert(1.0, "Kilometer", "Meter", Category::Length).unwrap(), 1000.0);
/// assert_eq!(convert(0.0, "Celsius", "Fahrenheit", Category::Temperature).unwrap(), 32.0);
/// ```
pub fn convert(value: f64, from: &str, to: &str, category: Category) -> CalcResult<f64> {
    let (from_name, from_ratio) = category.lookup(from)?;
    let (to_name, to_ratio) = category.lookup(to)?;

    match category {
        Category::Temperature => Ok(convert_temperature(value, from_name, to_name)),
        _ => Ok(value * from_ratio / to_ratio),
    }
}

/// A finished conversion, kept for display.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub category: Category,
    pub value: f64,
    pub from: &'static str,
    pub to: &'static str,
    pub result: f64,
}

impl Conversion {
    /// Converts and records the canonical unit names.
    pub fn new(value: f64, from: &str, to: &str, category: Category) -> CalcResult<Self> {
        if !value.is_finite() {
            return Err(CalcError::input("value", "not a number"));
        }
        let (from, _) = category.lookup(from)?;
        let (to, _) = category.lookup(to)?;
        let result = convert(value, from, to, category)?;
        Ok(Self { category, value, from, to, result })
    }
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {:.4} {}", self.value, self.from, self.result, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::str::FromStr;

    #[test]
    fn test_linear_conversions() {
        assert_eq!(convert(1.0, "Kilometer", "Meter", Category::Length).unwrap(), 1000.0);
        assert_abs_diff_eq!(convert(1.0, "Mile", "Kilometer", Category::Length).unwrap(), 1.60934, epsilon = 1.0e-12);
        assert_abs_diff_eq!(convert(1.0, "Pound", "Ounce", Category::Weight).unwrap(), 16.0, epsilon = 1.0e-3);
        assert_abs_diff_eq!(convert(1.0, "Hectare", "Square Meter", Category::Area).unwrap(), 10000.0);
        assert_abs_diff_eq!(convert(1.0, "Gallon", "Liter", Category::Volume).unwrap(), 3.78541, epsilon = 1.0e-12);
        assert_abs_diff_eq!(convert(36.0, "Kilometers/hr", "Meters/sec", Category::Speed).unwrap(), 10.000008, epsilon = 1.0e-9);
    }

    #[test]
    fn test_same_unit_is_identity() {
        assert_eq!(convert(12.5, "Foot", "Foot", Category::Length).unwrap(), 12.5);
        assert_eq!(convert(-40.0, "Kelvin", "Kelvin", Category::Temperature).unwrap(), -40.0);
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert(0.0, "Celsius", "Fahrenheit", Category::Temperature).unwrap(), 32.0);
        assert_abs_diff_eq!(convert(100.0, "Celsius", "Kelvin", Category::Temperature).unwrap(), 373.15, epsilon = 1.0e-12);
        assert_abs_diff_eq!(convert(212.0, "Fahrenheit", "Celsius", Category::Temperature).unwrap(), 100.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(convert(-40.0, "Fahrenheit", "Celsius", Category::Temperature).unwrap(), -40.0, epsilon = 1.0e-12);
        assert_abs_diff_eq!(convert(0.0, "Kelvin", "Fahrenheit", Category::Temperature).unwrap(), -459.67, epsilon = 1.0e-9);
    }

    #[test]
    fn test_unit_names_ignore_case() {
        assert_eq!(convert(1.0, "kilometer", "METER", Category::Length).unwrap(), 1000.0);
        assert_eq!(convert(0.0, "celsius", "fahrenheit", Category::Temperature).unwrap(), 32.0);
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert(1.0, "Parsec", "Meter", Category::Length),
            Err(CalcError::UnknownUnit { unit: "Parsec".into(), category: "length".into() })
        );
        assert!(convert(1.0, "Celsius", "Rankine", Category::Temperature).is_err());
        // units are not shared between categories
        assert!(convert(1.0, "Meter", "Gram", Category::Weight).is_err());
    }

    #[test]
    fn test_category_units() {
        assert_eq!(Category::Temperature.units(), vec!["Celsius", "Fahrenheit", "Kelvin"]);
        assert_eq!(Category::Speed.units().first(), Some(&"Meters/sec"));
        assert_eq!(Category::Length.units().len(), 8);
        assert_eq!(Category::from_str("Mass"), Ok(Category::Weight));
        assert_eq!(Category::ALL.len(), Category::names().len());
    }

    #[test]
    fn test_conversion_display() {
        let conversion = Conversion::new(5.0, "mile", "kilometer", Category::Length).unwrap();
        assert_eq!(conversion.to_string(), "5 Mile = 8.0467 Kilometer");
        assert!(Conversion::new(f64::NAN, "Mile", "Meter", Category::Length).is_err());
    }
}
