//! # geometry.rs
//!
//! Areas, perimeters, volumes and surface areas of basic shapes.

use std::f64::consts::PI;

use crate::error::CalcResult;
use crate::formulas::require_finite;

/// Area and circumference of a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleMeasures {
    pub area: f64,
    pub circumference: f64,
}

/// Area and perimeter of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleMeasures {
    pub area: f64,
    pub perimeter: f64,
}

/// Area of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleMeasures {
    pub area: f64,
}

/// Volume and surface area of a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidMeasures {
    pub volume: f64,
    pub surface_area: f64,
}

impl std::fmt::Display for CircleMeasures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area: {:.2}, Circumference: {:.2}", self.area, self.circumference)
    }
}

impl std::fmt::Display for RectangleMeasures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area: {:.2}, Perimeter: {:.2}", self.area, self.perimeter)
    }
}

impl std::fmt::Display for TriangleMeasures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Area: {:.2}", self.area)
    }
}

impl std::fmt::Display for SolidMeasures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Volume: {:.2}, Surface Area: {:.2}", self.volume, self.surface_area)
    }
}

/// Area and circumference of a circle of `radius`.
pub fn circle(radius: f64) -> CalcResult<CircleMeasures> {
    let r = require_finite("radius", radius)?;
    Ok(CircleMeasures {
        area: PI * r * r,
        circumference: 2.0 * PI * r,
    })
}

/// Area and perimeter of a `length` by `width` rectangle.
pub fn rectangle(length: f64, width: f64) -> CalcResult<RectangleMeasures> {
    let l = require_finite("length", length)?;
    let w = require_finite("width", width)?;
    Ok(RectangleMeasures {
        area: l * w,
        perimeter: 2.0 * (l + w),
    })
}

/// Area of a triangle from its base and height.
pub fn triangle(base: f64, height: f64) -> CalcResult<TriangleMeasures> {
    let b = require_finite("base", base)?;
    let h = require_finite("height", height)?;
    Ok(TriangleMeasures { area: 0.5 * b * h })
}

/// Volume and surface area of a sphere.
pub fn sphere(radius: f64) -> CalcResult<SolidMeasures> {
    let r = require_finite("radius", radius)?;
    Ok(SolidMeasures {
        volume: 4.0 / 3.0 * PI * r * r * r,
        surface_area: 4.0 * PI * r * r,
    })
}

/// Closed cylinder; the surface includes both ends.
pub fn cylinder(radius: f64, height: f64) -> CalcResult<SolidMeasures> {
    let r = require_finite("radius", radius)?;
    let h = require_finite("height", height)?;
    Ok(SolidMeasures {
        volume: PI * r * r * h,
        surface_area: 2.0 * PI * r * (r + h),
    })
}

/// Right circular cone; the surface includes the base.
pub fn cone(radius: f64, height: f64) -> CalcResult<SolidMeasures> {
    let r = require_finite("radius", radius)?;
    let h = require_finite("height", height)?;
    let slant_height = (r * r + h * h).sqrt();
    Ok(SolidMeasures {
        volume: PI * r * r * h / 3.0,
        surface_area: PI * r * (r + slant_height),
    })
}

/// Volume and surface area of a cube of edge `side`.
pub fn cube(side: f64) -> CalcResult<SolidMeasures> {
    let s = require_finite("side", side)?;
    Ok(SolidMeasures {
        volume: s * s * s,
        surface_area: 6.0 * s * s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circle() {
        let m = circle(2.0).unwrap();
        assert_abs_diff_eq!(m.area, 4.0 * PI);
        assert_abs_diff_eq!(m.circumference, 4.0 * PI);
        assert_eq!(m.to_string(), "Area: 12.57, Circumference: 12.57");
    }

    #[test]
    fn test_rectangle_and_triangle() {
        assert_eq!(rectangle(3.0, 4.0).unwrap(), RectangleMeasures { area: 12.0, perimeter: 14.0 });
        assert_eq!(rectangle(3.0, 4.0).unwrap().to_string(), "Area: 12.00, Perimeter: 14.00");
        assert_eq!(triangle(6.0, 4.0).unwrap().to_string(), "Area: 12.00");
    }

    #[test]
    fn test_solids() {
        let s = sphere(1.0).unwrap();
        assert_abs_diff_eq!(s.volume, 4.0 / 3.0 * PI, epsilon = 1.0e-12);
        assert_abs_diff_eq!(s.surface_area, 4.0 * PI, epsilon = 1.0e-12);

        let c = cylinder(1.0, 2.0).unwrap();
        assert_abs_diff_eq!(c.volume, 2.0 * PI, epsilon = 1.0e-12);
        assert_abs_diff_eq!(c.surface_area, 6.0 * PI, epsilon = 1.0e-12);

        let k = cone(3.0, 4.0).unwrap();
        assert_abs_diff_eq!(k.volume, 12.0 * PI, epsilon = 1.0e-12);
        assert_abs_diff_eq!(k.surface_area, 24.0 * PI, epsilon = 1.0e-12);

        assert_eq!(cube(2.0).unwrap(), SolidMeasures { volume: 8.0, surface_area: 24.0 });
        assert_eq!(cube(2.0).unwrap().to_string(), "Volume: 8.00, Surface Area: 24.00");
    }

    #[test]
    fn test_non_finite_input() {
        assert_eq!(circle(f64::NAN), Err(CalcError::input("radius", "not a finite number")));
        assert!(matches!(cone(1.0, f64::INFINITY), Err(CalcError::InvalidInput { field, .. }) if field == "height"));
    }
}
