//! Allowance amount rules.
//!
//! Pure computation of per-category totals from raw component amounts. The
//! total is derived state: it is recomputed here on every create and every
//! amount-bearing mutation, never stored independently of its inputs.

use crate::domain::models::allowance::ProgramCategory;

/// The five raw component amounts of one allowance request.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AllowanceComponents {
    pub stipend: f64,
    pub medical: f64,
    pub transportation: f64,
    pub school_supplies: f64,
    pub accommodation: f64,
}

impl AllowanceComponents {
    pub fn sum(&self) -> f64 {
        self.stipend + self.medical + self.transportation + self.school_supplies + self.accommodation
    }
}

/// Normalize components for a category and compute the derived total.
///
/// Launch-year students receive a stipend only: every other component is
/// forced to zero regardless of input, and the total equals the stipend.
/// For university and college the components pass through unchanged and the
/// total is their sum. Negative inputs are validation's concern, not this
/// function's.
pub fn compute_total(
    category: ProgramCategory,
    components: AllowanceComponents,
) -> (AllowanceComponents, f64) {
    let normalized = match category {
        ProgramCategory::LaunchYear => AllowanceComponents {
            stipend: components.stipend,
            ..Default::default()
        },
        ProgramCategory::University | ProgramCategory::College => components,
    };
    let total = normalized.sum();
    (normalized, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_university_total_is_sum_of_components() {
        let components = AllowanceComponents {
            stipend: 1500.0,
            medical: 200.0,
            transportation: 300.0,
            school_supplies: 500.0,
            accommodation: 1200.0,
        };

        let (normalized, total) = compute_total(ProgramCategory::University, components);

        assert_eq!(normalized, components);
        assert_eq!(total, 3700.0);
    }

    #[test]
    fn test_college_components_pass_through() {
        let components = AllowanceComponents {
            stipend: 800.0,
            medical: 0.0,
            transportation: 150.0,
            school_supplies: 50.0,
            accommodation: 0.0,
        };

        let (normalized, total) = compute_total(ProgramCategory::College, components);

        assert_eq!(normalized, components);
        assert_eq!(total, 1000.0);
    }

    #[test]
    fn test_launch_year_forces_non_stipend_components_to_zero() {
        let components = AllowanceComponents {
            stipend: 1000.0,
            medical: 500.0,
            transportation: 250.0,
            school_supplies: 80.0,
            accommodation: 900.0,
        };

        let (normalized, total) = compute_total(ProgramCategory::LaunchYear, components);

        assert_eq!(normalized.stipend, 1000.0);
        assert_eq!(normalized.medical, 0.0);
        assert_eq!(normalized.transportation, 0.0);
        assert_eq!(normalized.school_supplies, 0.0);
        assert_eq!(normalized.accommodation, 0.0);
        assert_eq!(total, 1000.0);
    }

    #[test]
    fn test_compute_total_is_deterministic() {
        let components = AllowanceComponents {
            stipend: 12.5,
            medical: 7.25,
            transportation: 0.0,
            school_supplies: 3.0,
            accommodation: 9.75,
        };

        let first = compute_total(ProgramCategory::University, components);
        let second = compute_total(ProgramCategory::University, components);
        assert_eq!(first, second);
    }
}
