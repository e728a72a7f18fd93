/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Integrality restriction on a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrality {
    #[default]
    Continuous,
    Integer,
    /// Zero, or continuous within the column bounds.
    SemiContinuous,
    /// Zero, or integer within the column bounds.
    SemiInteger,
    /// Integer at every feasible point without being declared so.
    ImplicitInteger,
}

impl Integrality {
    /// Whether the restriction turns an LP into a MIP.
    pub fn is_discrete(self) -> bool {
        !matches!(self, Integrality::Continuous)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Integrality::Continuous => "continuous",
            Integrality::Integer => "integer",
            Integrality::SemiContinuous => "semi_continuous",
            Integrality::SemiInteger => "semi_integer",
            Integrality::ImplicitInteger => "implicit_integer",
        }
    }
}

/// Bounds for a column or row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `(-inf, +inf)`
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `[lower, +inf)`
    pub fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    /// `(-inf, upper]`
    pub fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    /// Whether the interval is non-empty. An inverted interval is still a
    /// well-formed bound; it makes the problem infeasible.
    pub fn is_consistent(&self) -> bool {
        !self.has_nan() && self.lower <= self.upper
    }

    pub fn has_nan(&self) -> bool {
        self.lower.is_nan() || self.upper.is_nan()
    }
}

/// A column: objective cost, bounds and integrality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub cost: f64,
    pub bounds: Bounds,
    pub integrality: Integrality,
}

impl Column {
    /// Create a continuous column.
    pub fn continuous(cost: f64, bounds: Bounds) -> Self {
        Self {
            cost,
            bounds,
            integrality: Integrality::Continuous,
        }
    }

    /// Create an integer column.
    pub fn integer(cost: f64, bounds: Bounds) -> Self {
        Self {
            cost,
            bounds,
            integrality: Integrality::Integer,
        }
    }
}

/// A row with lower and upper bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    pub bounds: Bounds,
}

impl Row {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            bounds: Bounds::new(lower, upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_consistency() {
        assert!(Bounds::new(0.0, 3.0).is_consistent());
        assert!(Bounds::free().is_consistent());
        assert!(Bounds::new(2.0, 2.0).is_consistent());
        assert!(!Bounds::new(3.0, 0.0).is_consistent());
        assert!(!Bounds::new(3.0, 0.0).has_nan());
        assert!(Bounds::new(f64::NAN, 1.0).has_nan());
        assert!(!Bounds::new(f64::NAN, 1.0).is_consistent());
    }

    #[test]
    fn test_integrality_is_discrete() {
        assert!(!Integrality::Continuous.is_discrete());
        assert!(Integrality::Integer.is_discrete());
        assert!(Integrality::SemiContinuous.is_discrete());
        assert_eq!(Integrality::default(), Integrality::Continuous);
    }

    #[test]
    fn test_column_constructors() {
        let col = Column::integer(2.0, Bounds::at_least(1.0));
        assert_eq!(col.integrality, Integrality::Integer);
        assert_eq!(col.bounds.upper, f64::INFINITY);

        let col = Column::continuous(3.0, Bounds::at_most(4.0));
        assert_eq!(col.integrality, Integrality::Continuous);
        assert_eq!(col.bounds.lower, f64::NEG_INFINITY);
    }
}
