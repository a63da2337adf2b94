//! Published Nspt correlations for friction angle and cohesion.
//!
//! Every correlation is a plain scalar function. Sequences (e.g. the plotting
//! sweep) are handled by mapping the same function pointer, so the point and
//! sweep paths can never disagree.
//!
//! Negative blow counts are outside the published domain. They are not clamped
//! here: `φ1`/`φ2` take the square root of a negative number and yield `NaN`,
//! which then propagates into any mean built from them.

use crate::domain::{ParameterKind, author_year_label};

/// Floor applied to Nspt before taking `log10` in `φ5`.
pub const LOG_FLOOR: f64 = 0.1;

/// φ1, Teixeira (1996): `15 + √(24·N)`.
pub fn phi_1(n: f64) -> f64 {
    15.0 + (24.0 * n).sqrt()
}

/// φ2, Hatanaka e Uchida (1996): `20 + √(15.5·N)`.
pub fn phi_2(n: f64) -> f64 {
    20.0 + (15.5 * n).sqrt()
}

/// φ3, Peck, Hanson e Thornburn (1974): `27.1 + 0.3·N − 0.00054·N²`.
pub fn phi_3(n: f64) -> f64 {
    27.1 + 0.3 * n - 0.00054 * n * n
}

/// φ4, Godoy (1983): `28 + 0.4·N`.
pub fn phi_4(n: f64) -> f64 {
    28.0 + 0.4 * n
}

/// φ5, Kulhawy e Chen (2007): `27.5 + 9.2·log10(N)`, with N floored at 0.1.
pub fn phi_5(n: f64) -> f64 {
    27.5 + 9.2 * n.max(LOG_FLOOR).log10()
}

/// c1, Teixeira e Godoy (1996): `10·N` kPa.
pub fn c_1(n: f64) -> f64 {
    10.0 * n
}

/// c2, Berberian (2015): `N / 0.35` kPa.
pub fn c_2(n: f64) -> f64 {
    n / 0.35
}

/// A named, published correlation.
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    /// Short id used for numbered labels (`φ1`, `c2`, ...).
    pub id: &'static str,
    pub authors: &'static str,
    pub year: u16,
    /// Human-readable expression for documentation output.
    pub expression: &'static str,
    /// Soil type the correlation was published for, when the source states one.
    pub soil_note: Option<&'static str>,
    pub eval: fn(f64) -> f64,
}

impl Formula {
    /// Author/year label, e.g. `Kulhawy e Chen (2007)`.
    pub fn label(&self) -> String {
        author_year_label(self.authors, self.year)
    }

    /// Evaluate at one blow count.
    pub fn eval(&self, n: f64) -> f64 {
        (self.eval)(n)
    }

    /// Evaluate element-wise over a sequence of blow counts.
    pub fn eval_many(&self, ns: &[f64]) -> Vec<f64> {
        ns.iter().map(|&n| (self.eval)(n)).collect()
    }
}

/// A fixed, ordered catalog of correlations for one parameter.
#[derive(Debug, Clone, Copy)]
pub struct FormulaSet {
    pub kind: ParameterKind,
    pub formulas: &'static [Formula],
}

impl FormulaSet {
    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub fn iter(self) -> impl Iterator<Item = &'static Formula> {
        self.formulas.iter()
    }
}

const FRICTION_ANGLE_FORMULAS: [Formula; 5] = [
    Formula {
        id: "φ1",
        authors: "Teixeira",
        year: 1996,
        expression: "φ = 15 + √(24 × Nspt)",
        soil_note: None,
        eval: phi_1,
    },
    Formula {
        id: "φ2",
        authors: "Hatanaka e Uchida",
        year: 1996,
        expression: "φ = 20 + √(15.5 × Nspt)",
        soil_note: None,
        eval: phi_2,
    },
    Formula {
        id: "φ3",
        authors: "Peck, Hanson e Thornburn",
        year: 1974,
        expression: "φ = 27.1 + 0.3 × Nspt − 0.00054 × Nspt²",
        soil_note: None,
        eval: phi_3,
    },
    Formula {
        id: "φ4",
        authors: "Godoy",
        year: 1983,
        expression: "φ = 28 + 0.4 × Nspt",
        soil_note: None,
        eval: phi_4,
    },
    Formula {
        id: "φ5",
        authors: "Kulhawy e Chen",
        year: 2007,
        expression: "φ = 27.5 + 9.2 × log₁₀(max(Nspt, 0.1))",
        soil_note: None,
        eval: phi_5,
    },
];

const COHESION_FORMULAS: [Formula; 2] = [
    Formula {
        id: "c1",
        authors: "Teixeira e Godoy",
        year: 1996,
        expression: "c = 10 × Nspt",
        soil_note: Some("saturated clays"),
        eval: c_1,
    },
    Formula {
        id: "c2",
        authors: "Berberian",
        year: 2015,
        expression: "c = Nspt / 0.35",
        soil_note: Some("unsaturated soils"),
        eval: c_2,
    },
];

/// Friction angle correlations (φ1..φ5), in display order.
pub const FRICTION_ANGLE_SET: FormulaSet = FormulaSet {
    kind: ParameterKind::FrictionAngle,
    formulas: &FRICTION_ANGLE_FORMULAS,
};

/// Cohesion correlations (c1, c2), in display order.
pub const COHESION_SET: FormulaSet = FormulaSet {
    kind: ParameterKind::Cohesion,
    formulas: &COHESION_FORMULAS,
};

/// Both formula sets, friction angle first.
pub const FORMULA_SETS: [FormulaSet; 2] = [FRICTION_ANGLE_SET, COHESION_SET];

/// Look up the formula set for a parameter kind.
pub fn formula_set(kind: ParameterKind) -> FormulaSet {
    match kind {
        ParameterKind::FrictionAngle => FRICTION_ANGLE_SET,
        ParameterKind::Cohesion => COHESION_SET,
    }
}
