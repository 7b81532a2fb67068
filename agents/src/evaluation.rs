use crate::features::*;
use minmax_core::Position;
use std::fmt;

/// Inputs an evaluator may use besides the position itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalContext {
    /// Number of moves played so far in the game (drives phase selection)
    pub move_number: u32,
    /// Per-game seed for the jitter term
    pub seed: u64,
}

/// The registry of static evaluators, selectable by a small integer id.
///
/// Every evaluator scores from White's point of view and stays strictly
/// inside the definite win/loss scores of +/-100.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Evaluator {
    /// Material only.
    Material,
    /// Material, center occupation, king shield and castling.
    #[default]
    Positional,
    /// Material with a small deterministic perturbation.
    Jittered,
    /// Material and hanging pressure.
    Threats,
    /// Material and center occupation.
    Occupation,
    /// Switches between positional, occupation and threats by game phase.
    Phased,
    /// Material, pressure, attacking zone, shield and a dispersion penalty.
    Aggressive,
}

impl Evaluator {
    /// Every registered evaluator, in id order.
    pub const ALL: [Evaluator; 7] = [
        Evaluator::Material,
        Evaluator::Positional,
        Evaluator::Jittered,
        Evaluator::Threats,
        Evaluator::Occupation,
        Evaluator::Phased,
        Evaluator::Aggressive,
    ];

    /// Resolves a registry id (1-based).
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    /// Returns the registry id (1-based).
    pub fn id(self) -> u8 {
        self as u8 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Evaluator::Material => "material",
            Evaluator::Positional => "positional",
            Evaluator::Jittered => "jittered",
            Evaluator::Threats => "threats",
            Evaluator::Occupation => "occupation",
            Evaluator::Phased => "phased",
            Evaluator::Aggressive => "aggressive",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Evaluator::Material => "weighted piece count",
            Evaluator::Positional => "material, center occupation, king shield and castling",
            Evaluator::Jittered => "material with a small seeded perturbation",
            Evaluator::Threats => "material and pressure on threatened enemy pieces",
            Evaluator::Occupation => "material and center occupation",
            Evaluator::Phased => "positional before move 25, occupation before 35, then threats",
            Evaluator::Aggressive => {
                "material, pressure, attacking-zone occupation and king shield, \
                 penalizing lopsided piece placement"
            }
        }
    }

    /// Largest magnitude this evaluator can return.
    pub fn band(self) -> i32 {
        match self {
            Evaluator::Material | Evaluator::Threats => 95,
            _ => 98,
        }
    }

    /// Scores the position from White's point of view.
    pub fn evaluate(self, position: &Position, ctx: &EvalContext) -> i32 {
        let band = self.band();
        match self {
            Evaluator::Material => scaled(material(position), MATERIAL_MAX, band),
            Evaluator::Positional => scaled(
                4 * material(position) + center(position) + shield(position) + castling(position),
                4 * MATERIAL_MAX + CENTER_MAX + SHIELD_MAX + CASTLING_MAX,
                band,
            ),
            Evaluator::Jittered => scaled(
                10 * material(position) + jitter(position, ctx.seed),
                10 * MATERIAL_MAX + JITTER_RANGE,
                band,
            ),
            Evaluator::Threats => scaled(
                4 * material(position) + hanging(position),
                4 * MATERIAL_MAX + HANGING_MAX,
                band,
            ),
            Evaluator::Occupation => scaled(
                4 * material(position) + center(position),
                4 * MATERIAL_MAX + CENTER_MAX,
                band,
            ),
            Evaluator::Phased => Self::for_phase(ctx.move_number).evaluate(position, ctx),
            Evaluator::Aggressive => {
                let pressure = 4 * material(position) + hanging(position);
                scaled(
                    4 * pressure + zone(position) - 2 * dispersion(position) + shield(position),
                    4 * (4 * MATERIAL_MAX + HANGING_MAX)
                        + ZONE_MAX
                        + 2 * DISPERSION_MAX
                        + SHIELD_MAX,
                    band,
                )
            }
        }
    }

    /// Evaluator used by `Phased` at the given move number.
    fn for_phase(move_number: u32) -> Self {
        match move_number {
            0..=24 => Evaluator::Positional,
            25..=34 => Evaluator::Occupation,
            _ => Evaluator::Threats,
        }
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}

/// Normalizes a raw combination by its theoretical maximum, scales it to
/// 100 and clamps it into the band.
fn scaled(raw: i32, max: i32, band: i32) -> i32 {
    (raw * 100 / max).clamp(-band, band)
}
