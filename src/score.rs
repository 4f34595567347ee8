//! Meal health scores.
//!
//! Two unrelated formulas are in use and callers pick one through [`ScoreFormula`]. Both
//! are pure, bounded, and monotonic: more protein raises the score, more fat, salt or
//! energy lowers it. Meal-builder suggestions use the simpler [`meal_builder_score`].

use crate::model::{round_to, NutrientVector};
use serde::{Deserialize, Serialize};

const LINEAR_MIN: f64 = 1.0;
const LINEAR_MAX: f64 = 100.0;

const LOG_MIN: f64 = 0.0;
const LOG_MAX: f64 = 100.0;
const LOG_BASELINE: f64 = 50.0;

const BUILDER_BASELINE: f64 = 50.0;

// log-weighted formula weights
const W_ENERGY: f64 = 1.0;
const W_FAT: f64 = 2.5;
const W_SALT: f64 = 3.0;
const W_PROTEINS: f64 = 4.0;
const W_CARBS: f64 = 2.0;

/// Selects how a nutrient vector becomes a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFormula {
    /// [`nutriscore_linear`], range [1, 100], two decimals
    Linear,
    /// [`nutriscore_log`], range [0, 100], whole numbers
    #[default]
    LogWeighted,
}

impl ScoreFormula {
    pub fn score(&self, nutrients: &NutrientVector) -> f64 {
        match self {
            ScoreFormula::Linear => nutriscore_linear(nutrients),
            ScoreFormula::LogWeighted => nutriscore_log(nutrients),
        }
    }
}

fn clamp_or_floor(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

/// `(proteins*4 - fat*2 - salt*3 - energy_kcal*0.05) * 10`, clamped to [1, 100] and
/// rounded to two decimals.
pub fn nutriscore_linear(nutrients: &NutrientVector) -> f64 {
    let raw = nutrients.proteins * 4.0
        - nutrients.fat * 2.0
        - nutrients.salt * 3.0
        - nutrients.energy_kcal * 0.05;

    round_to(clamp_or_floor(raw * 10.0, LINEAR_MIN, LINEAR_MAX), 2)
}

/// Log-damped balance of positive (proteins, carbohydrates) against negative (energy, fat,
/// salt) contributions around a baseline of 50, clamped to [0, 100] and rounded to the
/// nearest integer, ties to even.
pub fn nutriscore_log(nutrients: &NutrientVector) -> f64 {
    // negative inputs would leave log1p's domain
    let damp = |value: f64| value.max(0.0).ln_1p();

    let negative = W_ENERGY * damp(nutrients.energy_kcal)
        + W_FAT * damp(nutrients.fat)
        + W_SALT * damp(nutrients.salt);
    let positive = W_PROTEINS * damp(nutrients.proteins) + W_CARBS * damp(nutrients.carbohydrates);

    let normalized = LOG_BASELINE + (positive - negative) * 10.0;
    clamp_or_floor(normalized, LOG_MIN, LOG_MAX).round_ties_even()
}

/// Quick rating for meal-builder suggestions from calories and protein alone.
///
/// Starts at 50. Calories under 500 add 20, under 800 add 10; protein over 30 g adds 20,
/// over 20 g adds 10. Zero totals add nothing. Clamped to [1, 100].
pub fn meal_builder_score(calories: f64, protein: f64) -> f64 {
    let mut score = BUILDER_BASELINE;

    if calories > 0.0 {
        if calories < 500.0 {
            score += 20.0;
        } else if calories < 800.0 {
            score += 10.0;
        }
    }

    if protein > 0.0 {
        if protein > 30.0 {
            score += 20.0;
        } else if protein > 20.0 {
            score += 10.0;
        }
    }

    score.clamp(LINEAR_MIN, LINEAR_MAX)
}
