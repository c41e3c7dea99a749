//! Scoring module - line clears, combo bonus and level progression
//!
//! Rules:
//! - Clearing N rows in one freeze scores `LINE_SCORES[N] * level`, using the
//!   level in effect before this freeze's lines are counted.
//! - The combo grows by the number of rows cleared and resets on any freeze
//!   that clears nothing. Once it exceeds 1 it adds `combo * COMBO_BASE`.
//! - Level is `lines / 10 + 1`; drop interval shrinks by 100ms per level down
//!   to a 100ms floor.

use crate::types::{
    BASE_DROP_MS, COMBO_BASE, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW,
    LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS,
};

/// Score calculation result for one freeze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points for the rows cleared, already multiplied by level
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`
    pub combo_bonus: u32,
    pub total: u32,
    /// Combo value after this freeze
    pub combo: u32,
}

/// Calculate the table score for a line clear
/// lines: rows cleared in one freeze (1-4)
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines >= LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[lines].saturating_mul(level)
}

/// Combo bonus for a combo value reached after a clearing freeze
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    if combo > 1 {
        combo.saturating_mul(COMBO_BASE)
    } else {
        0
    }
}

/// Combo value after a freeze that cleared `lines` rows
pub fn next_combo(combo: u32, lines: usize) -> u32 {
    if lines == 0 {
        0
    } else {
        combo.saturating_add(lines as u32)
    }
}

/// Calculate the complete score for one freeze.
///
/// A freeze that clears nothing scores zero and resets the combo.
pub fn calculate_score(lines: usize, level: u32, combo: u32) -> ScoreResult {
    let combo = next_combo(combo, lines);
    if lines == 0 {
        return ScoreResult {
            combo,
            ..ScoreResult::default()
        };
    }

    let line_clear_score = calculate_line_score(lines, level);
    let combo_bonus = calculate_combo_bonus(combo);

    ScoreResult {
        line_clear_score,
        combo_bonus,
        total: line_clear_score.saturating_add(combo_bonus),
        combo,
    }
}

/// Calculate drop score
/// soft_drop: +1 per row
/// hard_drop: +2 per row
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS_PER_ROW
    } else {
        rows * SOFT_DROP_POINTS
    }
}

/// Level management
/// Level increases every 10 lines cleared, starting at 1
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(reduction)
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);

        // Level multiplier
        assert_eq!(calculate_line_score(1, 3), 300);
        assert_eq!(calculate_line_score(4, 5), 4000);
    }

    #[test]
    fn test_combo_bonus() {
        assert_eq!(calculate_combo_bonus(0), 0);
        assert_eq!(calculate_combo_bonus(1), 0);
        assert_eq!(calculate_combo_bonus(2), 100);
        assert_eq!(calculate_combo_bonus(3), 150);
    }

    #[test]
    fn test_combo_sequence() {
        // One row: combo 1, no bonus.
        let first = calculate_score(1, 1, 0);
        assert_eq!(first.combo, 1);
        assert_eq!(first.combo_bonus, 0);
        assert_eq!(first.total, 100);

        // Two rows straight after: combo 3, bonus 150 on top of 300.
        let second = calculate_score(2, 1, first.combo);
        assert_eq!(second.combo, 3);
        assert_eq!(second.line_clear_score, 300);
        assert_eq!(second.combo_bonus, 150);
        assert_eq!(second.total, 450);

        // Nothing cleared: combo resets, no points.
        let third = calculate_score(0, 1, second.combo);
        assert_eq!(third, ScoreResult::default());
    }

    #[test]
    fn test_drop_scores() {
        assert_eq!(calculate_drop_score(10, false), 10);
        assert_eq!(calculate_drop_score(10, true), 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(29), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(2), 900);
        assert_eq!(get_drop_interval_ms(9), 200);
        assert_eq!(get_drop_interval_ms(10), 100);
        assert_eq!(get_drop_interval_ms(25), 100);
    }
}
