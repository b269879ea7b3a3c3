//! Level validation
//!
//! Validates levels for common errors before a world is built from them. The
//! [`LevelValidator`] checks for empty or oversized grids, cells outside the
//! grid, cells listed twice, contradictory cell roles and bad sizes or heights.

use std::collections::HashSet;

use crate::level::{Cell, Level};

/// Largest grid a level may cover
pub const MAX_GRID_CELLS: usize = 10_000;

/// Validation error found in a level
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Grid covers no cells
    EmptyGrid,
    /// Grid covers more than [`MAX_GRID_CELLS`] cells
    GridTooLarge(usize),
    /// A hole, bobbing tile or slider lies outside the grid
    CellOutOfGrid(Cell),
    /// The same cell appears twice in one list
    DuplicateCell(Cell),
    /// A hole is also listed as bobbing or sliding
    MovingHole(Cell),
    /// A cell is listed as both bobbing and sliding
    ConflictingMotion(Cell),
    /// Tile or player half size is zero, negative or not finite
    NonPositiveSize,
    /// Floor or obstacle height is NaN or infinite
    NonFiniteHeight,
    /// Player spawn is at extreme coordinates (any component absolute value > 10000)
    ExtremeSpawnPosition((f32, f32, f32)),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyGrid => write!(f, "Level grid has no cells"),
            ValidationError::GridTooLarge(count) => write!(
                f,
                "Level grid has {} cells (limit {})",
                count, MAX_GRID_CELLS
            ),
            ValidationError::CellOutOfGrid((x, z)) => {
                write!(f, "Cell ({}, {}) is outside the grid", x, z)
            }
            ValidationError::DuplicateCell((x, z)) => {
                write!(f, "Cell ({}, {}) is listed more than once", x, z)
            }
            ValidationError::MovingHole((x, z)) => {
                write!(f, "Cell ({}, {}) is a hole but is also set to move", x, z)
            }
            ValidationError::ConflictingMotion((x, z)) => {
                write!(f, "Cell ({}, {}) is set to both bob and slide", x, z)
            }
            ValidationError::NonPositiveSize => {
                write!(f, "Tile and player half sizes must be positive and finite")
            }
            ValidationError::NonFiniteHeight => {
                write!(f, "Floor and obstacle heights must be finite")
            }
            ValidationError::ExtremeSpawnPosition((x, y, z)) => {
                write!(
                    f,
                    "Extreme spawn position: ({}, {}, {}) (component abs > 10000)",
                    x, y, z
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Level validator that checks for common errors
///
/// # Example
/// ```ignore
/// let errors = LevelValidator::validate(&level);
/// for error in &errors {
///     log::warn!("Level validation error: {}", error);
/// }
/// ```
pub struct LevelValidator;

impl LevelValidator {
    /// Validate a level, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(level: &Level) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if level.grid.is_empty() {
            errors.push(ValidationError::EmptyGrid);
        }

        let cell_count = level.grid.cell_count();
        if cell_count > MAX_GRID_CELLS {
            errors.push(ValidationError::GridTooLarge(cell_count));
        }

        let slider_cells: Vec<Cell> = level.sliders.iter().map(|s| s.cell).collect();

        // Each list must stay inside the grid and name a cell once
        for list in [&level.holes, &level.bobbing, &slider_cells] {
            let mut seen = HashSet::new();
            for &cell in list.iter() {
                if !level.grid.contains(cell) {
                    errors.push(ValidationError::CellOutOfGrid(cell));
                }
                if !seen.insert(cell) {
                    errors.push(ValidationError::DuplicateCell(cell));
                }
            }
        }

        let holes: HashSet<Cell> = level.holes.iter().copied().collect();
        let bobbing: HashSet<Cell> = level.bobbing.iter().copied().collect();

        let mut reported = HashSet::new();
        for &cell in level.bobbing.iter().chain(slider_cells.iter()) {
            if holes.contains(&cell) && reported.insert(cell) {
                errors.push(ValidationError::MovingHole(cell));
            }
        }

        let mut reported = HashSet::new();
        for &cell in &slider_cells {
            if bobbing.contains(&cell) && reported.insert(cell) {
                errors.push(ValidationError::ConflictingMotion(cell));
            }
        }

        let positive = |size: f32| size > 0.0 && size.is_finite();
        if !positive(level.tile_half_size) || !positive(level.player_half_size) {
            errors.push(ValidationError::NonPositiveSize);
        }

        if !level.floor_y.is_finite() || !level.obstacle_y.is_finite() {
            errors.push(ValidationError::NonFiniteHeight);
        }

        let (x, y, z) = level.player_spawn;
        if [x, y, z].iter().any(|c| !(c.abs() <= 10000.0)) {
            errors.push(ValidationError::ExtremeSpawnPosition(level.player_spawn));
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(level: &Level) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(level);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::GridBounds;
    use cubehop_physics::SlideDirection;

    fn small_level() -> Level {
        Level::new("Small", GridBounds { min: (0, 0), max: (4, 4) })
    }

    #[test]
    fn test_default_layout_is_valid() {
        let errors = LevelValidator::validate(&Level::default_layout());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_empty_grid() {
        let level = Level::new("Empty", GridBounds { min: (0, 0), max: (0, 3) });
        let errors = LevelValidator::validate(&level);
        assert!(errors.contains(&ValidationError::EmptyGrid));
    }

    #[test]
    fn test_cell_out_of_grid() {
        let level = small_level()
            .with_holes([(4, 0)])
            .with_slider((-1, 2), SlideDirection::TowardPosX);
        let errors = LevelValidator::validate(&level);
        assert!(errors.contains(&ValidationError::CellOutOfGrid((4, 0))));
        assert!(errors.contains(&ValidationError::CellOutOfGrid((-1, 2))));
    }

    #[test]
    fn test_duplicate_cell() {
        let level = small_level().with_bobbing([(1, 1), (2, 2), (1, 1)]);
        let errors = LevelValidator::validate(&level);
        assert_eq!(errors, vec![ValidationError::DuplicateCell((1, 1))]);
    }

    #[test]
    fn test_moving_hole() {
        let level = small_level()
            .with_holes([(1, 1), (2, 2)])
            .with_bobbing([(1, 1)])
            .with_slider((2, 2), SlideDirection::TowardNegZ);
        let errors = LevelValidator::validate(&level);
        assert!(errors.contains(&ValidationError::MovingHole((1, 1))));
        assert!(errors.contains(&ValidationError::MovingHole((2, 2))));
    }

    #[test]
    fn test_conflicting_motion() {
        let level = small_level()
            .with_bobbing([(3, 3)])
            .with_slider((3, 3), SlideDirection::TowardPosZ);
        let errors = LevelValidator::validate(&level);
        assert_eq!(errors, vec![ValidationError::ConflictingMotion((3, 3))]);
    }

    #[test]
    fn test_non_positive_size() {
        let mut level = small_level();
        level.player_half_size = 0.0;
        let errors = LevelValidator::validate(&level);
        assert_eq!(errors, vec![ValidationError::NonPositiveSize]);
    }

    #[test]
    fn test_non_finite_size() {
        let mut level = small_level();
        level.tile_half_size = f32::NAN;
        assert_eq!(
            LevelValidator::validate(&level),
            vec![ValidationError::NonPositiveSize]
        );

        level.tile_half_size = 0.5;
        level.player_half_size = f32::INFINITY;
        assert_eq!(
            LevelValidator::validate(&level),
            vec![ValidationError::NonPositiveSize]
        );
    }

    #[test]
    fn test_non_finite_height() {
        let mut level = small_level();
        level.floor_y = f32::INFINITY;
        assert_eq!(
            LevelValidator::validate(&level),
            vec![ValidationError::NonFiniteHeight]
        );

        level.floor_y = -2.0;
        level.obstacle_y = f32::NAN;
        assert_eq!(
            LevelValidator::validate(&level),
            vec![ValidationError::NonFiniteHeight]
        );
    }

    #[test]
    fn test_grid_too_large() {
        let huge = Level::new(
            "Huge",
            GridBounds { min: (-100_000, -100_000), max: (100_000, 100_000) },
        );
        assert_eq!(
            LevelValidator::validate(&huge),
            vec![ValidationError::GridTooLarge(40_000_000_000)]
        );

        let limit = Level::new("Limit", GridBounds { min: (0, 0), max: (100, 100) });
        assert!(LevelValidator::validate(&limit).is_empty());
    }

    #[test]
    fn test_nan_spawn_is_extreme() {
        let level = small_level().with_player_spawn(0.0, f32::NAN, 0.0);
        let errors = LevelValidator::validate(&level);
        assert!(matches!(errors.as_slice(), [ValidationError::ExtremeSpawnPosition(_)]));
    }

    #[test]
    fn test_extreme_spawn() {
        let level = small_level().with_player_spawn(0.0, 20000.0, 0.0);
        let errors = LevelValidator::validate(&level);
        assert_eq!(
            errors,
            vec![ValidationError::ExtremeSpawnPosition((0.0, 20000.0, 0.0))]
        );
    }

    #[test]
    fn test_validate_or_error() {
        assert!(LevelValidator::validate_or_error(&small_level()).is_ok());

        let bad = small_level().with_holes([(9, 9)]);
        let errors = LevelValidator::validate_or_error(&bad).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_error_display() {
        let msg = ValidationError::CellOutOfGrid((7, -2)).to_string();
        assert!(msg.contains("(7, -2)"));
    }
}
