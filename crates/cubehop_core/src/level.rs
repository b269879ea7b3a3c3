//! Level serialization
//!
//! A level describes the board as a grid of cells. Every cell in the grid gets
//! a floor tile unless it is a hole; some tiles bob and some are replaced by
//! raised sliding blocks. Levels are loaded from and saved to RON files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use cubehop_physics::SlideDirection;

/// A grid cell, as `(x, z)`
pub type Cell = (i32, i32);

/// Half-open cell ranges covered by the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Inclusive lower corner
    pub min: Cell,
    /// Exclusive upper corner
    pub max: Cell,
}

impl GridBounds {
    /// Whether the grid covers no cells
    pub fn is_empty(&self) -> bool {
        self.max.0 <= self.min.0 || self.max.1 <= self.min.1
    }

    /// Whether a cell lies inside the grid
    pub fn contains(&self, cell: Cell) -> bool {
        cell.0 >= self.min.0 && cell.0 < self.max.0 && cell.1 >= self.min.1 && cell.1 < self.max.1
    }

    /// Number of cells in the grid, saturating at `usize::MAX`
    pub fn cell_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        // Each span fits in u64 even for the full i32 range
        let width = (self.max.0 as i64 - self.min.0 as i64) as u64;
        let depth = (self.max.1 as i64 - self.min.1 as i64) as u64;
        width
            .checked_mul(depth)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(usize::MAX)
    }

    /// Iterate over cells, x-major
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (min, max) = (self.min, self.max);
        (min.0..max.0).flat_map(move |x| (min.1..max.1).map(move |z| (x, z)))
    }
}

/// A raised block that slides along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub cell: Cell,
    pub direction: SlideDirection,
}

/// A serializable board layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level name (for display/debugging)
    pub name: String,
    /// Cells covered by the board
    pub grid: GridBounds,
    /// Height of floor tile centers
    pub floor_y: f32,
    /// Height of sliding block centers
    pub obstacle_y: f32,
    /// Half edge length of every tile
    pub tile_half_size: f32,
    /// Cells with no tile
    #[serde(default)]
    pub holes: Vec<Cell>,
    /// Cells whose floor tile bobs
    #[serde(default)]
    pub bobbing: Vec<Cell>,
    /// Cells whose floor tile is replaced by a sliding block
    #[serde(default)]
    pub sliders: Vec<SliderSpec>,
    /// Player spawn position (x, y, z)
    pub player_spawn: (f32, f32, f32),
    /// Half edge length of the player cube
    pub player_half_size: f32,
}

impl Level {
    /// Create a flat board with no holes or moving tiles
    pub fn new(name: impl Into<String>, grid: GridBounds) -> Self {
        Self {
            name: name.into(),
            grid,
            floor_y: -2.0,
            obstacle_y: -1.0,
            tile_half_size: 0.5,
            holes: Vec::new(),
            bobbing: Vec::new(),
            sliders: Vec::new(),
            player_spawn: (0.0, 0.0, 0.0),
            player_half_size: 0.2,
        }
    }

    /// The built-in board: a 10x10 grid with six holes, eight bobbing tiles
    /// and six sliding blocks
    pub fn default_layout() -> Self {
        Self::new("Default", GridBounds { min: (-5, -5), max: (5, 5) })
            .with_holes([(-4, -1), (-3, -2), (3, -4), (-1, 0), (1, 1), (3, 0)])
            .with_bobbing([
                (-5, 3),
                (-4, 3),
                (-3, 3),
                (-2, 2),
                (-1, -1),
                (0, -1),
                (2, 2),
                (3, 3),
            ])
            .with_slider((-2, -4), SlideDirection::TowardNegZ)
            .with_slider((2, -2), SlideDirection::TowardNegZ)
            .with_slider((-1, 4), SlideDirection::TowardPosZ)
            .with_slider((4, -3), SlideDirection::TowardPosZ)
            .with_slider((-5, 2), SlideDirection::TowardNegX)
            .with_slider((-4, -2), SlideDirection::TowardNegX)
    }

    /// Load a level from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse a level from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, LevelLoadError> {
        let level = ron::from_str(contents)?;
        Ok(level)
    }

    /// Serialize to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, pretty)
    }

    /// Save a level to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelSaveError> {
        let contents = self.to_ron_string()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add holes
    pub fn with_holes(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.holes.extend(cells);
        self
    }

    /// Add bobbing tiles
    pub fn with_bobbing(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.bobbing.extend(cells);
        self
    }

    /// Add a sliding block
    pub fn with_slider(mut self, cell: Cell, direction: SlideDirection) -> Self {
        self.sliders.push(SliderSpec { cell, direction });
        self
    }

    /// Set the player spawn position
    pub fn with_player_spawn(mut self, x: f32, y: f32, z: f32) -> Self {
        self.player_spawn = (x, y, z);
        self
    }

    /// Whether a cell is a hole
    pub fn is_hole(&self, cell: Cell) -> bool {
        self.holes.contains(&cell)
    }

    /// Whether a cell bobs
    pub fn is_bobbing(&self, cell: Cell) -> bool {
        self.bobbing.contains(&cell)
    }

    /// The slide direction of a cell, if it holds a sliding block
    pub fn slider_at(&self, cell: Cell) -> Option<SlideDirection> {
        self.sliders.iter().find(|s| s.cell == cell).map(|s| s.direction)
    }

    /// Cells that hold a tile (grid minus holes)
    pub fn tile_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.grid.cells().filter(move |cell| !self.is_hole(*cell))
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::default_layout()
    }
}

/// Error loading a level
#[derive(Debug)]
pub enum LevelLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LevelLoadError {
    fn from(e: io::Error) -> Self {
        LevelLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelLoadError::Parse(e)
    }
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::Io(e) => write!(f, "IO error: {}", e),
            LevelLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LevelLoadError {}

/// Error saving a level
#[derive(Debug)]
pub enum LevelSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LevelSaveError {
    fn from(e: io::Error) -> Self {
        LevelSaveError::Io(e)
    }
}

impl From<ron::Error> for LevelSaveError {
    fn from(e: ron::Error) -> Self {
        LevelSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LevelSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSaveError::Io(e) => write!(f, "IO error: {}", e),
            LevelSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LevelSaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_bounds() {
        let grid = GridBounds { min: (-5, -5), max: (5, 5) };
        assert_eq!(grid.cell_count(), 100);
        assert_eq!(grid.cells().count(), 100);
        assert!(grid.contains((-5, -5)));
        assert!(grid.contains((4, 4)));
        assert!(!grid.contains((5, 0)));
        assert!(!grid.contains((0, -6)));
    }

    #[test]
    fn test_empty_grid() {
        let grid = GridBounds { min: (2, 0), max: (2, 4) };
        assert!(grid.is_empty());
        assert_eq!(grid.cell_count(), 0);
        assert_eq!(grid.cells().count(), 0);
    }

    #[test]
    fn test_cell_count_full_range() {
        let grid = GridBounds { min: (i32::MIN, 0), max: (i32::MAX, 1) };
        assert_eq!(grid.cell_count(), u32::MAX as usize);

        let huge = GridBounds { min: (i32::MIN, i32::MIN), max: (i32::MAX, i32::MAX) };
        assert!(huge.cell_count() >= u32::MAX as usize);
    }

    #[test]
    fn test_default_layout_counts() {
        let level = Level::default_layout();
        assert_eq!(level.name, "Default");
        assert_eq!(level.holes.len(), 6);
        assert_eq!(level.bobbing.len(), 8);
        assert_eq!(level.sliders.len(), 6);
        assert_eq!(level.tile_cells().count(), 94);
    }

    #[test]
    fn test_cell_queries() {
        let level = Level::default_layout();
        assert!(level.is_hole((-1, 0)));
        assert!(!level.is_hole((0, 0)));
        assert!(level.is_bobbing((0, -1)));
        assert_eq!(level.slider_at((4, -3)), Some(SlideDirection::TowardPosZ));
        assert_eq!(level.slider_at((-5, 2)), Some(SlideDirection::TowardNegX));
        assert_eq!(level.slider_at((0, 0)), None);
    }

    #[test]
    fn test_spawn_is_over_a_tile() {
        let level = Level::default_layout();
        let (x, _, z) = level.player_spawn;
        let cell = (x.round() as i32, z.round() as i32);
        assert!(level.grid.contains(cell));
        assert!(!level.is_hole(cell));
    }

    #[test]
    fn test_parse_minimal_level() {
        let ron = r#"
            Level(
                name: "Tiny",
                grid: (min: (0, 0), max: (2, 2)),
                floor_y: -2.0,
                obstacle_y: -1.0,
                tile_half_size: 0.5,
                bobbing: [(1, 1)],
                player_spawn: (0.0, 1.0, 0.0),
                player_half_size: 0.2,
            )
        "#;
        let level = Level::from_ron_str(ron).expect("level should parse");
        assert_eq!(level.name, "Tiny");
        assert!(level.holes.is_empty());
        assert!(level.sliders.is_empty());
        assert_eq!(level.bobbing, vec![(1, 1)]);
        assert_eq!(level.tile_cells().count(), 4);
    }

    #[test]
    fn test_parse_error() {
        let result = Level::from_ron_str("Level(name: ");
        assert!(matches!(result, Err(LevelLoadError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Level::load("definitely/not/here.ron");
        assert!(matches!(result, Err(LevelLoadError::Io(_))));
    }

    #[test]
    fn test_ron_text_round_trip() {
        let level = Level::default_layout();
        let text = level.to_ron_string().expect("serialize");
        assert!(text.contains("TowardNegZ"));

        let parsed = Level::from_ron_str(&text).expect("parse");
        assert_eq!(parsed, level);
    }
}
