//! Level catalog
//!
//! Ten hand-authored levels, each raising spawn rate and population while
//! shrinking object lifespan and the share of targets.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, InvalidLevelError};

/// Shapes an object can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Star,
    Balloon,
    Heart,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Star,
        ShapeKind::Balloon,
        ShapeKind::Heart,
        ShapeKind::Circle,
        ShapeKind::Triangle,
    ];

    /// Lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Star => "star",
            ShapeKind::Balloon => "balloon",
            ShapeKind::Heart => "heart",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Stable index for renderer lookup tables
    pub fn index(&self) -> u32 {
        match self {
            ShapeKind::Star => 0,
            ShapeKind::Balloon => 1,
            ShapeKind::Heart => 2,
            ShapeKind::Circle => 3,
            ShapeKind::Triangle => 4,
        }
    }
}

/// Immutable configuration for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    pub name: String,
    pub description: String,
    pub target: ShapeKind,
    pub distractors: Vec<ShapeKind>,
    /// Objects per second
    pub spawn_rate: f32,
    /// Object lifespan in milliseconds
    pub lifespan_ms: f64,
    /// Probability (0-1) that a spawned object is a target
    pub target_ratio: f32,
    pub max_objects: usize,
    pub required_correct_clicks: u32,
    pub max_incorrect_clicks: u32,
    /// Background scroll speed (pixels/s)
    pub background_speed: f32,
    /// Optional time limit in seconds
    #[serde(default)]
    pub time_limit: Option<u32>,
}

impl LevelConfig {
    /// Minimum time between spawns (ms)
    pub fn spawn_interval_ms(&self) -> f64 {
        1000.0 / self.spawn_rate as f64
    }

    /// Check the invariants every level must satisfy
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |reason| {
            Err(ConfigError::InvalidLevel {
                level: self.level,
                reason,
            })
        };
        if !(0.0..=1.0).contains(&self.target_ratio) {
            return fail("target ratio must be within 0..=1");
        }
        if self.required_correct_clicks == 0 {
            return fail("required correct clicks must be positive");
        }
        if !(self.spawn_rate > 0.0) {
            return fail("spawn rate must be positive");
        }
        if !(self.lifespan_ms > 0.0) {
            return fail("lifespan must be positive");
        }
        if self.max_objects == 0 {
            return fail("max objects must be positive");
        }
        if self.distractors.is_empty() {
            return fail("at least one distractor shape is required");
        }
        Ok(())
    }
}

/// Table of level configurations, ordered by level number.
///
/// Serialized as a plain list; deserializing goes through `LevelCatalog::new`
/// so a loaded table holds the same invariants as a built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LevelConfig>", into = "Vec<LevelConfig>")]
pub struct LevelCatalog {
    levels: Vec<LevelConfig>,
}

impl TryFrom<Vec<LevelConfig>> for LevelCatalog {
    type Error = ConfigError;

    fn try_from(levels: Vec<LevelConfig>) -> Result<Self, Self::Error> {
        Self::new(levels)
    }
}

impl From<LevelCatalog> for Vec<LevelConfig> {
    fn from(catalog: LevelCatalog) -> Self {
        catalog.levels
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelCatalog {
    /// Build a catalog from arbitrary levels, checking every invariant
    pub fn new(mut levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::Empty);
        }
        levels.sort_by_key(|l| l.level);
        for pair in levels.windows(2) {
            if pair[0].level == pair[1].level {
                return Err(ConfigError::DuplicateLevel {
                    level: pair[0].level,
                });
            }
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// The ten built-in levels
    pub fn standard() -> Self {
        use ShapeKind::*;

        let all_but = |target: ShapeKind| -> Vec<ShapeKind> {
            ShapeKind::ALL.iter().copied().filter(|s| *s != target).collect()
        };

        #[rustfmt::skip]
        let table: [(u32, &str, &str, ShapeKind, Vec<ShapeKind>, f32, f64, f32, usize, u32, u32, f32, Option<u32>); 10] = [
            (1, "Star Gazing", "Click only the bright stars!", Star, vec![Circle], 0.5, 4000.0, 0.7, 3, 10, 3, 0.0, None),
            (2, "Balloon Pop", "Pop the red balloons only!", Balloon, vec![Circle, Triangle], 0.7, 3500.0, 0.6, 4, 12, 3, 10.0, None),
            (3, "Heart Hunt", "Find the hearts among the shapes!", Heart, vec![Star, Circle, Triangle], 0.8, 3000.0, 0.5, 5, 15, 4, 15.0, None),
            (4, "Shape Shifter", "Quick! Click the triangles!", Triangle, vec![Star, Circle, Heart, Balloon], 1.0, 2800.0, 0.4, 6, 18, 4, 20.0, None),
            (5, "Circle Challenge", "Focus on circles only!", Circle, vec![Star, Triangle, Heart, Balloon], 1.2, 2500.0, 0.35, 7, 20, 5, 25.0, None),
            (6, "Speed Stars", "Catch the fast-moving stars!", Star, all_but(Star), 1.5, 2200.0, 0.3, 8, 22, 5, 30.0, None),
            (7, "Balloon Bonanza", "Pop balloons in the chaos!", Balloon, all_but(Balloon), 1.8, 2000.0, 0.25, 9, 25, 6, 35.0, None),
            (8, "Heart Rush", "Find hearts in the storm!", Heart, all_but(Heart), 2.0, 1800.0, 0.2, 10, 28, 6, 40.0, None),
            (9, "Triangle Tornado", "Triangles in the whirlwind!", Triangle, all_but(Triangle), 2.5, 1600.0, 0.18, 12, 30, 7, 45.0, None),
            (10, "Master Focus", "Ultimate attention challenge!", Star, all_but(Star), 3.0, 1400.0, 0.15, 15, 35, 8, 50.0, Some(60)),
        ];

        let levels = table
            .into_iter()
            .map(
                |(
                    level,
                    name,
                    description,
                    target,
                    distractors,
                    spawn_rate,
                    lifespan_ms,
                    target_ratio,
                    max_objects,
                    required_correct_clicks,
                    max_incorrect_clicks,
                    background_speed,
                    time_limit,
                )| LevelConfig {
                    level,
                    name: name.to_string(),
                    description: description.to_string(),
                    target,
                    distractors,
                    spawn_rate,
                    lifespan_ms,
                    target_ratio,
                    max_objects,
                    required_correct_clicks,
                    max_incorrect_clicks,
                    background_speed,
                    time_limit,
                },
            )
            .collect();

        Self { levels }
    }

    /// Look up a level by number
    pub fn get(&self, level: u32) -> Result<&LevelConfig, InvalidLevelError> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .ok_or(InvalidLevelError { level })
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Check every level's invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.levels.iter().try_for_each(LevelConfig::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.len(), 10);
        catalog.validate().unwrap();
        for (i, level) in catalog.iter().enumerate() {
            assert_eq!(level.level, i as u32 + 1);
            assert!(!level.distractors.contains(&level.target));
        }
    }

    #[test]
    fn test_level_one_parameters() {
        let catalog = LevelCatalog::standard();
        let l1 = catalog.get(1).unwrap();
        assert_eq!(l1.target, ShapeKind::Star);
        assert_eq!(l1.distractors, vec![ShapeKind::Circle]);
        assert_eq!(l1.spawn_rate, 0.5);
        assert_eq!(l1.lifespan_ms, 4000.0);
        assert_eq!(l1.max_objects, 3);
        assert_eq!(l1.required_correct_clicks, 10);
        assert_eq!(l1.max_incorrect_clicks, 3);
        assert_eq!(l1.spawn_interval_ms(), 2000.0);
        assert_eq!(l1.time_limit, None);
    }

    #[test]
    fn test_only_final_level_is_timed() {
        let catalog = LevelCatalog::standard();
        let timed: Vec<u32> = catalog
            .iter()
            .filter(|l| l.time_limit.is_some())
            .map(|l| l.level)
            .collect();
        assert_eq!(timed, vec![10]);
    }

    #[test]
    fn test_shape_names_match_serde() {
        for shape in ShapeKind::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape.as_str()));
        }
    }

    #[test]
    fn test_unknown_level() {
        let catalog = LevelCatalog::standard();
        assert_eq!(catalog.get(0), Err(InvalidLevelError { level: 0 }));
        assert_eq!(catalog.get(11), Err(InvalidLevelError { level: 11 }));
    }

    #[test]
    fn test_rejects_bad_ratio() {
        let mut level = LevelCatalog::standard().get(1).unwrap().clone();
        level.target_ratio = 1.5;
        assert!(matches!(
            LevelCatalog::new(vec![level]),
            Err(ConfigError::InvalidLevel { level: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_required_clicks() {
        let mut level = LevelCatalog::standard().get(2).unwrap().clone();
        level.required_correct_clicks = 0;
        assert!(level.validate().is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let level = LevelCatalog::standard().get(3).unwrap().clone();
        assert_eq!(
            LevelCatalog::new(vec![level.clone(), level]),
            Err(ConfigError::DuplicateLevel { level: 3 })
        );
        assert_eq!(LevelCatalog::new(Vec::new()), Err(ConfigError::Empty));
    }

    #[test]
    fn test_catalog_json_roundtrip() {
        let catalog = LevelCatalog::standard();
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(json.starts_with('['));
        let parsed: LevelCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_json_table_is_checked_on_load() {
        let mut level = LevelCatalog::standard().get(1).unwrap().clone();
        level.target_ratio = 1.5;
        level.distractors.clear();
        let json = serde_json::to_string(&vec![level.clone(), level]).unwrap();
        let err = serde_json::from_str::<LevelCatalog>(&json).unwrap_err();
        assert!(err.to_string().contains("level 1"), "{err}");

        let two = LevelCatalog::standard().get(2).unwrap().clone();
        let json = serde_json::to_string(&vec![two.clone(), two]).unwrap();
        let err = serde_json::from_str::<LevelCatalog>(&json).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");

        assert!(serde_json::from_str::<LevelCatalog>("[]").is_err());
    }
}
