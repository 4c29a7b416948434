//! Curriculum records as handed over by the enrollment provider.
//!
//! These are flat, ID-referenced records loaded once per request. Courses
//! arrive already ordered; modules and their lessons/tests keep their stored
//! order.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// A course resolved to its ordered modules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// A module holds either lessons or tests, never both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Module {
    pub id: u64,
    pub title: String,
    #[serde(flatten)]
    pub content: ModuleContent,
}

/// Content of a module.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModuleContent {
    Lessons(Vec<Lesson>),
    Tests(Vec<Test>),
}

/// A lesson with the lengths of its attached media, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lesson {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub media_seconds: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Test {
    pub id: u64,
    pub title: String,
}

/// A learning track: an ordered list of courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A student and the course IDs they are enrolled in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub enrolled_courses: Vec<u64>,
}

/// Import document carrying tracks, their curriculum, and students.
///
/// ```rust
/// use tempo_core::models::{Catalog, ModuleContent};
///
/// let json = r#"{
///     "tracks": [{
///         "id": 1,
///         "title": "Japanese N5",
///         "courses": [{
///             "id": 10,
///             "title": "Kana",
///             "modules": [
///                 {"id": 100, "title": "Hiragana", "lessons": [
///                     {"id": 1000, "title": "Vowels", "media_seconds": [300, 420]}
///                 ]},
///                 {"id": 101, "title": "Quiz", "tests": [{"id": 5000, "title": "Kana quiz"}]}
///             ]
///         }]
///     }],
///     "students": [{"id": 7, "name": "Mai", "enrolled_courses": [10]}]
/// }"#;
///
/// let catalog: Catalog = serde_json::from_str(json)?;
/// assert_eq!(catalog.tracks[0].courses[0].modules.len(), 2);
/// assert!(matches!(
///     catalog.tracks[0].courses[0].modules[1].content,
///     ModuleContent::Tests(_)
/// ));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub students: Vec<Student>,
}

impl Catalog {
    /// Reads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the file cannot be read and
    /// `PlannerError::Serialization` if it is not a valid catalog.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Counts of records written by a catalog import.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportReport {
    pub tracks: u32,
    pub courses: u32,
    pub modules: u32,
    pub lessons: u32,
    pub tests: u32,
    pub students: u32,
}
