//! Class loader for loading class definitions from disk at startup
//!
//! - Definitions live in `<classes_dir>/*.json`
//! - A file holds one class definition or an array of them
//! - Files are registered in file-name order
//! - Malformed files abort loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::errors::{SchemaFault, SchemaResult};
use super::registry::ClassRegistry;
use super::types::ClassDef;
use crate::observability::{Event, Logger};
use crate::validators::ValidatorRegistry;

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassFile {
    Many(Vec<ClassDef>),
    One(ClassDef),
}

/// Reads class definition files from a directory.
pub struct ClassLoader {
    classes_dir: PathBuf,
}

impl ClassLoader {
    pub fn new(classes_dir: impl Into<PathBuf>) -> Self {
        Self {
            classes_dir: classes_dir.into(),
        }
    }

    /// Returns the class directory path.
    pub fn classes_dir(&self) -> &Path {
        &self.classes_dir
    }

    /// Loads and registers every class file in the directory.
    ///
    /// A missing directory loads nothing. Returns the number of classes
    /// registered.
    pub fn load_all(
        &self,
        classes: &mut ClassRegistry,
        validators: &ValidatorRegistry,
    ) -> SchemaResult<usize> {
        if !self.classes_dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&self.classes_dir).map_err(|e| {
            SchemaFault::malformed(
                self.classes_dir.display().to_string(),
                format!("Failed to read class directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaFault::malformed(
                    self.classes_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut loaded = 0;
        for path in &paths {
            for definition in Self::read_file(path)? {
                classes.register(definition, validators)?;
                loaded += 1;
            }
        }

        let count = loaded.to_string();
        let dir = self.classes_dir.display().to_string();
        Logger::info(
            Event::ClassesLoaded.as_str(),
            &[("classes", count.as_str()), ("dir", dir.as_str())],
        );

        Ok(loaded)
    }

    fn read_file(path: &Path) -> SchemaResult<Vec<ClassDef>> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaFault::malformed(path.display().to_string(), format!("Failed to read file: {}", e))
        })?;

        let file: ClassFile = serde_json::from_str(&content).map_err(|e| {
            SchemaFault::malformed(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        Ok(match file {
            ClassFile::Many(definitions) => definitions,
            ClassFile::One(definition) => vec![definition],
        })
    }

    /// Saves a class definition as `class_<name>.json`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn save(&self, definition: &ClassDef) -> SchemaResult<PathBuf> {
        definition
            .validate_structure()
            .map_err(|e| SchemaFault::malformed(&definition.name, e))?;

        let path = self.classes_dir.join(format!("class_{}.json", definition.name));
        if path.exists() {
            return Err(SchemaFault::ClassImmutable(definition.name.clone()));
        }

        fs::create_dir_all(&self.classes_dir).map_err(|e| {
            SchemaFault::malformed(
                self.classes_dir.display().to_string(),
                format!("Failed to create class directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(definition).map_err(|e| {
            SchemaFault::malformed(
                path.display().to_string(),
                format!("Failed to serialize class: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaFault::malformed(path.display().to_string(), format!("Failed to write file: {}", e))
        })?;

        Ok(path)
    }
}
