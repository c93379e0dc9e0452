//! Schema loader
//!
//! Reads description files (`*.json`, one schema per file) from a directory,
//! compiles each one and keeps the results by schema name. A file that
//! cannot be read, decoded or compiled aborts the load, and nothing from
//! that load is registered.

mod file;

pub use file::{ColumnDef, FileOptions, SchemaFile};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compiler::{CompileOptions, CompiledSchema, SchemaCompiler};
use crate::errors::{LayoutError, LayoutResult};
use crate::observability::{log_event_with_fields, Event};

/// Reads and compiles one description file.
///
/// Returns the schema name declared in the file with its compiled schema.
pub fn load_schema_file(path: &Path, options: CompileOptions) -> LayoutResult<(String, CompiledSchema)> {
    let content = fs::read_to_string(path).map_err(|e| {
        LayoutError::malformed_schema_file(
            path.display().to_string(),
            format!("Failed to read file: {}", e),
        )
    })?;

    let file = SchemaFile::from_json(&content).map_err(|e| {
        LayoutError::malformed_schema_file(path.display().to_string(), format!("Invalid JSON: {}", e))
    })?;

    let description = file.to_description()?;
    let schema = SchemaCompiler::with_options(options).compile(&description)?;
    Ok((file.name, schema))
}

/// Compiled schemas loaded from a directory, indexed by name
pub struct SchemaLoader {
    schema_dir: PathBuf,
    options: CompileOptions,
    schemas: HashMap<String, CompiledSchema>,
}

impl SchemaLoader {
    pub fn new(schema_dir: &Path) -> Self {
        Self::with_options(schema_dir, CompileOptions::default())
    }

    /// Loader whose compiles all use `options`
    pub fn with_options(schema_dir: &Path, options: CompileOptions) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            options,
            schemas: HashMap::new(),
        }
    }

    /// Loads every `*.json` file in the schema directory.
    ///
    /// Files are visited in name order. A missing directory loads nothing.
    /// Schemas are registered only once every file has compiled, so a failed
    /// load leaves the loader unchanged. Returns the number of schemas loaded
    /// by this call.
    pub fn load_all(&mut self) -> LayoutResult<usize> {
        if !self.schema_dir.exists() {
            return Ok(0);
        }

        let dir = self.schema_dir.display().to_string();
        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            LayoutError::malformed_schema_file(dir.as_str(), format!("Failed to read schema directory: {}", e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                LayoutError::malformed_schema_file(dir.as_str(), format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut staged: HashMap<String, CompiledSchema> = HashMap::with_capacity(paths.len());
        for path in &paths {
            if let Err(e) = self.stage_file(path, &mut staged) {
                let shown = path.display().to_string();
                let message = e.to_string();
                log_event_with_fields(
                    Event::SchemaLoadFailed,
                    &[("path", shown.as_str()), ("code", e.code()), ("error", message.as_str())],
                );
                return Err(e);
            }
        }

        let loaded = staged.len();
        self.schemas.extend(staged);

        let count = loaded.to_string();
        log_event_with_fields(Event::SchemasLoaded, &[("dir", dir.as_str()), ("count", count.as_str())]);
        Ok(loaded)
    }

    fn stage_file(&self, path: &Path, staged: &mut HashMap<String, CompiledSchema>) -> LayoutResult<()> {
        let (name, schema) = load_schema_file(path, self.options)?;
        if self.schemas.contains_key(&name) || staged.contains_key(&name) {
            return Err(LayoutError::DuplicateSchema(name));
        }
        staged.insert(name, schema);
        Ok(())
    }

    /// Loads a single description file and registers its schema
    pub fn load_file(&mut self, path: &Path) -> LayoutResult<&CompiledSchema> {
        let (name, schema) = load_schema_file(path, self.options)?;
        self.register(name, schema)
    }

    /// Registers a compiled schema; names are unique
    pub fn register(&mut self, name: impl Into<String>, schema: CompiledSchema) -> LayoutResult<&CompiledSchema> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(LayoutError::DuplicateSchema(name));
        }
        Ok(self.schemas.entry(name).or_insert(schema))
    }

    pub fn get(&self, name: &str) -> Option<&CompiledSchema> {
        self.schemas.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Loaded schema names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
