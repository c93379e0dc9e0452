//! CLI command implementations
//!
//! Each command builds one JSON value and prints it with [`write_response`].
//! Failures are printed with [`write_error`] and returned to `main`, which
//! exits non-zero.

use std::path::Path;

use serde_json::{json, Value};

use crate::compiler::{CompileOptions, CompiledSchema};
use crate::layout::LayoutDescriptor;
use crate::loader::{load_schema_file, SchemaLoader};
use crate::observability::{Logger, Severity};
use crate::registry::{Alignment, ScalarType};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    if cli.verbose {
        Logger::set_min_severity(Severity::Trace);
    }
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Compile {
            file,
            no_check_names,
            align,
        } => compile(&file, no_check_names, align),
        Command::Inspect { descriptor } => inspect(&descriptor),
        Command::Load { dir } => load(&dir),
        Command::Types => Ok(types()),
    };

    match result {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Compile one description file
pub fn compile(path: &Path, no_check_names: bool, align: Option<char>) -> CliResult<Value> {
    let mut options = CompileOptions::new();
    if no_check_names {
        options = options.check_names(false);
    }
    if let Some(marker) = align {
        let alignment = Alignment::from_marker(marker)
            .map_err(|e| CliError::invalid_argument(format!("--align: {}", e)))?;
        options = options.alignment(alignment);
    }

    let (name, schema) = load_schema_file(path, options)?;
    schema_value(&name, &schema)
}

/// Parse a descriptor string back into fields
pub fn inspect(descriptor: &str) -> CliResult<Value> {
    let layout = LayoutDescriptor::parse(descriptor)?;
    let offsets = layout.offsets()?;

    let mut fields = Vec::with_capacity(layout.len());
    for (field, offset) in layout.fields().iter().zip(offsets) {
        fields.push(json!({
            "token": field.token(),
            "type": field.scalar_type(),
            "shape": field.shape(),
            "item_size": field.item_size(),
            "byte_size": field.byte_size()?,
            "offset": offset,
        }));
    }

    Ok(json!({
        "alignment": layout.alignment(),
        "descriptor": layout.to_string(),
        "fields": fields,
        "record_size": layout.record_size()?,
    }))
}

/// Compile every description file in a directory
pub fn load(dir: &Path) -> CliResult<Value> {
    let mut loader = SchemaLoader::new(dir);
    loader.load_all()?;

    let mut schemas = Vec::with_capacity(loader.schema_count());
    for name in loader.names() {
        if let Some(schema) = loader.get(name) {
            schemas.push(schema_value(name, schema)?);
        }
    }
    Ok(json!({ "schemas": schemas }))
}

/// Registry listing
pub fn types() -> Value {
    let types: Vec<Value> = ScalarType::ALL
        .iter()
        .map(|ty| {
            json!({
                "name": ty.name(),
                "code": ty.layout_code().to_string(),
                "bulk": ty.bulk_code(),
                "byte_width": ty.byte_width(),
                "indexable": ty.is_indexable(),
            })
        })
        .collect();
    json!({ "types": types })
}

fn schema_value(name: &str, schema: &CompiledSchema) -> CliResult<Value> {
    Ok(json!({
        "name": name,
        "schema": serde_json::to_value(schema)?,
        "record_size": schema.record_size()?,
        "indexed": schema.indexed_columns(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PARTICLE: &str = r#"{
        "name": "particle",
        "columns": {
            "id":       {"type": "Int64", "pos": 0, "indexed": true},
            "pressure": {"type": "Float32", "shape": [2, 3], "pos": 1},
            "label":    {"type": "String", "length": 8}
        }
    }"#;

    #[test]
    fn test_compile_command() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("particle.json");
        fs::write(&path, PARTICLE).unwrap();

        let value = compile(&path, false, None).unwrap();
        assert_eq!(value["name"], "particle");
        assert_eq!(value["schema"]["descriptor"], "=q(2, 3)f8s");
        assert_eq!(value["schema"]["names"], json!(["id", "pressure", "label"]));
        assert_eq!(value["record_size"], 8 + 24 + 8);
        assert_eq!(value["indexed"], json!(["id"]));

        let value = compile(&path, false, Some('@')).unwrap();
        assert_eq!(value["schema"]["descriptor"], "@q(2, 3)f8s");
    }

    #[test]
    fn test_compile_bad_align() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("particle.json");
        fs::write(&path, PARTICLE).unwrap();

        let err = compile(&path, false, Some('?')).unwrap_err();
        assert_eq!(err.code_str(), "ROWLAYOUT_CLI_INVALID_ARGUMENT");
    }

    #[test]
    fn test_compile_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = compile(&temp.path().join("nope.json"), false, None).unwrap_err();
        assert_eq!(err.code_str(), "ROWLAYOUT_MALFORMED_SCHEMA_FILE");
    }

    #[test]
    fn test_inspect_command() {
        let value = inspect("@bi").unwrap();
        assert_eq!(value["alignment"], "@");
        assert_eq!(value["fields"][1]["offset"], 4);
        assert_eq!(value["record_size"], 8);

        let err = inspect("=x").unwrap_err();
        assert_eq!(err.code_str(), "ROWLAYOUT_MALFORMED_DESCRIPTOR");
    }

    #[test]
    fn test_load_command() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("particle.json"), PARTICLE).unwrap();

        let value = load(temp.path()).unwrap();
        assert_eq!(value["schemas"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_types_command() {
        let value = types();
        assert_eq!(value["types"].as_array().unwrap().len(), 14);
        assert_eq!(value["types"][0]["name"], "Bool");
    }
}
