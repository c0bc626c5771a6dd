//! CLI command implementations
//!
//! Every command that reads a config follows the same sequence:
//! 1. Load and validate the config
//! 2. Apply the configured log level
//! 3. Load class definitions against the process-wide validator registry
//! 4. Run the command and write one JSON response to stdout

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::document::Document;
use crate::engine::{Engine, ValidateError, ValidateOptions, DEFAULT_MAX_DEPTH};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::schema::{ClassLoader, ClassRegistry};
use crate::validators;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Class definition directory (required)
    pub classes_dir: String,

    /// Stop at the first failure unless `--tolerant` is given (default true)
    #[serde(default = "default_stop_on_first_error")]
    pub stop_on_first_error: bool,

    /// Nested document depth limit (default 64)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Minimum log severity (default "INFO")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_stop_on_first_error() -> bool {
    true
}
fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_log_level() -> String {
    "INFO".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.classes_dir.trim().is_empty() {
            return Err(CliError::config_error("classes_dir must not be empty"));
        }

        if self.max_depth == 0 {
            return Err(CliError::config_error("max_depth must be > 0"));
        }

        self.log_severity()?;

        Ok(())
    }

    /// Get class directory as Path
    pub fn classes_path(&self) -> &Path {
        Path::new(&self.classes_dir)
    }

    /// Parsed `log_level`
    pub fn log_severity(&self) -> CliResult<Severity> {
        self.log_level
            .parse()
            .map_err(|e: String| CliError::config_error(format!("Invalid log_level: {}", e)))
    }
}

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run a parsed command
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check {
            config,
            class,
            doc,
            fields,
            tolerant,
        } => check(&config, &class, doc.as_deref(), fields, tolerant),
        Command::Classes { config } => classes(&config),
        Command::Validators => validators(),
    }
}

/// Validate one document and report the outcome on stdout.
///
/// Failed checks are a successful command run (`valid: false`). Faults are
/// written as an error response and returned, so the process exits 1.
pub fn check(
    config_path: &Path,
    class: &str,
    doc_path: Option<&Path>,
    fields: Vec<String>,
    tolerant: bool,
) -> CliResult<()> {
    let outcome = load_config(config_path).and_then(|config| {
        let document = match doc_path {
            Some(path) => read_document_file(path)?,
            None => read_request()?,
        };
        check_document(&config, class, document, fields, tolerant)
    });

    match outcome {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// List loaded classes with their validation order
pub fn classes(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let registry = load_classes(&config)?;
    write_response(describe_classes(&registry))
}

/// List registered validator kinds
pub fn validators() -> CliResult<()> {
    write_response(json!(validators::global().kinds()))
}

fn load_config(config_path: &Path) -> CliResult<Config> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_severity()?);

    let max_depth = config.max_depth.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("classes_dir", config.classes_dir.as_str()),
            ("max_depth", max_depth.as_str()),
        ],
    );

    Ok(config)
}

fn load_classes(config: &Config) -> CliResult<ClassRegistry> {
    let mut registry = ClassRegistry::new();
    ClassLoader::new(config.classes_path()).load_all(&mut registry, validators::global())?;
    Ok(registry)
}

fn read_document_file(path: &Path) -> CliResult<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read document {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Validates `document` as an instance of `class` and builds the response data.
fn check_document(
    config: &Config,
    class: &str,
    document: Value,
    fields: Vec<String>,
    tolerant: bool,
) -> CliResult<Value> {
    let registry = load_classes(config)?;
    let document = Document::from_json(class, document)
        .ok_or_else(|| CliError::io_error("Document must be a JSON object"))?;

    let options = if fields.is_empty() {
        ValidateOptions::all()
    } else {
        ValidateOptions::fields(fields)
    };
    let options = options.stop_on_first_error(config.stop_on_first_error && !tolerant);

    let engine = Engine::new(&registry, validators::global()).with_max_depth(config.max_depth);
    match engine.validate(&document, options) {
        Ok(()) => Ok(json!({ "valid": true })),
        Err(ValidateError::Failed(report)) => Ok(json!({
            "valid": false,
            "message": report.message(),
            "details": report.details(),
        })),
        Err(fault) => Err(fault.into()),
    }
}

fn describe_classes(registry: &ClassRegistry) -> Value {
    let classes: Vec<Value> = registry
        .classes()
        .into_iter()
        .map(|class| {
            let fields: Vec<Value> = class
                .fields()
                .map(|field| {
                    json!({
                        "name": field.name,
                        "type": field.field_type.type_name(),
                        "transient": field.transient,
                    })
                })
                .collect();
            json!({
                "name": class.name(),
                "validation_order": class.validation_order(),
                "fields": fields,
            })
        })
        .collect();
    Value::Array(classes)
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_config(temp_dir: &TempDir, extra: Value) -> std::path::PathBuf {
        let config_path = temp_dir.path().join("aerovalidate.json");
        let classes_dir = temp_dir.path().join("classes");
        fs::create_dir_all(&classes_dir).unwrap();

        let mut config = json!({
            "classes_dir": classes_dir.to_string_lossy()
        });
        if let (Value::Object(config), Value::Object(extra)) = (&mut config, extra) {
            config.extend(extra);
        }

        fs::write(&config_path, config.to_string()).unwrap();
        fs::write(
            classes_dir.join("user.json"),
            json!({
                "name": "User",
                "fields": [
                    { "name": "code", "type": "string",
                      "validators": [{ "type": "length", "param": 5 }] },
                    { "name": "name", "type": "string",
                      "validators": [{ "type": "required" }, { "type": "minLength", "param": 2 }] },
                    { "name": "age", "type": "number",
                      "validators": [{ "type": "gte", "param": 0 }] }
                ]
            })
            .to_string(),
        )
        .unwrap();

        config_path
    }

    #[test]
    fn test_check_valid_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&create_config(&temp_dir, json!({}))).unwrap();

        let doc = json!({ "code": "ABCDE", "name": "Ann", "age": 30 });
        let data = check_document(&config, "User", doc, vec![], false).unwrap();
        assert_eq!(data, json!({ "valid": true }));
    }

    #[test]
    fn test_check_reports_failures() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&create_config(&temp_dir, json!({}))).unwrap();
        let doc = json!({ "code": "ab", "name": "A", "age": 30 });

        let strict = check_document(&config, "User", doc.clone(), vec![], false).unwrap();
        assert_eq!(strict["valid"], false);
        assert_eq!(strict["message"], "Length of \"code\" has to be 5");
        assert_eq!(strict["details"].as_array().unwrap().len(), 1);

        let tolerant = check_document(&config, "User", doc.clone(), vec![], true).unwrap();
        assert_eq!(tolerant["details"].as_array().unwrap().len(), 2);
        assert_eq!(tolerant["details"][1]["path"], "name");

        let only_name = check_document(&config, "User", doc, vec!["name".into()], false).unwrap();
        assert_eq!(only_name["details"][0]["validator"], "minLength");
    }

    #[test]
    fn test_config_tolerant_default() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, json!({ "stop_on_first_error": false }));
        let config = Config::load(&config_path).unwrap();

        let doc = json!({ "code": "ab", "name": "A", "age": 1 });
        let data = check_document(&config, "User", doc, vec![], false).unwrap();
        assert_eq!(data["details"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_check_fault_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&create_config(&temp_dir, json!({}))).unwrap();

        let doc = json!({ "code": "ABCDE", "name": "Ann", "age": "old" });
        let err = check_document(&config, "User", doc, vec![], true).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::ValidationFault);
        assert!(err.message().starts_with("AERO_INCOMPATIBLE_VALUE"));

        let err = check_document(&config, "Ghost", json!({}), vec![], false).unwrap_err();
        assert!(err.message().starts_with("AERO_UNKNOWN_CLASS"));

        let err = check_document(&config, "User", json!([1]), vec![], false).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::IoError);
    }

    #[test]
    fn test_describe_classes() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load(&create_config(&temp_dir, json!({}))).unwrap();

        let listing = describe_classes(&load_classes(&config).unwrap());
        assert_eq!(listing[0]["name"], "User");
        assert_eq!(listing[0]["validation_order"], json!(["code", "name", "age"]));
        assert_eq!(listing[0]["fields"][2]["type"], "number");
    }

    #[test]
    fn test_config_validates_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, json!({ "max_depth": 0 }));

        let result = Config::load(&config_path);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_config_validates_log_level() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, json!({ "log_level": "LOUD" }));

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("aerovalidate.json");
        fs::write(&config_path, json!({ "classes_dir": "classes" }).to_string()).unwrap();

        let config = Config::load(&config_path).unwrap();
        assert!(config.stop_on_first_error);
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.log_severity().unwrap(), Severity::Info);
    }

    #[test]
    fn test_config_requires_classes_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("aerovalidate.json");
        fs::write(&config_path, json!({ "max_depth": 8 }).to_string()).unwrap();

        assert!(Config::load(&config_path).is_err());
    }
}
