use crate::{error::ConfigError, schema::PrimitiveSchema};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a schema-generation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Apply the "non-nullable means required" rule
    pub required_by_default: bool,

    /// Treat non-string map keys as a fatal error instead of a warning
    pub strict_map_keys: bool,

    /// Qualified names mapped straight to primitive schemas
    pub custom_mappings: IndexMap<String, PrimitiveSchema>,

    /// Prefix for schemas synthesized for unclassifiable types
    pub unknown_prefix: String,

    /// Nesting depth after which a type is left unresolved
    pub max_depth: usize,

    /// Component export settings
    pub export: ExportConfig,
}

/// Output settings for rendering `components/schemas`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Prefix put in front of schema names in `$ref` values
    pub reference_prefix: String,

    /// Pretty print JSON output
    pub pretty_print: bool,

    /// Default output format
    pub format: ExportFormat,
}

/// Available export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            required_by_default: true,
            strict_map_keys: false,
            custom_mappings: IndexMap::new(),
            unknown_prefix: "Unknown_".to_string(),
            max_depth: 64,
            export: ExportConfig::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            reference_prefix: "#/components/schemas/".to_string(),
            pretty_print: true,
            format: ExportFormat::Json,
        }
    }
}

impl ResolverConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML; missing keys keep their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Set the "non-nullable means required" rule
    pub fn with_required_by_default(mut self, required: bool) -> Self {
        self.required_by_default = required;
        self
    }

    /// Fail the pass on non-string map keys
    pub fn with_strict_map_keys(mut self, strict: bool) -> Self {
        self.strict_map_keys = strict;
        self
    }

    /// Add custom type mapping
    pub fn with_custom_mapping(mut self, qualified_name: &str, schema: PrimitiveSchema) -> Self {
        self.custom_mappings
            .insert(qualified_name.to_string(), schema);
        self
    }

    pub fn with_unknown_prefix(mut self, prefix: &str) -> Self {
        self.unknown_prefix = prefix.to_string();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_reference_prefix(mut self, prefix: &str) -> Self {
        self.export.reference_prefix = prefix.to_string();
        self
    }

    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }
}
