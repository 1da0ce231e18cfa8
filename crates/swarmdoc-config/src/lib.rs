//! Configuration management for swarmdoc.
//!
//! Parses `swarmdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `links.readme_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override corpus root directory.
    pub root: Option<PathBuf>,
    /// Override published corpus directory.
    pub output_dir: Option<PathBuf>,
    /// Override declarative mapping file.
    pub mapping: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "swarmdoc.toml";

/// Default location of the declarative mapping, relative to the corpus root.
const DEFAULT_MAPPING: &str = "site/scripts/docs-mapping.json";

/// Link target for the repository README, which is not part of the site.
const DEFAULT_README_URL: &str =
    "https://github.com/zircote/claude-team-orchestration/blob/main/README.md";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Corpus configuration (paths are relative strings from TOML).
    project: ProjectConfigRaw,
    /// Site output configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Skill descriptor discovery.
    pub skills: SkillsConfig,
    /// The single workflow example published alongside the skills.
    pub workflow_example: WorkflowExampleConfig,
    /// Links to documents that are not generated.
    pub links: LinksConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw project configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    root: Option<String>,
}

/// Raw site configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    output_dir: Option<String>,
    mapping: Option<String>,
}

/// Resolved paths with absolute locations.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Corpus root. Source identifiers are relative to it.
    pub root: PathBuf,
    /// Declarative mapping file.
    pub mapping: PathBuf,
    /// Published corpus directory.
    ///
    /// `None` means "use `outputDir` from the mapping file".
    pub output_dir: Option<PathBuf>,
}

impl PathsConfig {
    /// Site root implied by the mapping location (`<site>/scripts/<mapping>`).
    #[must_use]
    pub fn site_root(&self) -> PathBuf {
        self.mapping
            .parent()
            .and_then(Path::parent)
            .map_or_else(|| self.root.clone(), Path::to_path_buf)
    }

    /// Published corpus directory, falling back to the mapping's `outputDir`.
    #[must_use]
    pub fn published_dir(&self, mapping_output_dir: &str) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.site_root().join(mapping_output_dir))
    }
}

/// Skill descriptor discovery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    /// Directory holding one subdirectory per skill, relative to the root.
    pub dir: String,
    /// Descriptor filename inside each skill directory.
    pub descriptor: String,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            dir: "skills".to_owned(),
            descriptor: "SKILL.md".to_owned(),
        }
    }
}

/// Workflow example configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WorkflowExampleConfig {
    /// Source identifier, relative to the root.
    pub source: String,
    /// Output slug under `skills/`.
    pub slug: String,
    /// Title used when the document has no level-1 heading.
    pub title: String,
    /// Fixed page description.
    pub description: String,
}

impl Default for WorkflowExampleConfig {
    fn default() -> Self {
        Self {
            source: "skills/orchestration-patterns/examples/complete-workflows.md".to_owned(),
            slug: "complete-workflows".to_owned(),
            title: "Complete Workflows".to_owned(),
            description: "End-to-end orchestration workflow examples.".to_owned(),
        }
    }
}

/// External link configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    /// Identifier of the README, which is linked but never generated.
    pub readme: String,
    /// Absolute URL the README links resolve to.
    pub readme_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            readme: "README.md".to_owned(),
            readme_url: DEFAULT_README_URL.to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`links.readme_url`").
        field: String,
        /// Error message (e.g., "${`README_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `swarmdoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.paths.root.clone_from(root);
        }
        if let Some(mapping) = &settings.mapping {
            self.paths.mapping.clone_from(mapping);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.paths.output_dir = Some(output_dir.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            project: ProjectConfigRaw::default(),
            site: SiteConfigRaw::default(),
            skills: SkillsConfig::default(),
            workflow_example: WorkflowExampleConfig::default(),
            links: LinksConfig::default(),
            paths: PathsConfig {
                root: base.to_path_buf(),
                mapping: base.join(DEFAULT_MAPPING),
                output_dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.skills.dir, "skills.dir")?;
        require_non_empty(&self.skills.descriptor, "skills.descriptor")?;
        if self.skills.descriptor.contains('/') {
            return Err(ConfigError::Validation(
                "skills.descriptor must be a bare filename".to_owned(),
            ));
        }
        require_non_empty(&self.workflow_example.source, "workflow_example.source")?;
        require_non_empty(&self.workflow_example.slug, "workflow_example.slug")?;
        require_non_empty(&self.links.readme, "links.readme")?;
        require_http_url(&self.links.readme_url, "links.readme_url")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.links.readme_url = expand::expand_env(&self.links.readme_url, "links.readme_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root = match self.project.root.as_deref() {
            Some(root) => config_dir.join(root),
            None => config_dir.to_path_buf(),
        };

        self.paths = PathsConfig {
            mapping: config_dir.join(self.site.mapping.as_deref().unwrap_or(DEFAULT_MAPPING)),
            output_dir: self.site.output_dir.as_deref().map(|d| config_dir.join(d)),
            root,
        };
    }
}
