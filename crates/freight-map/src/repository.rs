//! Template store for reusing column mappings across uploads.
//!
//! Customers tend to send the same spreadsheet layout every week. A mapping
//! corrected once can be saved under a name and replayed on the next upload.
//!
//! # Storage Format
//!
//! Each template is a JSON file named `{name}.json` inside the store
//! directory, with the name reduced to `[a-z0-9_]`. Two names reducing to
//! the same file cannot both be stored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freight_model::ColumnMapping;

/// A saved mapping plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingTemplate {
    pub name: String,
    pub mapping: ColumnMapping,
    pub saved_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl MappingTemplate {
    pub fn new(name: impl Into<String>, mapping: ColumnMapping) -> Self {
        Self {
            name: name.into(),
            mapping,
            saved_at: Some(Utc::now()),
            description: None,
            version: default_version(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Directory-backed template storage.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    base_dir: PathBuf,
}

impl TemplateStore {
    /// Opens a store, creating the directory if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!("Failed to create template store: {}", base_dir.display())
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the template, replacing an earlier save under the same name.
    ///
    /// Names are matched ignoring case and surrounding whitespace. A
    /// different name that reduces to the same file is refused rather than
    /// overwriting the other template.
    pub fn save(&self, template: &MappingTemplate) -> Result<PathBuf> {
        let path = self.path_for(&template.name)?;
        if let Some(existing) = read_template(&path)?
            && !same_name(&existing.name, &template.name)
        {
            bail!(
                "Template name '{}' collides with saved template '{}' at {}",
                template.name,
                existing.name,
                path.display()
            );
        }
        let json = serde_json::to_string_pretty(template)
            .with_context(|| format!("Failed to serialize template {}", template.name))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write template to {}", path.display()))?;
        Ok(path)
    }

    /// Loads a template by name. Returns `None` if no template of that name
    /// was saved.
    pub fn load(&self, name: &str) -> Result<Option<MappingTemplate>> {
        let path = self.path_for(name)?;
        Ok(read_template(&path)?.filter(|template| same_name(&template.name, name)))
    }

    /// Names of all readable templates, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read store: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            if let Ok(template) = serde_json::from_str::<MappingTemplate>(&contents) {
                names.push(template.name);
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<bool> {
        if self.load(name)?.is_none() {
            return Ok(false);
        }
        let path = self.path_for(name)?;
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete template: {}", path.display()))?;
        Ok(true)
    }

    pub fn exists(&self, name: &str) -> bool {
        matches!(self.load(name), Ok(Some(_)))
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let stem = file_stem(name);
        if !stem.chars().any(|c| c.is_ascii_alphanumeric()) {
            bail!("Template name '{name}' needs at least one letter or digit");
        }
        Ok(self.base_dir.join(format!("{stem}.json")))
    }
}

fn read_template(path: &Path) -> Result<Option<MappingTemplate>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template from {}", path.display()))?;
    let template = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse template from {}", path.display()))?;
    Ok(Some(template))
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn file_stem(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
