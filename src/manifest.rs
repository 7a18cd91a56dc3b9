//! Reads the current package version from `package.json` or `Cargo.toml`.

use crate::error::{BumpError, Result};
use crate::git::ManifestSource;
use std::fs;
use std::path::{Path, PathBuf};

/// Supported manifest formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
}

/// Package facts the publishing presets check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub version: Option<String>,
    pub private: bool,
    pub has_build_script: bool,
    pub has_prepublish_only_script: bool,
}

/// Package manifest on disk
#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: PathBuf,
    kind: ManifestKind,
}

impl ManifestFile {
    /// Manifest at an explicit path; the format follows the file name
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let kind = match path.file_name().and_then(|n| n.to_str()) {
            Some("package.json") => ManifestKind::PackageJson,
            Some("Cargo.toml") => ManifestKind::CargoToml,
            _ => {
                return Err(BumpError::manifest(format!(
                    "Unsupported manifest file: {}",
                    path.display()
                )))
            }
        };
        Ok(ManifestFile { path, kind })
    }

    /// Find `package.json` or `Cargo.toml` (in that order) in `dir`
    pub fn discover(dir: &Path) -> Option<Self> {
        ["package.json", "Cargo.toml"]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.exists())
            .and_then(|candidate| ManifestFile::new(candidate).ok())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Package name declared by the manifest
    pub fn read_package_name(&self) -> Result<Option<String>> {
        self.read_field("name")
    }

    /// Name, version, visibility and build scripts of the package
    pub fn read_package_info(&self) -> Result<PackageInfo> {
        let content = fs::read_to_string(&self.path)?;
        match self.kind {
            ManifestKind::PackageJson => package_json_info(&content),
            ManifestKind::CargoToml => Ok(PackageInfo {
                name: cargo_toml_field(&content, "name")?,
                version: cargo_toml_field(&content, "version")?,
                ..PackageInfo::default()
            }),
        }
    }

    fn read_field(&self, field: &str) -> Result<Option<String>> {
        let content = fs::read_to_string(&self.path)?;
        match self.kind {
            ManifestKind::PackageJson => package_json_field(&content, field),
            ManifestKind::CargoToml => cargo_toml_field(&content, field),
        }
    }
}

impl ManifestSource for ManifestFile {
    fn read_current_version(&self) -> Result<Option<String>> {
        self.read_field("version")
    }
}

fn parse_package_json(content: &str) -> Result<serde_json::Value> {
    serde_json::from_str(content)
        .map_err(|e| BumpError::manifest(format!("Invalid package.json: {}", e)))
}

fn package_json_field(content: &str, field: &str) -> Result<Option<String>> {
    let value = parse_package_json(content)?;

    Ok(value
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string))
}

fn package_json_info(content: &str) -> Result<PackageInfo> {
    let value = parse_package_json(content)?;
    let string = |field: &str| value.get(field).and_then(|v| v.as_str()).map(str::to_string);
    let has_script = |script: &str| {
        value
            .get("scripts")
            .and_then(|scripts| scripts.get(script))
            .is_some_and(|v| v.as_str().is_some_and(|s| !s.is_empty()))
    };

    Ok(PackageInfo {
        name: string("name"),
        version: string("version"),
        private: value.get("private").and_then(|v| v.as_bool()).unwrap_or(false),
        has_build_script: has_script("build"),
        has_prepublish_only_script: has_script("prepublishOnly"),
    })
}

fn cargo_toml_field(content: &str, field: &str) -> Result<Option<String>> {
    let value: toml::Value = toml::from_str(content)
        .map_err(|e| BumpError::manifest(format!("Invalid Cargo.toml: {}", e)))?;

    let from_package = value
        .get("package")
        .and_then(|package| package.get(field))
        .and_then(|v| v.as_str());
    let from_workspace = || {
        value
            .get("workspace")
            .and_then(|workspace| workspace.get("package"))
            .and_then(|package| package.get(field))
            .and_then(|v| v.as_str())
    };

    Ok(from_package.or_else(from_workspace).map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_json_version() {
        let json = r#"{ "name": "pkg", "version": "1.2.3" }"#;
        assert_eq!(
            package_json_field(json, "version").unwrap().as_deref(),
            Some("1.2.3")
        );
    }

    #[test]
    fn test_private_package_without_version() {
        assert_eq!(
            package_json_field(r#"{ "private": true }"#, "version").unwrap(),
            None
        );
    }

    #[test]
    fn test_invalid_package_json() {
        assert!(package_json_field("{ nope", "version").is_err());
    }

    #[test]
    fn test_package_json_info() {
        let json = r#"{
            "name": "vscode-ext",
            "version": "0.2.0",
            "private": true,
            "scripts": { "build": "tsc", "prepublishOnly": "" }
        }"#;
        let info = package_json_info(json).unwrap();
        assert_eq!(info.name.as_deref(), Some("vscode-ext"));
        assert_eq!(info.version.as_deref(), Some("0.2.0"));
        assert!(info.private);
        assert!(info.has_build_script);
        assert!(!info.has_prepublish_only_script);
    }

    #[test]
    fn test_cargo_toml_version() {
        let toml = "[package]\nname = \"crate\"\nversion = \"0.0.0\"\n";
        assert_eq!(
            cargo_toml_field(toml, "version").unwrap().as_deref(),
            Some("0.0.0")
        );
    }

    #[test]
    fn test_cargo_toml_workspace_version() {
        let toml = "[workspace.package]\nversion = \"0.4.1\"\n";
        assert_eq!(
            cargo_toml_field(toml, "version").unwrap().as_deref(),
            Some("0.4.1")
        );
    }

    #[test]
    fn test_unsupported_manifest_name() {
        assert!(ManifestFile::new("setup.py").is_err());
        assert_eq!(
            ManifestFile::new("some/dir/Cargo.toml").unwrap().kind,
            ManifestKind::CargoToml
        );
    }
}
