//! Publishing presets.
//!
//! Each preset exposes two hooks through [`PresetActions`]: an optional
//! `before_shared_actions` that may opt out of publishing, and `main`, which
//! checks the package and returns the steps the release would run. Steps are
//! reported, never executed.

use crate::config::Config;
use crate::error::{BumpError, Result};
use crate::manifest::PackageInfo;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Package file produced by the vscode presets
const VSIX_PATH: &str = "output.vsix";

/// Publishing presets known to the release pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Npm,
    Node,
    PnpmMonorepo,
    VscodeExtension,
    /// Packages the extension and attaches the `.vsix` to the release instead of publishing it
    VscodeExtensionVsix,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Npm,
        Preset::Node,
        Preset::PnpmMonorepo,
        Preset::VscodeExtension,
        Preset::VscodeExtensionVsix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Npm => "npm",
            Preset::Node => "node",
            Preset::PnpmMonorepo => "pnpm-monorepo",
            Preset::VscodeExtension => "vscode-extension",
            Preset::VscodeExtensionVsix => "vscode-extension-vsix",
        }
    }

    /// Whether changelog metadata carries the npm package name
    pub fn is_npm_flavored(self) -> bool {
        matches!(self, Preset::Npm)
    }

    /// The hooks implementing this preset
    pub fn actions(self) -> &'static dyn PresetActions {
        match self {
            Preset::Npm => &NpmPreset,
            Preset::Node => &NodePreset,
            Preset::PnpmMonorepo => &PnpmMonorepoPreset,
            Preset::VscodeExtension => &VscodeExtensionPreset,
            Preset::VscodeExtensionVsix => &VscodeExtensionVsixPreset,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                BumpError::config(format!(
                    "Unsupported preset '{}' (expected one of: {})",
                    s,
                    known.join(", ")
                ))
            })
    }
}

/// Adjustments a preset requests before the shared release actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetChanges {
    pub no_publish: bool,
}

/// What a preset's `main` hook sees of the release
#[derive(Debug, Clone)]
pub struct PresetContext<'a> {
    pub package: &'a PackageInfo,
    /// `None` when nothing is released
    pub next_version: Option<&'a str>,
    pub publish_tag: &'a str,
    pub skip_scripts: bool,
    pub do_publish: bool,
}

/// One step of a publishing plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishStep {
    Run { program: String, args: Vec<String> },
    AttachAsset { name: String, path: PathBuf },
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishStep::Run { program, args } if args.is_empty() => f.write_str(program),
            PublishStep::Run { program, args } => write!(f, "{} {}", program, args.join(" ")),
            PublishStep::AttachAsset { name, path } => {
                write!(f, "attach {} as {}", path.display(), name)
            }
        }
    }
}

fn run(program: &str, args: &str) -> PublishStep {
    PublishStep::Run {
        program: program.to_string(),
        args: args.split_whitespace().map(str::to_string).collect(),
    }
}

/// Hooks every preset provides
pub trait PresetActions {
    /// Runs before the shared release actions; may turn publishing off
    fn before_shared_actions(&self, _config: &Config) -> Result<PresetChanges> {
        Ok(PresetChanges::default())
    }

    /// Validate the package and plan the publishing steps
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>>;
}

struct NpmPreset;

impl PresetActions for NpmPreset {
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>> {
        if ctx.package.private {
            return Err(BumpError::manifest(
                "Packages that are going to publish to npm can't be private",
            ));
        }
        if !ctx.do_publish {
            return Ok(Vec::new());
        }
        Ok(vec![run(
            "pnpm",
            "publish --access public --no-git-checks --ignore-scripts",
        )])
    }
}

/// Builds only; the surrounding workflow ships the result
struct NodePreset;

impl PresetActions for NodePreset {
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>> {
        if !ctx.package.has_build_script {
            return Err(BumpError::manifest("Node packages must have a build script"));
        }
        if ctx.package.has_prepublish_only_script {
            return Err(BumpError::manifest(
                "Node packages can't have a prepublishOnly script, use build instead",
            ));
        }
        if ctx.skip_scripts {
            return Ok(Vec::new());
        }
        Ok(vec![run("pnpm", "run build")])
    }
}

struct PnpmMonorepoPreset;

impl PresetActions for PnpmMonorepoPreset {
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>> {
        if !ctx.do_publish {
            return Ok(Vec::new());
        }
        let mut step = run("pnpm", "publish --access public -r --no-git-checks --tag");
        if let PublishStep::Run { args, .. } = &mut step {
            args.push(ctx.publish_tag.to_string());
        }
        Ok(vec![step])
    }
}

// shared by both vscode presets
fn package_vsix(ctx: &PresetContext<'_>) -> Vec<PublishStep> {
    let mut steps = vec![run("npm", "i -g vsce ovsx")];
    if ctx.package.has_build_script && !ctx.skip_scripts {
        steps.push(run("pnpm", "run build"));
    }
    steps.push(run("vsce", &format!("package --out {}", VSIX_PATH)));
    steps
}

struct VscodeExtensionPreset;

impl PresetActions for VscodeExtensionPreset {
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>> {
        let mut steps = package_vsix(ctx);
        if ctx.do_publish {
            steps.push(run("vsce", &format!("publish --packagePath {}", VSIX_PATH)));
            steps.push(run("ovsx", &format!("publish {}", VSIX_PATH)));
        }
        Ok(steps)
    }
}

struct VscodeExtensionVsixPreset;

impl PresetActions for VscodeExtensionVsixPreset {
    fn main(&self, ctx: &PresetContext<'_>) -> Result<Vec<PublishStep>> {
        let mut steps = package_vsix(ctx);
        if !ctx.do_publish {
            return Ok(steps);
        }

        let name = ctx
            .package
            .name
            .as_deref()
            .ok_or_else(|| BumpError::manifest("Extension manifest has no name"))?;
        let version = ctx
            .next_version
            .or(ctx.package.version.as_deref())
            .ok_or_else(|| BumpError::manifest("Extension manifest has no version"))?;

        steps.push(PublishStep::AttachAsset {
            name: format!("{}-{}.vsix", name, version),
            path: PathBuf::from(VSIX_PATH),
        });
        Ok(steps)
    }
}
