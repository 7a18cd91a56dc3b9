use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use git_bump::changelog::{render_changelog, ChangelogMetadata};
use git_bump::config::{self, Config, RepositoryConfig};
use git_bump::git::Git2Source;
use git_bump::manifest::{ManifestFile, PackageInfo};
use git_bump::preset::{Preset, PresetContext};
use git_bump::resolver::{resolve_next_version, ResolveOptions};
use git_bump::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    about = "Resolve the next version and release notes from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = "v", help = "Prefix of release tags")]
    tag_prefix: String,

    #[arg(long, help = "Additional tag prefix accepted in pre-release mode")]
    fallback_prefix: Option<String>,

    #[arg(long, help = "Bump patch without analyzing commits")]
    auto_update: bool,

    #[arg(short, long, help = "Branch or revision to analyze instead of HEAD")]
    branch: Option<String>,

    #[arg(long, help = "Publishing preset (overrides the config file)")]
    preset: Option<String>,

    #[arg(long, help = "Package name written into the release notes metadata")]
    package_name: Option<String>,

    #[arg(long, help = "Skip build and test scripts of the publishing pipeline")]
    skip_scripts: bool,

    #[arg(short, long, help = "Write release notes to this file")]
    output: Option<PathBuf>,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("git-bump {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "git_bump=debug" } else { "git_bump=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    if let Some(preset) = args.preset {
        config.preset = Some(preset);
    }
    if args.skip_scripts {
        config.behavior.skip_scripts = true;
    }

    let source = Git2Source::open(".").context("Git repository error")?;
    if config.repository.is_none() {
        config.repository = source
            .origin_owner_repo()
            .map(|(owner, repo)| RepositoryConfig { owner, repo });
    }

    let manifest = ManifestFile::discover(Path::new("."));
    match &manifest {
        Some(file) => info!(path = %file.path().display(), "Using manifest"),
        None => info!("No package manifest found"),
    }

    let options = ResolveOptions {
        tag_prefix: args.tag_prefix,
        fallback_prefix: args.fallback_prefix,
        auto_update: args.auto_update,
        git_ref: args.branch,
    };

    ui::display_status("Analyzing commits since the latest release tag...");
    let result = resolve_next_version(&source, &manifest, &config, &options)?;
    ui::display_version_decision(&result);

    let metadata = ChangelogMetadata {
        bump_type: result.bump_type,
        package_name: package_name(&config, args.package_name, manifest.as_ref())?,
    };
    let changelog = render_changelog(&result.commits_by_rule, &metadata, &config.changelog);
    ui::display_changelog(&changelog);

    if let Some(path) = &args.output {
        ui::write_changelog(path, &changelog)?;
        ui::display_success(&format!("Release notes written to {}", path.display()));
    }

    if config.behavior.skip_scripts {
        warn!("Build and test scripts are skipped for this release");
    }

    if let Some(preset) = config.preset()? {
        let actions = preset.actions();
        let changes = actions.before_shared_actions(&config)?;
        if changes.no_publish {
            info!(preset = %preset, "Preset requested to skip publishing");
        }
        if result.next_version.is_none() {
            warn!("No next version, nothing will be published");
        }

        let package = match &manifest {
            Some(file) => file.read_package_info()?,
            None => PackageInfo::default(),
        };
        let context = PresetContext {
            package: &package,
            next_version: result.next_version.as_deref(),
            publish_tag: &config.behavior.publish_tag,
            skip_scripts: config.behavior.skip_scripts,
            do_publish: !changes.no_publish && result.next_version.is_some(),
        };
        let steps = actions
            .main(&context)
            .with_context(|| format!("Preset {} failed", preset))?;
        ui::display_publish_plan(preset, &steps);
    }

    Ok(())
}

/// Package name for the changelog metadata: explicit flag, else the manifest
/// name for npm-flavored presets
fn package_name(
    config: &Config,
    explicit: Option<String>,
    manifest: Option<&ManifestFile>,
) -> Result<Option<String>> {
    if explicit.is_some() {
        return Ok(explicit);
    }

    let npm_flavored = config.preset()?.is_some_and(Preset::is_npm_flavored);
    match manifest {
        Some(file) if npm_flavored => Ok(file.read_package_name()?),
        _ => Ok(None),
    }
}
