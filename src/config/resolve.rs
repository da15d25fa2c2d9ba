use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{InquestError, Result};
use crate::output::OutputFormat;
use crate::walk::Language;
use std::path::{Path, PathBuf};

/// Default number of questions per run.
pub const DEFAULT_QUESTION_COUNT: usize = 10;

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub lang: Option<Language>,
    pub format: Option<OutputFormat>,
    pub quiet: bool,
    pub strict: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub count: Option<usize>,
    pub seed: Option<u64>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/inquest/config.toml)
/// 3. Project config (nearest .inquest.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    let mut prov = ProvenanceMap::new();
    let mut loaded_files = Vec::new();

    // 1. Start with built-in defaults
    let mut config = ResolvedConfig {
        lang: None,
        format: OutputFormat::Json,
        quiet: false,
        strict: false,
        include: Vec::new(),
        exclude: Vec::new(),
        ignore_patterns: Vec::new(),
        count: DEFAULT_QUESTION_COUNT,
        seed: None,
        provenance: ProvenanceMap::new(),
        loaded_files: Vec::new(),
    };

    set_all_default_provenance(&mut prov);

    // 2. User config
    if let Some(user_config_path) = find_user_config() {
        if user_config_path.exists() {
            let content = std::fs::read_to_string(&user_config_path).map_err(|_| {
                InquestError::Config(format!(
                    "Could not read user config: {}",
                    user_config_path.display()
                ))
            })?;
            let file_config = FileConfig::from_toml(&content)
                .map_err(|e| InquestError::Config(format!("Invalid user config: {e}")))?;
            apply_file_config(
                &mut config,
                &file_config,
                Source::UserConfig(user_config_path.clone()),
                &mut prov,
            );
            loaded_files.push(user_config_path);
        }
    }

    // 3. Project config (walk up from working_dir)
    if let Some(project_config_path) = find_project_config(working_dir) {
        let content = std::fs::read_to_string(&project_config_path).map_err(|_| {
            InquestError::Config(format!(
                "Could not read project config: {}",
                project_config_path.display()
            ))
        })?;
        let file_config = FileConfig::from_toml(&content)
            .map_err(|e| InquestError::Config(format!("Invalid project config: {e}")))?;
        apply_file_config(
            &mut config,
            &file_config,
            Source::ProjectConfig(project_config_path.clone()),
            &mut prov,
        );
        loaded_files.push(project_config_path);
    }

    // 4. Environment variables
    apply_env_vars(&mut config, &mut prov);

    // 5. CLI overrides
    apply_cli_overrides(&mut config, cli, &mut prov);

    // Load .inquestignore
    config.ignore_patterns = crate::config::ignore::load_inquestignore(working_dir);

    config.provenance = prov;
    config.loaded_files = loaded_files;

    Ok(config)
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("inquest").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(".inquest.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn set_all_default_provenance(prov: &mut ProvenanceMap) {
    let defaults = [
        "defaults.lang",
        "defaults.format",
        "defaults.quiet",
        "defaults.strict",
        "targeting.include",
        "targeting.exclude",
        "questions.count",
        "questions.seed",
    ];
    for key in defaults {
        prov.set(key, Source::Default);
    }
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) {
    // Defaults
    if let Some(ref lang) = file.defaults.lang {
        if let Ok(l) = lang.parse::<Language>() {
            config.lang = Some(l);
            prov.set("defaults.lang", source.clone());
        }
    }
    if let Some(ref format) = file.defaults.format {
        if let Ok(f) = format.parse::<OutputFormat>() {
            config.format = f;
            prov.set("defaults.format", source.clone());
        }
    }
    if let Some(quiet) = file.defaults.quiet {
        config.quiet = quiet;
        prov.set("defaults.quiet", source.clone());
    }
    if let Some(strict) = file.defaults.strict {
        config.strict = strict;
        prov.set("defaults.strict", source.clone());
    }

    // Targeting
    if !file.targeting.include.is_empty() {
        config.include = file.targeting.include.clone();
        prov.set("targeting.include", source.clone());
    }
    if !file.targeting.exclude.is_empty() {
        config.exclude = file.targeting.exclude.clone();
        prov.set("targeting.exclude", source.clone());
    }

    // Questions
    if let Some(count) = file.questions.count {
        config.count = count;
        prov.set("questions.count", source.clone());
    }
    if let Some(seed) = file.questions.seed {
        config.seed = Some(seed);
        prov.set("questions.seed", source.clone());
    }
}

fn apply_env_vars(config: &mut ResolvedConfig, prov: &mut ProvenanceMap) {
    if let Ok(val) = std::env::var("INQUEST_FORMAT") {
        if let Ok(f) = val.parse::<OutputFormat>() {
            config.format = f;
            prov.set("defaults.format", Source::EnvVar("INQUEST_FORMAT".into()));
        }
    }
    if let Ok(val) = std::env::var("INQUEST_LANG") {
        if let Ok(l) = val.parse::<Language>() {
            config.lang = Some(l);
            prov.set("defaults.lang", Source::EnvVar("INQUEST_LANG".into()));
        }
    }
    if let Ok(val) = std::env::var("INQUEST_QUIET") {
        config.quiet = val == "1" || val.eq_ignore_ascii_case("true");
        prov.set("defaults.quiet", Source::EnvVar("INQUEST_QUIET".into()));
    }
    if let Ok(val) = std::env::var("INQUEST_STRICT") {
        config.strict = val == "1" || val.eq_ignore_ascii_case("true");
        prov.set("defaults.strict", Source::EnvVar("INQUEST_STRICT".into()));
    }
    if let Ok(val) = std::env::var("INQUEST_INCLUDE") {
        config.include = val.split(',').map(|s| s.trim().to_string()).collect();
        prov.set("targeting.include", Source::EnvVar("INQUEST_INCLUDE".into()));
    }
    if let Ok(val) = std::env::var("INQUEST_EXCLUDE") {
        config.exclude = val.split(',').map(|s| s.trim().to_string()).collect();
        prov.set("targeting.exclude", Source::EnvVar("INQUEST_EXCLUDE".into()));
    }
    if let Ok(val) = std::env::var("INQUEST_COUNT") {
        if let Ok(n) = val.parse::<usize>() {
            config.count = n;
            prov.set("questions.count", Source::EnvVar("INQUEST_COUNT".into()));
        }
    }
    if let Ok(val) = std::env::var("INQUEST_SEED") {
        if let Ok(n) = val.parse::<u64>() {
            config.seed = Some(n);
            prov.set("questions.seed", Source::EnvVar("INQUEST_SEED".into()));
        }
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if let Some(lang) = cli.lang {
        config.lang = Some(lang);
        prov.set("defaults.lang", Source::CliFlag("--lang".into()));
    }
    if let Some(format) = cli.format {
        config.format = format;
        prov.set("defaults.format", Source::CliFlag("--format".into()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("defaults.quiet", Source::CliFlag("--quiet".into()));
    }
    if cli.strict {
        config.strict = true;
        prov.set("defaults.strict", Source::CliFlag("--strict".into()));
    }
    if !cli.include.is_empty() {
        config.include = cli.include.clone();
        prov.set("targeting.include", Source::CliFlag("--include".into()));
    }
    if !cli.exclude.is_empty() {
        config.exclude = cli.exclude.clone();
        prov.set("targeting.exclude", Source::CliFlag("--exclude".into()));
    }
    if let Some(count) = cli.count {
        config.count = count;
        prov.set("questions.count", Source::CliFlag("--count".into()));
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
        prov.set("questions.seed", Source::CliFlag("--seed".into()));
    }
}
