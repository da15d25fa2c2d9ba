use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show` output.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    // Loaded files
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }
    writeln!(w)?;

    // Resolved settings
    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }

    Ok(())
}

/// Render `config explain <section>` output.
pub fn render_explain<W: Write>(
    w: &mut W,
    config: &ResolvedConfig,
    section: &str,
) -> std::io::Result<()> {
    let prefix = format!("{section}.");
    let entries: Vec<_> = config.provenance.entries_with_prefix(&prefix);

    if entries.is_empty() {
        writeln!(w, "Unknown config section: {}", section)?;
        writeln!(w, "Available sections: defaults, targeting, questions")?;
        return Ok(());
    }

    writeln!(w, "Section: {}", section)?;
    writeln!(w)?;

    for (key, source) in &entries {
        let value = get_value_for_key(config, key);
        writeln!(w, "  {}: {} <- {}", key, value, source)?;
    }

    Ok(())
}

fn get_value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.lang" => config.lang.map_or("(all)".to_string(), |l| l.to_string()),
        "defaults.format" => config.format.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "defaults.strict" => config.strict.to_string(),
        "targeting.include" => format!("{:?}", config.include),
        "targeting.exclude" => format!("{:?}", config.exclude),
        "questions.count" => config.count.to_string(),
        "questions.seed" => config
            .seed
            .map_or("(entropy)".to_string(), |s| s.to_string()),
        _ => "(unknown)".to_string(),
    }
}
