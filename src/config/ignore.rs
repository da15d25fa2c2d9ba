use std::path::Path;

/// Load `.inquestignore` by walking up from the given directory.
/// Parses gitignore-style patterns (skip blank lines and # comments).
pub fn load_inquestignore(start: &Path) -> Vec<String> {
    let mut dir = start.to_path_buf();
    loop {
        let ignore_path = dir.join(".inquestignore");
        if ignore_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&ignore_path) {
                return parse_ignore_patterns(&content);
            }
        }
        if !dir.pop() {
            break;
        }
    }
    Vec::new()
}

fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.to_string())
        .collect()
}
