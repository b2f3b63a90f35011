//! Newline-delimited word lists: agents, webshell names, directories.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::ConfigLoadError;

/// Reads one entry per line, trimmed, in file order.
///
/// Blank lines are dropped rather than kept as empty entries, so a stray
/// empty line never turns into a probe of the bare base URL or a bare
/// directory (`base/?q=`, `base/dir/?q=`).
pub fn load(path: impl AsRef<Path>) -> Result<Vec<String>, ConfigLoadError> {
    let path = path.as_ref();
    let io_err = |source| ConfigLoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let reader = io::BufReader::new(file);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_err)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        entries.push(line.to_string());
    }
    Ok(entries)
}

/// Like [`load`], but an empty result is an error.
pub fn load_non_empty(path: impl AsRef<Path>) -> Result<Vec<String>, ConfigLoadError> {
    let entries = load(path.as_ref())?;
    if entries.is_empty() {
        return Err(ConfigLoadError::Empty {
            path: path.as_ref().to_path_buf(),
        });
    }
    Ok(entries)
}

/// Picks the single agent string used for a whole run.
pub fn choose_agent<'a, R: Rng + ?Sized>(agents: &'a [String], rng: &mut R) -> Option<&'a str> {
    agents.choose(rng).map(|s| s.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn temp_list(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "shellprobe-{}-{}.txt",
            name,
            std::process::id()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_trimmed_lines_in_order() {
        let path = temp_list("order", "shell.php\n  cmd.asp \n\nc99.php\r\n");
        let entries = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(entries, vec!["shell.php", "cmd.asp", "c99.php"]);
    }

    #[test]
    fn blank_lines_never_become_entries() {
        let path = temp_list("blank", "\nshell.php\n\n \t\ncmd.php\n\n");
        let entries = load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(entries.iter().all(|e| !e.is_empty()));
        assert_eq!(entries, vec!["shell.php", "cmd.php"]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load("/nonexistent/shellprobe/agents.txt").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/shellprobe/agents.txt"));
    }

    #[test]
    fn empty_list_rejected_when_required() {
        let path = temp_list("empty", "\n   \n");
        let err = load_non_empty(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigLoadError::Empty { .. }));
    }

    #[test]
    fn agent_choice_comes_from_list() {
        let agents = vec!["curl/8.0".to_string(), "Mozilla/5.0".to_string()];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let agent = choose_agent(&agents, &mut rng).unwrap();
            assert!(agents.iter().any(|a| a == agent));
        }
        assert!(choose_agent(&[], &mut rng).is_none());
    }
}
