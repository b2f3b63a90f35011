use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Remote webshell scanner
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Probe a web server for known webshell files",
    long_about = "Probes a target for known webshell files.\n\
                  Every webshell name is tried at the web root and under every\n\
                  directory from the directory list. Features:\n\
                  - URL validation before any request is sent\n\
                  - cache bypass on every request\n\
                  - redirects are never followed\n\
                  - random delay between requests\n\
                  Found URLs are printed to stdout, one per line."
)]
pub struct Args {
    /// Webshell file name list, one per line
    #[arg(short, long)]
    pub webshells: PathBuf,

    /// Directory list, one per line
    #[arg(short, long)]
    pub directories: PathBuf,

    /// User agent list, one per line; one is picked per run
    #[arg(short, long)]
    pub agents: PathBuf,

    /// Target base URL (e.g. http://www.example.com)
    #[arg(short, long)]
    pub url: String,

    /// Proxy server (e.g. socks5://127.0.0.1:1080)
    #[arg(short, long)]
    pub proxy: Option<String>,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long, default_value = "false")]
    pub insecure: bool,

    /// Stop after this many seconds, even if candidates remain
    #[arg(long = "max-runtime", value_name = "SECS")]
    pub max_runtime: Option<u64>,

    /// Log every probe to stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors; no banner or summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn max_runtime(&self) -> Option<Duration> {
        self.max_runtime.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::try_parse_from([
            "shellprobe", "-w", "shells.txt", "-d", "dirs.txt", "-a", "agents.txt", "-u",
            "http://example.com",
        ])
        .unwrap();
        assert_eq!(args.webshells, PathBuf::from("shells.txt"));
        assert_eq!(args.directories, PathBuf::from("dirs.txt"));
        assert_eq!(args.agents, PathBuf::from("agents.txt"));
        assert_eq!(args.url, "http://example.com");
        assert!(!args.insecure);
        assert_eq!(args.max_runtime(), None);
    }

    #[test]
    fn all_lists_and_url_required() {
        let res = Args::try_parse_from([
            "shellprobe", "--webshells", "s.txt", "--directories", "d.txt", "--agents", "a.txt",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let res = Args::try_parse_from([
            "shellprobe", "-w", "s", "-d", "d", "-a", "a", "-u", "http://x.y", "-v", "-q",
        ]);
        assert!(res.is_err());
    }
}
