//! Candidate URL generation: every webshell name on its own, then under
//! each directory, each with a fresh cache-busting token.

use rand::Rng;

use crate::target::Target;

/// Query parameter carrying the cache-busting token.
pub const CACHE_BUST_PARAM: &str = "q";

/// One probe target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub token: String,
}

/// 128 random bits rendered as 32 lowercase hex digits.
pub fn cache_bust_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:032x}", rng.gen::<u128>())
}

/// Percent-encodes a path, leaving `/` and unreserved characters intact.
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|piece| urlencoding::encode(piece).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Number of candidates [`generate`] will produce.
pub fn candidate_count(webshells: usize, directories: usize) -> usize {
    webshells + webshells * directories
}

/// Builds the full ordered candidate list.
///
/// Order: `shell[0]`, `dir[0]/shell[0]`, `dir[1]/shell[0]`, ..., `shell[1]`,
/// `dir[0]/shell[1]`, ...
pub fn generate<R: Rng + ?Sized>(
    base: &Target,
    webshells: &[String],
    directories: &[String],
    rng: &mut R,
) -> Vec<Candidate> {
    let base = base.as_str();
    let base = base.strip_suffix('/').unwrap_or(base);

    let mut candidates = Vec::with_capacity(candidate_count(webshells.len(), directories.len()));
    let mut push = |path: String, rng: &mut R| {
        let token = cache_bust_token(rng);
        candidates.push(Candidate {
            url: format!("{}/{}?{}={}", base, encode_path(&path), CACHE_BUST_PARAM, token),
            token,
        });
    };

    for shell in webshells {
        push(shell.clone(), &mut *rng);
        for dir in directories {
            push(format!("{}/{}", dir, shell), &mut *rng);
        }
    }
    candidates
}
