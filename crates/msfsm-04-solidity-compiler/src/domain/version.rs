//! `solc --version` output parsing.

/// Extracts `X.Y.Z` from `solc --version` output.
///
/// ```text
/// solc, the solidity compiler commandline interface
/// Version: 0.8.19+commit.7dd6d404.Linux.g++
/// ```
#[must_use]
pub fn parse_version(output: &str) -> Option<String> {
    let line = output
        .lines()
        .find_map(|line| line.trim().strip_prefix("Version:"))?;
    let version: String = line
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let parts = version.split('.').filter(|p| !p.is_empty()).count();
    (parts == 3).then_some(version)
}

/// Strips a leading `^`, `=` or `v` so `^0.8.0` matches `0.8.0`.
#[must_use]
pub fn normalize(version: &str) -> &str {
    version.trim().trim_start_matches(|c: char| c == '^' || c == '=' || c == 'v')
}
