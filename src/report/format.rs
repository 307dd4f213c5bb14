//! Text layout helpers for multi-line report values.

use std::sync::LazyLock;

use regex::Regex;

use super::section::ljust;

static CONFIGURE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" '?--").expect("CONFIGURE_SPLIT must compile"));

/// Split `RbConfig::CONFIG['configure_args']` into one indented flag per line.
///
/// Splitting on ` --` (optionally quoted) strips the leading dashes from
/// every flag but the first; they are restored, and a flag whose closing
/// quote survived the split gets its opening quote back.
pub fn configure_arg_lines(args: &str) -> Vec<String> {
    CONFIGURE_SPLIT
        .split(args.trim())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let quoted_dash = part.starts_with("--") || part.starts_with("'--");
            let flag = if quoted_dash {
                part.to_string()
            } else {
                format!("--{}", part)
            };
            if flag.ends_with('\'') && !flag.starts_with('\'') {
                format!("  {}", flag.replacen("--", "'--", 1))
            } else {
                format!("  {}", flag)
            }
        })
        .collect()
}

/// Wrap a space separated, sorted signal list into rows.
///
/// Long lists are split alphabetically into three rows (`A-J`, `K-TS`,
/// `TT-`); each name occupies seven columns.
pub fn signal_rows(signals: &str) -> Vec<String> {
    let names: Vec<&str> = signals.split_whitespace().collect();
    let row = |names: &[&str]| {
        let cells: String = names.iter().map(|s| ljust(s, 7)).collect();
        format!("  {}", cells).trim_end().to_string()
    };

    if names.len() <= 13 {
        return vec![row(&names)];
    }

    let first: Vec<&str> = names.iter().copied().filter(|s| *s < "K").collect();
    let second: Vec<&str> = names
        .iter()
        .copied()
        .filter(|s| *s >= "K" && *s < "TT")
        .collect();
    let third: Vec<&str> = names.iter().copied().filter(|s| *s >= "TT").collect();
    vec![row(&first), row(&second), row(&third)]
}
