//! robocopy command construction and summary-table parsing

use regex::Regex;
use std::sync::OnceLock;

use super::{parse_count, BackendStats, EXCLUDED_DIRS, EXCLUDED_FILES};
use crate::types::SyncCommand;

/// Build one robocopy invocation. Endpoints come first, then the restart-
/// capable mirror options, the fixed exclusion set and optionally /PURGE.
pub(super) fn command(source: &str, destination: &str, delete: bool) -> SyncCommand {
	let mut args = vec![source.to_string(), destination.to_string()];
	for option in &["/E", "/Z", "/R:3", "/W:10", "/MT:8", "/NP", "/NDL", "/NC", "/BYTES", "/TS"] {
		args.push((*option).to_string());
	}
	args.push("/XF".to_string());
	for pattern in EXCLUDED_FILES {
		args.push((*pattern).to_string());
	}
	args.push("/XD".to_string());
	for pattern in EXCLUDED_DIRS {
		args.push((*pattern).to_string());
	}
	if delete {
		args.push("/PURGE".to_string());
	}
	SyncCommand::new("robocopy", args)
}

struct StatPatterns {
	files: Regex,
	bytes: Regex,
}

fn patterns() -> &'static StatPatterns {
	static PATTERNS: OnceLock<StatPatterns> = OnceLock::new();
	PATTERNS.get_or_init(|| StatPatterns {
		// Summary table row: "Files :   Total   Copied   Skipped ..."; the
		// Copied column is the transferred-files figure. A truncated row
		// with a single number falls back to that number.
		files: Regex::new(r"Files :\s*([\d,]+)(?:\s+([\d,]+))?").expect("files pattern"),
		bytes: Regex::new(r"(?i)Bytes :\s*([\d][\d.,]*)(?:\s*([kmgt]))?").expect("bytes pattern"),
	})
}

/// Extract the summary table. robocopy reports no deletion count and no
/// speedup; those figures keep their defaults.
pub(super) fn parse_stats(output: &str) -> BackendStats {
	let patterns = patterns();
	let mut stats = BackendStats::default();

	if let Some(captures) = patterns.files.captures(output) {
		let copied = captures.get(2).or_else(|| captures.get(1));
		if let Some(figure) = copied {
			stats.files_copied = parse_count(figure.as_str());
		}
	}
	if let Some(captures) = patterns.bytes.captures(output) {
		let total = match captures.get(2) {
			Some(unit) => format!("{} {}", &captures[1], unit.as_str()),
			None => format!("{} bytes", &captures[1]),
		};
		stats.total_file_size = Some(total);
	}
	stats
}


// vim: ts=4
