//! rsync command construction and `--stats` output parsing

use regex::Regex;
use std::sync::OnceLock;

use super::{parse_count, BackendStats, EXCLUDED_DIRS, EXCLUDED_FILES};
use crate::types::SyncCommand;

/// Build one rsync invocation: archive/verbose/compressed with statistics
/// reporting, the fixed exclusion set, an optional delete flag, then the
/// endpoints.
pub(super) fn command(source: &str, destination: &str, delete: bool) -> SyncCommand {
	let mut args = vec!["-avz".to_string(), "--stats".to_string()];
	for pattern in EXCLUDED_FILES.iter().chain(EXCLUDED_DIRS.iter()) {
		args.push(format!("--exclude={}", pattern));
	}
	if delete {
		args.push("--delete".to_string());
	}
	// Trailing slash syncs the directory contents rather than the directory
	// itself into the destination
	args.push(format!("{}/", source.trim_end_matches('/')));
	args.push(destination.to_string());
	SyncCommand::new("rsync", args)
}

struct StatPatterns {
	files: Regex,
	deleted: Regex,
	size: Regex,
	speedup: Regex,
}

fn patterns() -> &'static StatPatterns {
	static PATTERNS: OnceLock<StatPatterns> = OnceLock::new();
	PATTERNS.get_or_init(|| StatPatterns {
		// Newer rsync releases label the line "Number of regular files
		// transferred"
		files: Regex::new(r"Number of (?:regular )?files transferred: ([\d,]+)")
			.expect("files pattern"),
		deleted: Regex::new(r"Number of deleted files: ([\d,]+)").expect("deleted pattern"),
		size: Regex::new(r"Total file size: ([\d,]+ bytes)").expect("size pattern"),
		speedup: Regex::new(r"speedup is ([\d.]+)").expect("speedup pattern"),
	})
}

/// Extract the `--stats` summary. Lines that do not appear leave their
/// figures at the defaults.
pub(super) fn parse_stats(output: &str) -> BackendStats {
	let patterns = patterns();
	let mut stats = BackendStats::default();

	if let Some(captures) = patterns.files.captures(output) {
		stats.files_copied = parse_count(&captures[1]);
	}
	if let Some(captures) = patterns.deleted.captures(output) {
		stats.files_deleted = parse_count(&captures[1]);
	}
	if let Some(captures) = patterns.size.captures(output) {
		stats.total_file_size = Some(captures[1].to_string());
	}
	if let Some(captures) = patterns.speedup.captures(output) {
		stats.speedup = Some(captures[1].to_string());
	}
	stats
}


// vim: ts=4
