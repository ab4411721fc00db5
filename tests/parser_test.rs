//! Output parsing and exit-code policy properties
//!
//! Figures are extracted by tolerant label matching; missing lines and
//! entirely absent summary blocks leave defaults in place instead of
//! erroring.

use sharesync::backend::Backend;

#[test]
fn rsync_files_transferred_line_is_extracted() {
	let stats = Backend::Rsync.parse_stats("Number of files transferred: 42\n");
	assert_eq!(stats.files_copied, 42);
}

#[test]
fn rsync_missing_transfer_line_yields_zero() {
	let stats = Backend::Rsync.parse_stats("sending incremental file list\n");
	assert_eq!(stats.files_copied, 0);
	assert_eq!(stats.files_deleted, 0);
}

#[test]
fn rsync_full_stats_block() {
	let output = "\
sending incremental file list
photo1.jpg
photo2.jpg

Number of files: 12 (reg: 10, dir: 2)
Number of files transferred: 10
Number of deleted files: 1
Total file size: 10,485,760 bytes
total size is 10,485,760  speedup is 3.50
";
	let stats = Backend::Rsync.parse_stats(output);
	assert_eq!(stats.files_copied, 10);
	assert_eq!(stats.files_deleted, 1);
	assert_eq!(stats.total_file_size.as_deref(), Some("10,485,760 bytes"));
	assert_eq!(stats.speedup.as_deref(), Some("3.50"));
}

#[test]
fn rsync_size_keeps_thousands_separators_verbatim() {
	let stats = Backend::Rsync.parse_stats("Total file size: 1,024 bytes\n");
	assert_eq!(stats.total_file_size.as_deref(), Some("1,024 bytes"));
}

#[test]
fn rsync_counts_tolerate_thousands_separators() {
	let stats = Backend::Rsync.parse_stats("Number of files transferred: 1,234\n");
	assert_eq!(stats.files_copied, 1234);
}

#[test]
fn robocopy_summary_table_is_extracted() {
	let output = "\
               Total    Copied   Skipped  Mismatch    FAILED    Extras
    Dirs :         5         1         4         0         0         0
   Files :        64        12        52         0         0         0
   Bytes :    8.5 m     2.1 m         0         0         0         0
";
	let stats = Backend::Robocopy.parse_stats(output);
	assert_eq!(stats.files_copied, 12);
	assert_eq!(stats.total_file_size.as_deref(), Some("8.5 m"));
	assert_eq!(stats.speedup, None, "robocopy reports no speedup");
}

#[test]
fn robocopy_absent_summary_yields_defaults() {
	let stats = Backend::Robocopy.parse_stats("ERROR 5 (0x00000005) Access is denied.\n");
	assert_eq!(stats.files_copied, 0);
	assert_eq!(stats.total_file_size, None);
}

#[test]
fn empty_output_never_errors() {
	for backend in &[Backend::Rsync, Backend::Robocopy] {
		let stats = backend.parse_stats("");
		assert_eq!(stats.files_copied, 0);
		assert_eq!(stats.files_deleted, 0);
	}
}

#[test]
fn rsync_exit_policy_zero_only() {
	assert!(Backend::Rsync.exit_ok(0));
	for code in &[1, 5, 8, 23, 255] {
		assert!(!Backend::Rsync.exit_ok(*code), "rsync code {} must fail", code);
	}
}

#[test]
fn robocopy_exit_policy_low_range_is_success() {
	for code in 0..=7 {
		assert!(Backend::Robocopy.exit_ok(code), "robocopy code {} must succeed", code);
	}
	for code in &[8, 9, 16] {
		assert!(!Backend::Robocopy.exit_ok(*code), "robocopy code {} must fail", code);
	}
}

// vim: ts=4
