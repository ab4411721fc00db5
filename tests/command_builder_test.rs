//! Command construction properties
//!
//! One-way requests build exactly one backend invocation, two-way requests
//! exactly two with swapped endpoints, the fixed exclusion set is always
//! present, and deletion never leaks into two-way commands.

use sharesync::backend::{build_commands, Backend};
use sharesync::types::{Direction, SyncRequest};

fn request(direction: Direction, delete: bool) -> SyncRequest {
	SyncRequest {
		source_path: "/srv/photos".to_string(),
		destination_path: "/mnt/backup/photos".to_string(),
		direction,
		delete_extraneous: delete,
		source_credentials: None,
		destination_credentials: None,
	}
}

#[test]
fn one_way_produces_exactly_one_command() {
	for backend in &[Backend::Rsync, Backend::Robocopy] {
		let commands = build_commands(&request(Direction::OneWay, false), *backend);
		assert_eq!(commands.len(), 1, "{} one-way", backend);
	}
}

#[test]
fn two_way_produces_two_commands_with_swapped_endpoints() {
	let commands = build_commands(&request(Direction::TwoWay, false), Backend::Rsync);
	assert_eq!(commands.len(), 2);

	// rsync endpoints are the last two arguments; the source carries the
	// trailing slash
	let forward = &commands[0].args;
	let reverse = &commands[1].args;
	assert_eq!(forward[forward.len() - 2], "/srv/photos/");
	assert_eq!(forward[forward.len() - 1], "/mnt/backup/photos");
	assert_eq!(reverse[reverse.len() - 2], "/mnt/backup/photos/");
	assert_eq!(reverse[reverse.len() - 1], "/srv/photos");
}

#[test]
fn exclusion_set_present_in_every_command() {
	for backend in &[Backend::Rsync, Backend::Robocopy] {
		for direction in &[Direction::OneWay, Direction::TwoWay] {
			for delete in &[false, true] {
				let commands = build_commands(&request(*direction, *delete), *backend);
				for command in &commands {
					let has_exclusions = match backend {
						Backend::Rsync => {
							command.args.contains(&"--exclude=.*".to_string())
								&& command.args.contains(&"--exclude=Thumbs.db".to_string())
								&& command.args.contains(&"--exclude=$RECYCLE.BIN".to_string())
						}
						Backend::Robocopy => {
							command.args.contains(&"/XF".to_string())
								&& command.args.contains(&"/XD".to_string())
								&& command.args.contains(&"Thumbs.db".to_string())
						}
					};
					assert!(
						has_exclusions,
						"{} {} delete={} missing exclusions: {:?}",
						backend, direction, delete, command.args
					);
				}
			}
		}
	}
}

#[test]
fn one_way_delete_appends_the_delete_flag() {
	let rsync = build_commands(&request(Direction::OneWay, true), Backend::Rsync);
	assert!(rsync[0].args.contains(&"--delete".to_string()));

	let robocopy = build_commands(&request(Direction::OneWay, true), Backend::Robocopy);
	assert!(robocopy[0].args.contains(&"/PURGE".to_string()));
}

#[test]
fn two_way_with_delete_never_produces_a_delete_flag() {
	for backend in &[Backend::Rsync, Backend::Robocopy] {
		let commands = build_commands(&request(Direction::TwoWay, true), *backend);
		assert_eq!(commands.len(), 2);
		for command in &commands {
			assert!(
				!command.args.iter().any(|a| a == "--delete" || a == "/PURGE"),
				"{} leaked a delete flag: {:?}",
				backend,
				command.args
			);
		}
	}
}

#[test]
fn commands_never_contain_shell_join_tokens() {
	for backend in &[Backend::Rsync, Backend::Robocopy] {
		for direction in &[Direction::OneWay, Direction::TwoWay] {
			let commands = build_commands(&request(*direction, true), *backend);
			for command in &commands {
				for token in &["&&", "||", ";", "|", ">"] {
					assert!(
						!command.args.iter().any(|a| a == token),
						"{} argument list embeds '{}'",
						backend,
						token
					);
				}
			}
		}
	}
}

// vim: ts=4
