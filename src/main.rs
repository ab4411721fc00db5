use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tracing::error;

use sharesync::config::Config;
use sharesync::error::SyncError;
use sharesync::session::{self, Session};
use sharesync::sync::SyncBuilder;
use sharesync::types::{Credentials, Direction};
use sharesync::{logging, Backend};

#[tokio::main]
async fn main() {
	let matches = Command::new("ShareSync")
		.version("0.2.0")
		.about("Sync local directories and SMB shares through rsync/robocopy")
		.subcommand_required(true)
		.arg(
			Arg::new("config")
				.short('c')
				.long("config")
				.value_name("FILE")
				.help("Configuration file (default: ~/.sharesync/config.toml)"),
		)
		.subcommand(Command::new("run").about("Interactive sync session"))
		.subcommand(
			Command::new("sync")
				.about("One-shot scripted sync")
				.arg(Arg::new("source").required(true))
				.arg(Arg::new("destination").required(true))
				.arg(
					Arg::new("direction")
						.short('d')
						.long("direction")
						.value_name("DIRECTION")
						.help("one-way (default) or two-way"),
				)
				.arg(
					Arg::new("delete")
						.long("delete")
						.action(ArgAction::SetTrue)
						.help("Delete extraneous destination files (one-way only)"),
				)
				.arg(
					Arg::new("backend")
						.long("backend")
						.value_name("TOOL")
						.help("rsync or robocopy (default: platform native)"),
				)
				.arg(
					Arg::new("source-user")
						.long("source-user")
						.value_name("USER")
						.help("Username for an SMB source"),
				)
				.arg(
					Arg::new("source-password-env")
						.long("source-password-env")
						.value_name("VAR")
						.help("Environment variable holding the SMB source password"),
				)
				.arg(
					Arg::new("dest-user")
						.long("dest-user")
						.value_name("USER")
						.help("Username for an SMB destination"),
				)
				.arg(
					Arg::new("dest-password-env")
						.long("dest-password-env")
						.value_name("VAR")
						.help("Environment variable holding the SMB destination password"),
				),
		)
		.get_matches();

	let config = match load_config(&matches) {
		Ok(config) => config,
		Err(e) => {
			eprintln!("{}", e);
			std::process::exit(e.exit_code());
		}
	};
	logging::init_tracing(&config.log_level);

	let outcome = if matches.subcommand_matches("run").is_some() {
		Session::new(&config).run().await.map(|_| 0)
	} else if let Some(sub_matches) = matches.subcommand_matches("sync") {
		one_shot(sub_matches, &config).await
	} else {
		unreachable!("subcommand is required")
	};

	match outcome {
		Ok(code) => std::process::exit(code),
		Err(e) => {
			error!("{}", e);
			std::process::exit(e.exit_code());
		}
	}
}

fn load_config(matches: &ArgMatches) -> Result<Config, SyncError> {
	match matches.get_one::<String>("config") {
		Some(path) => Config::load(&PathBuf::from(path)),
		None => Config::load_or_default(),
	}
}

/// Credentials for one endpoint of the scripted subcommand. The password
/// comes from an environment variable so it never shows up in argv.
fn endpoint_credentials(
	matches: &ArgMatches,
	user_arg: &str,
	password_env_arg: &str,
) -> Result<Option<Credentials>, SyncError> {
	let user = matches.get_one::<String>(user_arg);
	let env_var = matches.get_one::<String>(password_env_arg);

	match (user, env_var) {
		(None, None) => Ok(None),
		(Some(user), Some(var)) => {
			let password = std::env::var(var).map_err(|_| SyncError::Validation {
				message: format!("Environment variable {} is not set", var),
			})?;
			Ok(Some(Credentials::new(user.clone(), password)))
		}
		_ => Err(SyncError::Validation {
			message: format!(
				"--{} and --{} must be given together",
				user_arg, password_env_arg
			),
		}),
	}
}

async fn one_shot(matches: &ArgMatches, config: &Config) -> Result<i32, SyncError> {
	let source = matches
		.get_one::<String>("source")
		.ok_or_else(|| SyncError::Validation { message: "source argument required".to_string() })?;
	let destination = matches.get_one::<String>("destination").ok_or_else(|| {
		SyncError::Validation { message: "destination argument required".to_string() }
	})?;

	let direction = match matches.get_one::<String>("direction") {
		Some(raw) => raw.parse::<Direction>().map_err(|message| SyncError::Validation { message })?,
		None => Direction::OneWay,
	};
	let backend = match matches.get_one::<String>("backend") {
		Some(raw) => raw.parse::<Backend>().map_err(|message| SyncError::Validation { message })?,
		None => config.backend.unwrap_or_else(Backend::native),
	};

	let mut builder = SyncBuilder::new()
		.source(source.clone())
		.destination(destination.clone())
		.direction(direction)
		.delete_extraneous(matches.get_flag("delete"))
		.backend(backend);
	if let Some(credentials) = endpoint_credentials(matches, "source-user", "source-password-env")? {
		builder = builder.source_credentials(credentials);
	}
	if let Some(credentials) = endpoint_credentials(matches, "dest-user", "dest-password-env")? {
		builder = builder.destination_credentials(credentials);
	}
	if let Some(base) = &config.mount_base {
		builder = builder.mount_base(base.clone());
	}

	let result = builder.sync().await?;
	session::print_report(&result);
	Ok(if result.success { 0 } else { 1 })
}

// vim: ts=4
