//! Console prompts with echo control for password entry

use std::io::{self, BufRead, Write};

/// Print a prompt and read one line from stdin, trimmed
pub fn prompt_line(prompt: &str) -> io::Result<String> {
	let mut out = io::stdout();
	out.write_all(prompt.as_bytes())?;
	out.flush()?;

	let mut line = String::new();
	if io::stdin().lock().read_line(&mut line)? == 0 {
		return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
	}
	Ok(line.trim().to_string())
}

/// Read a password without echoing it back. Only the line terminator is
/// stripped; interior whitespace is part of the password.
pub fn prompt_password(prompt: &str) -> io::Result<String> {
	let mut out = io::stdout();
	out.write_all(prompt.as_bytes())?;
	out.flush()?;

	let guard = echo::EchoGuard::new();
	let mut line = String::new();
	let read = io::stdin().lock().read_line(&mut line);
	drop(guard);
	if read? == 0 {
		return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
	}

	// The suppressed newline still needs to reach the screen
	println!();
	Ok(line.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
}

#[cfg(unix)]
mod echo {
	use termios::{tcsetattr, Termios, ECHO, TCSANOW};

	/// RAII guard suppressing terminal echo on stdin.
	/// Line buffering (ICANON) stays on so the entry remains editable.
	/// Restores the previous settings on drop.
	pub struct EchoGuard {
		fd: i32,
		original: Termios,
	}

	impl EchoGuard {
		/// Returns None when stdin is not a terminal; input then simply
		/// echoes, which matches piped/scripted use
		pub fn new() -> Option<Self> {
			let fd = 0; // stdin
			let original = Termios::from_fd(fd).ok()?;
			let mut quiet = original;
			quiet.c_lflag &= !ECHO;
			if tcsetattr(fd, TCSANOW, &quiet).is_err() {
				return None;
			}
			Some(EchoGuard { fd, original })
		}
	}

	impl Drop for EchoGuard {
		fn drop(&mut self) {
			let _ = tcsetattr(self.fd, TCSANOW, &self.original);
		}
	}
}

#[cfg(not(unix))]
mod echo {
	/// Echo control is not available; passwords echo on these platforms
	pub struct EchoGuard;

	impl EchoGuard {
		pub fn new() -> Option<Self> {
			None
		}
	}
}


// vim: ts=4
