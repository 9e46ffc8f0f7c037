//! Byte-exact protocol markers of the target device family.
//!
//! These are fixed constants of the CPE's telnet shell and must match
//! byte-for-byte, trailing spaces included.

/// Emitted when the device is ready for the username.
pub const LOGIN_PROMPT: &str = "login: ";

/// Emitted when the device is ready for the password.
pub const PASSWORD_PROMPT: &str = "Password: ";

/// The idle shell prompt: the device is ready for the next command.
pub const SHELL_PROMPT: &str = "~ # ";

/// Terminates every successful `atcli` command response.
pub const COMMAND_OK: &str = "OK";

/// Line boundary in device output.
pub const LINE: &str = "\n";
