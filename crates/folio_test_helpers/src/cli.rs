//! CLI command builders for tests
//!
//! Provides pre-configured command builders with clean environments
//! so tests never pick up a developer's Supabase project.

use assert_cmd::Command;

/// Environment variables stripped from every test command
const SCRUBBED_VARS: &[&str] = &["SUPABASE_URL", "SUPABASE_ANON_KEY", "FOLIO_CONFIG", "PORT", "HOST"];

/// Get a Command for the `folio` binary with clean environment
///
/// This command is pre-configured with:
/// - `RUST_LOG=error` to suppress INFO/DEBUG logs in tests
/// - No Supabase credentials or config file from the user's environment
///
/// # Example
///
/// ```rust,no_run
/// use folio_test_helpers::cli::folio_command;
///
/// folio_command()
///     .arg("--version")
///     .assert()
///     .success();
/// ```
pub fn folio_command() -> Command {
    command_for("folio")
}

/// Get a Command for a specific binary with clean environment
///
/// # Arguments
///
/// * `bin_name` - Name of the binary (e.g., "folio", "folio_mcp")
#[allow(deprecated)]
pub fn command_for(bin_name: &str) -> Command {
    let mut cmd = Command::cargo_bin(bin_name)
        .unwrap_or_else(|_| panic!("Failed to find {} binary", bin_name));
    cmd.env("RUST_LOG", "error");
    for var in SCRUBBED_VARS {
        cmd.env_remove(var);
    }
    cmd
}
