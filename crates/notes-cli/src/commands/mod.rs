//! Command implementations.

mod init;
mod notes;
mod payload;
mod rekey;

pub use init::handle_init;
pub use notes::{handle_add, handle_delete, handle_edit, handle_list, handle_show};
pub use payload::{handle_decrypt, handle_encrypt};
pub use rekey::handle_rekey;

use std::io::{self, IsTerminal, Read};

use zeroize::Zeroizing;

use crate::errors::CliError;

/// Use `value` if given, otherwise read all of stdin.
///
/// One trailing newline (as left by `echo`) is dropped.
pub(crate) fn read_text_arg(
    value: Option<String>,
    flag: &str,
) -> anyhow::Result<Zeroizing<String>> {
    if let Some(value) = value {
        return Ok(Zeroizing::new(value));
    }
    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(format!(
            "Nothing to read. Pass --{} or pipe text on stdin.",
            flag
        ))
        .into());
    }

    let mut buffer = Zeroizing::new(String::new());
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
    Ok(buffer)
}
