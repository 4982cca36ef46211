// CLI errors are handled via anyhow at the top level.
// This module decides how a failure is presented.

use prio_store::StoreError;

pub fn format_error(err: &anyhow::Error) -> String {
    let label = if is_warning(err) { "warning" } else { "error" };
    let mut msg = format!("{label}: {err}");
    for cause in err.chain().skip(1) {
        msg.push_str(&format!("\n  caused by: {cause}"));
    }
    msg
}

/// Validation failures and vanished records are warnings, not faults.
pub fn is_warning(err: &anyhow::Error) -> bool {
    err.chain()
        .find_map(|e| e.downcast_ref::<StoreError>())
        .is_some_and(StoreError::is_recoverable)
}
