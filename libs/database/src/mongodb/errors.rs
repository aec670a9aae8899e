use mongodb::error::{Error, ErrorKind, WriteFailure};

/// MongoDB server code for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// True when the server rejected a write because of a duplicate `_id`
/// (or any other unique index).
pub fn is_duplicate_key_error(err: &Error) -> bool {
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
