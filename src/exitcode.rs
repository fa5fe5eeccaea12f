//! Process exit codes, numbered after BSD `sysexits.h`.

pub const OK: i32 = 0;

/// Catalog file parsed but its contents are invalid
pub const DATAERR: i32 = 65;

/// Catalog file could not be read
pub const NOINPUT: i32 = 66;

/// Any other failure inside a use case
pub const SOFTWARE: i32 = 70;

/// Terminal read or write failed
pub const IOERR: i32 = 74;

/// Settings file missing, unreadable or malformed
pub const CONFIG: i32 = 78;
