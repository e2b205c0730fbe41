/// The middleware path pattern that applies to every request.
pub(crate) const MATCH_ALL: &str = "*";

/// Message substituted for unexpected faults so internal detail never
/// reaches a caller.
pub(crate) const GENERIC_ERROR_MESSAGE: &str = "Something went wrong!";
