//! Lists the supported export format keys.

use std::io;

use diffexport::ExportError;
use diffexport::export::list_supported_formats;

use super::output::write_formats;

/// Prints every registered format key, one per line.
pub fn run() -> Result<(), ExportError> {
    write_formats(&mut io::stdout().lock(), &list_supported_formats())
}
