//! Find and scaffold command handlers.

use anyhow::{Result, bail};
use tracing::warn;

use toolbelt::scan::{FinderOptions, find_by_extension_with, mark_packages};

use crate::cli::{FindArgs, ScaffoldArgs};

/// Prints every match; unreadable entries are reported and fail the command at the end.
pub fn run_find_command(args: &FindArgs) -> Result<()> {
    let options = FinderOptions {
        follow_links: args.follow_links,
    };

    let mut failures = 0_usize;
    for entry in find_by_extension_with(&args.root, &args.suffix, options) {
        match entry {
            Ok(path) => println!("{}", path.display()),
            Err(error) => {
                warn!(%error, "skipping entry");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!(
            "{failures} entr{} under '{}' could not be read",
            if failures == 1 { "y" } else { "ies" },
            args.root.display()
        );
    }
    Ok(())
}

pub fn run_scaffold_command(args: &ScaffoldArgs) -> Result<()> {
    for marker in mark_packages(&args.root, &args.marker)? {
        println!("{}", marker.display());
    }
    Ok(())
}
