//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

//! Diagnostic tracing for prjkit.
//!
//! User-facing status lines are printed directly by the commands. Everything
//! written here goes to stderr and is hidden below `warn` unless asked for.

use crate::util::environment::PRJKIT_LOG;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "prjkit=debug";

/// Picks the filter directives: `PRJKIT_LOG` wins over `--verbose`, which wins
/// over the default.
fn directives(from_env: Option<String>, verbose: bool) -> String {
    match from_env {
        Some(s) if s.trim().is_empty() == false => s,
        _ => match verbose {
            true => String::from(VERBOSE_LOG_FILTER),
            false => String::from(DEFAULT_LOG_FILTER),
        },
    }
}

/// Installs the stderr subscriber for the process.
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_new(directives(std::env::var(PRJKIT_LOG).ok(), verbose))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .with_filter(filter),
        )
        .try_init();
    if result.is_err() {
        tracing::debug!("logging was already initialized");
    }
}
