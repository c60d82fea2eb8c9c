//! Notice sink that renders notices to the terminal and the log.

use tama_runtime::NoticeSink;
use tama_types::{Notice, TamaState};
use tracing::{info, warn};

/// Prints each notice as a one-line message and records it with `tracing`.
///
/// Alerts go out at `warn`, everything else at `info`.
pub struct LogSink;

impl NoticeSink for LogSink {
    fn on_notices(&mut self, notices: &[Notice], state: &TamaState) {
        for notice in notices {
            if notice.is_alert() {
                warn!(notice = %notice, is_sick = state.health.is_sick, "Alert");
            } else {
                info!(notice = %notice, "Notice");
            }
            println!("* {notice}");
        }
    }
}
