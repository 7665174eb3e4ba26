//! fleetdesk main entrypoint.

use fleetdesk::run;
use fleetdesk::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
