//! rcopywriter main entrypoint.

use rcopywriter::run;
use rcopywriter::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
