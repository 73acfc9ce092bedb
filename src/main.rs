//! shiftkeeper main entrypoint.

use shiftkeeper::run;

fn main() {
    println!();
    if let Err(e) = run() {
        shiftkeeper::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
