use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no,
/// and so is a closed stdin.
pub fn confirm(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    match io::stdin().read_line(&mut s) {
        Ok(_) => matches!(s.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}
