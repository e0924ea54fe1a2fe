//! User-facing CLI messages.

use ansi_term::Colour;
use std::fmt;

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_ERR: &str = "❌";

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Blue.bold().paint(ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", Colour::Green.bold().paint(ICON_OK), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", Colour::Red.bold().paint(ICON_ERR), msg);
}

/// Section header used above conversion output.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Colour::Blue.bold().paint(format!("== {} ==", msg)));
}
