extern crate termcolor;

use std::fmt::Display;
use termcolor::StandardStream;

#[allow(unused_must_use)]
pub fn write_result<E: Display>(stdout: &mut StandardStream, result: Result<(), E>, success: &str) {
    match result {
        Ok(_) => write_ok!(stdout, "Success", "{}", success),
        Err(e) => write_error!(stdout, "Error", "{}", e),
    }
}
