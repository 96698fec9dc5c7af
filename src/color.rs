extern crate termcolor;

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

macro_rules! get_version {
    ($file:expr) => {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " ",
            include_str!(concat!(env!("OUT_DIR"), "/", $file))
        )
    };
}

/// Writes `typ` right aligned in bold `color`, followed by `": "` in the default color.
pub fn label<W: WriteColor>(dest: &mut W, color: Color, typ: &str) -> io::Result<()> {
    dest.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(dest, "{:>8}", typ)?;
    dest.reset()?;
    write!(dest, ": ")
}

macro_rules! write_color {
    ($dest:expr, $color:expr, $typ:expr, $($arg:tt)*) => {{
        use std::io::Write as _;
        if $crate::color::label($dest, $color, $typ).is_ok() {
            writeln!($dest, $($arg)*).ok();
        }
    }};
}

macro_rules! write_error {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Red, $typ, $($arg)*)
    };
}

macro_rules! write_info {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Blue, $typ, $($arg)*)
    };
}

macro_rules! write_ok {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Green, $typ, $($arg)*)
    };
}

macro_rules! write_progress {
    ($dest:expr, $typ:expr, $($arg:tt)*) => {
        write_color!($dest, termcolor::Color::Cyan, $typ, $($arg)*)
    };
}
