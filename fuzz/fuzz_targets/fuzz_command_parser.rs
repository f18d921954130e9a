//! Fuzz target: `parse_command`
//!
//! Drives arbitrary bytes through the line parser and checks that it never
//! panics and that any accepted number round-trips through its decimal form.
//!
//! cargo fuzz run fuzz_command_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use servoctl::app::commands::{Command, parse_command};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    if let Command::SetPwmAbsolute(v) = parse_command(line) {
        assert_eq!(parse_command(&v.to_string()), Command::SetPwmAbsolute(v));
    }
});
