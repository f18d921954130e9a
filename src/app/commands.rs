//! Inbound commands to the controller service.
//!
//! One [`Command`] is parsed from every line of operator input and handed to
//! the [`ControllerService`](super::service::ControllerService).

/// Commands an operator line can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drive the LED high (`H` / `h`).
    SetHigh,
    /// Drive the LED low (`L` / `l`).
    SetLow,
    /// Step the servo duty cycle up (`A` / `a`).
    IncreasePwm,
    /// Step the servo duty cycle down (`D` / `d`).
    DecreasePwm,
    /// Write a raw duty-cycle numerator (any base-10 `u32`).
    SetPwmAbsolute(u32),
    /// Anything else, with the trimmed line.  Logged and dropped.
    Unrecognized(String),
}

/// Map one trimmed input line to a [`Command`].
///
/// Letters are case-insensitive single characters.  Any other token is tried
/// as a base-10 `u32` made of ASCII digits only (no sign); failure yields
/// [`Command::Unrecognized`].
pub fn parse_command(line: &str) -> Command {
    let token = line.trim();
    match token {
        "H" | "h" => Command::SetHigh,
        "L" | "l" => Command::SetLow,
        "A" | "a" => Command::IncreasePwm,
        "D" | "d" => Command::DecreasePwm,
        _ if token.bytes().all(|b| b.is_ascii_digit()) => token
            .parse::<u32>()
            .map_or_else(|_| unrecognized(token), Command::SetPwmAbsolute),
        _ => unrecognized(token),
    }
}

fn unrecognized(token: &str) -> Command {
    Command::Unrecognized(token.to_owned())
}
