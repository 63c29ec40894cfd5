//! Outline text with a TrueType font and write it as SVG.

use glyphpath::core;

fn main() {
    let cli_args = core::platform::get_cli_args();
    match core::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
