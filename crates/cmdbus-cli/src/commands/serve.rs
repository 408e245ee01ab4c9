//! Line-oriented stdin/stdout transport
//!
//! One JSON request envelope per input line, one JSON response per output
//! line, in order. Blank lines are skipped. A line that is not UTF-8 gets an
//! invalid-request response like any other malformed envelope. Ends at end
//! of input.

use std::io::{self, BufRead, Write};

use cmdbus_core::Registry;
use tracing::info;

pub fn execute(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(registry, stdin.lock(), stdout.lock())
}

fn serve(
    registry: &Registry,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut served: u64 = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let response = registry.dispatch_bytes(&line);
        writeln!(output, "{}", response.to_json())?;
        output.flush()?;
        served += 1;
    }

    info!(served, "input closed");
    Ok(())
}
