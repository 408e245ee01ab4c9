//! Registered command listing

use cmdbus_core::Registry;

pub fn execute(registry: &Registry) -> Result<(), Box<dyn std::error::Error>> {
    for command in registry.commands() {
        println!("{}", command);
    }
    Ok(())
}
