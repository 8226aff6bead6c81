//! SpaceTally: directory size analyser.
//!
//! Thin binary entry point. All logic lives in the `spacetally-core`
//! and `spacetally-cli` crates.

fn main() -> anyhow::Result<()> {
    spacetally_cli::run()
}
