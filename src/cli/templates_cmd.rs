//! List the known template identifiers.

use anyhow::Result;

use crate::render::TemplateId;

pub fn run() -> Result<()> {
    for id in TemplateId::KNOWN {
        println!("{id}");
    }
    Ok(())
}
