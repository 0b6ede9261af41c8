//! Print the persona priming prompt.

use anyhow::Result;
use console::style;

use milan_core::persona::{Persona, PersonaPromptBuilder};

pub fn print_persona(json: bool) -> Result<()> {
    let persona = Persona::milan();
    let prompt = PersonaPromptBuilder::build_for(&persona);

    if json {
        let out = serde_json::json!({
            "name": persona.name,
            "prompt": prompt,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {}", style(persona.name).cyan().bold());
    println!("  {}", style("---").dim());
    println!();
    for line in prompt.lines() {
        println!("  {line}");
    }
    println!();
    Ok(())
}
