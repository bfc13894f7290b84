use anyhow::Result;

use onboard_core::presets::{load_preset, PRESET_NAMES};

pub fn run() -> Result<()> {
    println!("Indicator presets ({}):\n", PRESET_NAMES.len());

    for name in PRESET_NAMES {
        let preset = load_preset(name);
        println!("  {}", name);
        println!("    style:    {}", preset.animation_style);
        println!("    shape:    {}", preset.shape);
        println!("    size:     {} (spacing {})", preset.size, preset.spacing);
        println!("    active:   {}", preset.active_color);
        println!("    inactive: {}", preset.inactive_color);
        println!();
    }

    println!("Select one with `[indicator] preset = \"<name>\"` or `onboard preview --preset <name>`.");

    Ok(())
}
