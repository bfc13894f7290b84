use anyhow::Result;

use onboard_core::indicator::geometry::measure;
use onboard_core::{AnimationStyle, AppConfig};

pub fn run(config: &AppConfig, pages: usize, style: Option<AnimationStyle>) -> Result<()> {
    let indicator = config.indicator.sanitized();
    let style = style.unwrap_or(indicator.animation_style);

    let geometry = if indicator.is_visible && pages > 1 {
        measure(pages, &indicator, style)
    } else {
        onboard_core::Geometry::EMPTY
    };

    println!("style:           {}", style);
    println!("pages:           {}", pages);
    println!("total_extent:    {:.1}", geometry.total_extent);
    println!("rendered_height: {:.1}", geometry.rendered_height);
    println!("per_step:        {:.1}", geometry.per_step);

    Ok(())
}
