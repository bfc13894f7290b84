use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;

use onboard_core::indicator::IndicatorState;
use onboard_core::{AnimationStyle, AppConfig, DrawCommand, Geometry, PageIndicator, Size};

/// Long enough for every style's settle animation to finish
const RUN_TO_COMPLETION: Duration = Duration::from_secs(5);

pub struct FrameRequest {
    pub pages: usize,
    pub page: i64,
    pub scroll: Option<(i64, f32)>,
    pub elapsed: Option<u64>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub style: Option<AnimationStyle>,
}

#[derive(Debug, Serialize)]
pub struct FrameOutput {
    pub geometry: Geometry,
    pub bounds: Size,
    pub state: IndicatorState,
    pub commands: Vec<DrawCommand>,
}

pub fn run(config: &AppConfig, request: FrameRequest) -> Result<()> {
    let output = build_frame(config, &request, Instant::now());
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Attach, replay the requested events and capture one frame
pub fn build_frame(config: &AppConfig, request: &FrameRequest, start: Instant) -> FrameOutput {
    let mut indicator_config = config.indicator.clone();
    if let Some(style) = request.style {
        indicator_config.animation_style = style;
    }

    let mut indicator = PageIndicator::new();
    indicator.attach(request.pages, indicator_config, start);
    if request.page != 0 {
        indicator.on_page_settled(request.page, start);
    }

    let now = start
        + request
            .elapsed
            .map(Duration::from_millis)
            .unwrap_or(RUN_TO_COMPLETION);
    indicator.tick(now);

    if let Some((base, offset)) = request.scroll {
        indicator.on_gesture_state_changed(true, now);
        indicator.on_scroll_progress(base, offset, now);
    }

    let geometry = indicator.measure();
    let bounds = Size::new(
        request.width.unwrap_or(geometry.total_extent),
        request.height.unwrap_or(geometry.rendered_height),
    );

    FrameOutput {
        geometry,
        bounds,
        state: indicator.state().clone(),
        commands: indicator.render(bounds),
    }
}

/// Parse `BASE:OFFSET`, e.g. `1:0.25`
pub fn parse_scroll(value: &str) -> Result<(i64, f32), String> {
    let (base, offset) = value
        .split_once(':')
        .ok_or_else(|| format!("expected BASE:OFFSET, got '{value}'"))?;
    let base = base
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid page '{base}': {e}"))?;
    let offset = offset
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid offset '{offset}': {e}"))?;
    Ok((base, offset))
}
