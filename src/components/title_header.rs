use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{Frame, layout::Rect};

use super::{Component, palette};
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const APP_TITLE: &str = "Weather Compare";

/// FIGlet application title with a gradient keyed on the mean temperature of
/// the loaded reports; the gradient shimmers while a fetch is in flight.
pub struct TitleHeader;

pub struct TitleHeaderProps {
    pub temperature: Option<f32>,
    pub is_animating: bool,
    pub tick_count: u32,
}

fn gradient_colors(temp: Option<f32>) -> (ArtColor, ArtColor) {
    let ((r1, g1, b1), (r2, g2, b2)) = match temp {
        Some(t) => palette::temperature_band(t),
        None => palette::NO_DATA_BAND,
    };
    (ArtColor::rgb(r1, g1, b1), ArtColor::rgb(r2, g2, b2))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

/// Pull the two endpoint colors towards each other and back as the phase
/// advances, giving the title a slow breathing shimmer.
fn make_gradient(colors: (ArtColor, ArtColor), phase: f32) -> Fill {
    let wave = (phase * std::f32::consts::TAU).sin() * 0.5 + 0.5;
    let start = colors.0.interpolate(colors.1, wave * 0.35);
    let end = colors.1.interpolate(colors.0, wave * 0.35);
    Fill::Linear(LinearGradient::horizontal(start, end))
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let colors = gradient_colors(props.temperature);
        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };
        let fill = make_gradient(colors, phase);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(fill);

        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), area);
    }
}
