use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

/// Dynamic list of city-name inputs, one row per entry
pub struct CityForm {
    inputs: Vec<TextInput>,
}

pub struct CityFormProps<'a> {
    pub cities: &'a [String],
    pub selected: usize,
    pub is_focused: bool,
    // Action constructors
    pub on_input: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for CityForm {
    fn default() -> Self {
        Self { inputs: Vec::new() }
    }
}

impl CityForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep one TextInput (cursor state) per entry row
    fn sync_rows(&mut self, count: usize) {
        while self.inputs.len() < count {
            self.inputs.push(TextInput::new());
        }
        self.inputs.truncate(count);
    }
}

impl Component<Action> for CityForm {
    type Props<'a> = CityFormProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        self.sync_rows(props.cities.len());

        // Form-level keys first; everything else is text entry
        match key.code {
            KeyCode::Esc => return vec![Action::Quit],
            KeyCode::Tab | KeyCode::Down => return vec![Action::EntrySelectNext],
            KeyCode::BackTab | KeyCode::Up => return vec![Action::EntrySelectPrev],
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::EntryAdd];
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Never remove the last remaining entry
                if props.cities.len() > 1 {
                    return vec![Action::EntryRemove(props.selected)];
                }
                return Vec::new();
            }
            _ => {}
        }

        let Some(input) = self.inputs.get_mut(props.selected) else {
            return Vec::new();
        };
        let value = props
            .cities
            .get(props.selected)
            .map(String::as_str)
            .unwrap_or("");

        let input_props = TextInputProps {
            value,
            placeholder: "Enter a city name",
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::default(),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_input,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        input.handle_event(event, input_props).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync_rows(props.cities.len());

        let rows = Layout::vertical(
            props
                .cities
                .iter()
                .map(|_| Constraint::Length(1))
                .collect::<Vec<_>>(),
        )
        .split(area);

        for (index, (city, input)) in props.cities.iter().zip(&mut self.inputs).enumerate() {
            let Some(row) = rows.get(index).copied() else {
                break;
            };
            let is_selected = index == props.selected;

            let chunks = Layout::horizontal([Constraint::Length(2), Constraint::Min(1)])
                .split(row);

            let marker = if is_selected { "▸ " } else { "  " };
            frame.render_widget(
                Paragraph::new(Line::from(vec![Span::styled(
                    marker,
                    Style::default().fg(Color::Cyan).bold(),
                )])),
                chunks[0],
            );

            let input_props = TextInputProps {
                value: city,
                placeholder: "Enter a city name",
                is_focused: props.is_focused && is_selected,
                style: TextInputStyle {
                    base: BaseStyle {
                        border: None,
                        padding: Padding::default(),
                        bg: if is_selected {
                            Some(Color::Rgb(45, 45, 55))
                        } else {
                            None
                        },
                        fg: None,
                    },
                    placeholder_style: None,
                    cursor_style: None,
                },
                on_change: props.on_input,
                on_submit: props.on_submit,
                on_cursor_move: Some(|_| Action::Render),
            };
            input.render(frame, chunks[1], input_props);
        }
    }
}
