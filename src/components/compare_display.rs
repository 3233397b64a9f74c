use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CityForm, CityFormProps, Component, ResultsBody, ResultsBodyProps, TitleHeader, TitleHeaderProps};
use crate::action::Action;
use crate::state::AppState;

/// Props for CompareDisplay - read-only view of state
pub struct CompareDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main display component: title, city form, results area, help bar
pub struct CompareDisplay {
    form: CityForm,
}

impl Default for CompareDisplay {
    fn default() -> Self {
        Self {
            form: CityForm::new(),
        }
    }
}

impl CompareDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn form_props<'a>(state: &'a AppState, is_focused: bool) -> CityFormProps<'a> {
        CityFormProps {
            cities: &state.cities,
            selected: state.selected,
            is_focused,
            on_input: Action::EntryInput,
            on_submit: |_| Action::CompareSubmit,
        }
    }
}

impl Component<Action> for CompareDisplay {
    type Props<'a> = CompareDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let form_props = Self::form_props(props.state, props.is_focused);
        self.form
            .handle_event(event, form_props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CompareDisplayProps<'_>) {
        let form_height = props.state.cities.len().min(u16::MAX as usize) as u16;
        let chunks = Layout::vertical([
            Constraint::Max(7),               // FIGlet title
            Constraint::Length(1),            // spacer
            Constraint::Length(form_height),  // city inputs
            Constraint::Length(1),            // spacer
            Constraint::Min(1),               // results / error
            Constraint::Length(1),            // help bar
        ])
        .split(area);

        let mut header = TitleHeader;
        header.render(
            frame,
            chunks[0],
            TitleHeaderProps {
                temperature: props.state.mean_temperature(),
                is_animating: props.state.loading_anim_active(),
                tick_count: props.state.tick_count,
            },
        );

        let form_props = Self::form_props(props.state, props.is_focused);
        self.form.render(frame, chunks[2], form_props);

        let mut body = ResultsBody;
        body.render(
            frame,
            chunks[4],
            ResultsBodyProps {
                comparison: &props.state.comparison,
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "compare"),
                    StatusBarHint::new("tab", "next city"),
                    StatusBarHint::new("^n", "add"),
                    StatusBarHint::new("^d", "remove"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
