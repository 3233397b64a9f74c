//! Weather comparison TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weather_compare::action::Action;
use weather_compare::api;
use weather_compare::components::{CompareDisplay, CompareDisplayProps, Component};
use weather_compare::effect::Effect;
use weather_compare::reducer::reducer;
use weather_compare::state::{AppState, LOADING_ANIM_TICK_MS};

/// Compare current weather across multiple cities
#[derive(Parser, Debug)]
#[command(name = "weather-compare")]
#[command(about = "Compare current OpenWeatherMap weather for several cities side by side")]
struct Args {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    api_key: String,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CompareComponentId {
    Display,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CompareContext {
    Main,
}

impl EventRoutingState<CompareComponentId, CompareContext> for AppState {
    fn focused(&self) -> Option<CompareComponentId> {
        Some(CompareComponentId::Display)
    }

    fn modal(&self) -> Option<CompareComponentId> {
        None
    }

    fn binding_context(&self, _id: CompareComponentId) -> CompareContext {
        CompareContext::Main
    }

    fn default_context(&self) -> CompareContext {
        CompareContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_key,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, api_key, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    api_key: String,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CompareDisplay::new()));
    let mut bus: EventBus<AppState, Action, CompareComponentId, CompareContext> = EventBus::new();
    let keybindings: Keybindings<CompareContext> = Keybindings::new();

    let ui_display = Rc::clone(&ui);
    bus.register(CompareComponentId::Display, move |event, state| {
        let props = CompareDisplayProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = ui_display
            .borrow_mut()
            .handle_event(&event.kind, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                event_ctx.set_component_area(CompareComponentId::Display, area);
                let props = CompareDisplayProps {
                    state,
                    is_focused: render_ctx.is_focused(),
                };
                ui.borrow_mut().render(frame, area, props);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &api_key),
        )
        .await
}

/// Handle effects by spawning tasks. Resubmitting reuses the task key, so a
/// new comparison supersedes an in-flight one.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, api_key: &str) {
    match effect {
        Effect::FetchComparison { cities } => {
            let api_key = api_key.to_string();
            ctx.tasks().spawn("compare", async move {
                match api::fetch_comparison(&cities, &api_key).await {
                    Ok(reports) => Action::CompareDidLoad(reports),
                    Err(e) => Action::CompareDidError(e.to_string()),
                }
            });
        }
    }
}
