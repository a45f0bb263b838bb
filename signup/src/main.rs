//! Sign up for an account from the terminal

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

/// Focus cycling for forms
mod form_fields;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use signup_core::Route;
use std::{io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    // The terminal belongs to the UI, so logs go to a file instead.
    let _guard = init_logging(&config)?;
    tracing::info!(server = %config.server, "starting");

    let effect_context = Arc::new(EffectContext::new(config.server.clone()));

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, effect_context).await;
    ratatui::restore();

    let (code, handoff) = res?;
    if let Some(route) = handoff {
        match route.resolve(&config.app_url) {
            Ok(url) => println!("Continue at {url}"),
            Err(err) => {
                tracing::error!(?err, %route, "could not resolve route");
                println!("Continue at {route}");
            }
        }
    }

    Ok(code)
}

/// Send tracing output to a daily log file in the data directory. Hang on to
/// the returned guard until exit so buffered lines get flushed.
fn init_logging(config: &config::Config) -> io::Result<WorkerGuard> {
    let dir = config.data_dir();
    std::fs::create_dir_all(&dir)?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
        dir,
        "signup.log",
    ));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app. Returns the exit code and where to send
/// the user afterwards, if anywhere.
async fn run(
    mut terminal: DefaultTerminal,
    conn: Arc<EffectContext>,
) -> io::Result<(ExitCode, Option<Route>)> {
    let mut app = App::new();

    // We expect side-effectful behaviors (here, talking to the auth provider
    // and the desktop) to take place via async tasks. Once those tasks are
    // done, we read their results off of a channel. We keep track of
    // outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    // Start our event loop!
    loop {
        // First thing we do is wait for an event. This can be either external
        // input or the async result of a effect. This is an `Option<_>` because
        // we don't necessarily need to pay attention to every single piece of
        // external input.
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            tracing::trace!(?action, "handling action");

            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&conn),
                    effect,
                ));
            }
        }

        // Now that we handle the event, we re-render to display any changes the
        // app cares about.
        terminal.draw(|frame| app.render(frame))?;

        // If the message we just handled was from an outstanding effect, we
        // need to remove the completed `JoinHandle` from the list. This list
        // should never be too long (since we do this on every pass through the
        // event loop) so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // Finally, if the app indicates that it should exit, we wait for all
        // outstanding effects to finish (e.g. so the final notification gets
        // shown) before exiting the loop with the exit code from the app.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed while exiting");
                }
            }

            return Ok((code, app.handoff().cloned()));
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    conn: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run(&conn).await {
            // If the channel is closed we're shutting down, and nobody is
            // left to read the result.
            if effect_tx.send(next_action).is_err() {
                tracing::debug!("app is gone; dropping effect result");
            }
        }
    })
}
