//! Headless mode execution

use super::{
    SessionData,
    setup::stop_workers,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::events::{Event, EventType, StateUpdate};
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use std::error::Error;

/// One-line view of the reconciled dashboard
pub fn summary_line(state: &DashboardState) -> String {
    let readings = &state.readings;
    let mut line = format!(
        "[{}] {} | Suhu {} °C | Kelembaban {} % | Hujan {} | Cahaya {} | Jemuran {}",
        state.mode_display().label(),
        readings.timestamp,
        readings.temperature,
        readings.humidity,
        readings.rain_value,
        readings.light_value,
        readings.rack_status,
    );
    if let Some(status) = &state.status_message {
        line.push_str(" | ");
        line.push_str(status);
    }
    line
}

/// Lines printed for one worker event. Log-worthy events print as-is; a
/// successful poll prints the refreshed summary.
fn console_lines(state: &mut DashboardState, event: Event) -> Vec<String> {
    let mut lines = Vec::new();
    if event.should_display() {
        lines.push(event.to_string());
    }
    let is_poll = event.event_type == EventType::StateChange
        && matches!(event.update, Some(StateUpdate::Poll(_)));

    state.add_event(event);
    state.update();

    if is_poll {
        lines.push(summary_line(state));
    }
    lines
}

/// Runs the application in headless mode
///
/// This function handles:
/// 1. Console event logging
/// 2. Ctrl+C shutdown handling
/// 3. Event loop management
///
/// # Arguments
/// * `session` - Session data from setup
///
/// # Returns
/// * `Ok(())` - Headless mode completed successfully
/// * `Err` - Headless mode failed
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.environment.server_url());

    // Trigger shutdown on Ctrl+C
    let shutdown_sender_clone = session.shutdown_sender.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_sender_clone.send(());
        }
    });

    let mut shutdown_receiver = session.shutdown_sender.subscribe();
    let mut state = DashboardState::new(
        session.environment.clone(),
        UIConfig::new(
            false,
            session.settings.control_model,
            session.settings.history_filter,
        ),
    );

    // Event loop: log events to console until shutdown
    loop {
        tokio::select! {
            Some(event) = session.event_receiver.recv() => {
                for line in console_lines(&mut state, event) {
                    println!("{}", line);
                }
            }
            _ = shutdown_receiver.recv() => {
                break;
            }
        }
    }

    // Wait for workers to finish
    print_session_shutdown();
    drop(session.command_sender);
    stop_workers(&session.shutdown_sender, session.join_handles).await;
    print_session_exit_success();

    Ok(())
}
