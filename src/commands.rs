//! One-shot commands run straight from the command line

use crate::backend::error::BackendError;
use crate::backend::{Backend, fetch_dashboard};
use crate::config::Settings;
use crate::model::{ManualCommand, PowerStatus, TargetMode};
use crate::session::headless_mode::summary_line;
use crate::ui::UIConfig;
use crate::ui::dashboard::DashboardState;
use crate::ui::dashboard::utils::history_row_cells;

/// History rows printed by `status`
const STATUS_HISTORY_ROWS: usize = 10;

/// Polls once and renders the reconciled dashboard as text.
pub async fn status(
    backend: &dyn Backend,
    settings: &Settings,
) -> Result<Vec<String>, BackendError> {
    let data = fetch_dashboard(backend, settings.control_model).await?;

    let mut state = DashboardState::new(
        settings.environment.clone(),
        UIConfig::new(false, settings.control_model, settings.history_filter),
    );
    state.apply_poll(&data);

    let mut lines = vec![summary_line(&state)];
    lines.push(format!("Riwayat: {} baris", state.history.len()));
    lines.extend(
        state
            .history
            .iter()
            .take(STATUS_HISTORY_ROWS)
            .map(|record| history_row_cells(record).join(" | ")),
    );
    Ok(lines)
}

pub async fn set_mode(backend: &dyn Backend, mode: TargetMode) -> Result<(), BackendError> {
    backend.set_mode(mode).await
}

pub async fn control(backend: &dyn Backend, command: ManualCommand) -> Result<(), BackendError> {
    backend.manual_control(command).await
}

/// Flips the ON/OFF switch based on what the backend reports right now.
pub async fn toggle(
    backend: &dyn Backend,
    settings: &Settings,
) -> Result<PowerStatus, BackendError> {
    let data = fetch_dashboard(backend, settings.control_model).await?;
    let target = data.system.power().toggled();
    backend.toggle_system(target).await?;
    Ok(target)
}
