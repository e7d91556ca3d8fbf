//! Control-state derivation
//!
//! Turns the state fields of a poll into what the operator sees: which mode
//! label is shown, which control is highlighted and whether the manual panel
//! is available. Everything here is a pure function of the last successful
//! poll.

use crate::consts::cli_consts::polling;
use crate::model::{ControlMode, PowerStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which control surface the backend exposes.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ControlModel {
    /// Older backend: a single ON/OFF switch.
    Binary,
    /// AUTO / MANUAL / OFF with manual OPEN/CLOSE commands.
    #[default]
    TriState,
}

impl ControlModel {
    pub fn default_poll_interval(&self) -> Duration {
        match self {
            ControlModel::Binary => Duration::from_millis(polling::BINARY_INTERVAL_MS),
            ControlModel::TriState => Duration::from_millis(polling::TRI_STATE_INTERVAL_MS),
        }
    }
}

/// System state as confirmed by the last successful poll.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SystemState {
    Binary(PowerStatus),
    TriState {
        system: PowerStatus,
        mode: ControlMode,
    },
}

impl SystemState {
    /// Builds the state from the `/data` state fields.
    ///
    /// A missing `flask_system_status` reads as ON (the backend boots ON) and a
    /// missing `control_mode` reads as AUTO.
    pub fn from_fields(
        model: ControlModel,
        system: Option<PowerStatus>,
        mode: Option<ControlMode>,
    ) -> Self {
        let system = system.unwrap_or(PowerStatus::On);
        match model {
            ControlModel::Binary => SystemState::Binary(system),
            ControlModel::TriState => SystemState::TriState {
                system,
                mode: mode.unwrap_or(ControlMode::Auto),
            },
        }
    }

    pub fn power(&self) -> PowerStatus {
        match self {
            SystemState::Binary(system) => *system,
            SystemState::TriState { system, .. } => *system,
        }
    }

    pub fn mode_display(&self) -> ModeDisplay {
        match *self {
            // OFF + AUTO means fully deactivated; must win over the AUTO branch
            SystemState::TriState {
                system: PowerStatus::Off,
                mode: ControlMode::Auto,
            } => ModeDisplay::SystemOff,
            SystemState::TriState {
                mode: ControlMode::Manual,
                ..
            } => ModeDisplay::Manual,
            SystemState::TriState { .. } => ModeDisplay::Auto,
            SystemState::Binary(PowerStatus::On) => ModeDisplay::SystemOn,
            SystemState::Binary(PowerStatus::Off) => ModeDisplay::SystemOff,
        }
    }

    pub fn active_control(&self) -> ActiveControl {
        match self {
            SystemState::Binary(system) => ActiveControl::Toggle(*system),
            SystemState::TriState { .. } => match self.mode_display() {
                ModeDisplay::Manual => ActiveControl::Manual,
                ModeDisplay::SystemOff => ActiveControl::Off,
                _ => ActiveControl::Auto,
            },
        }
    }

    pub fn manual_panel_visible(&self) -> bool {
        self.mode_display() == ModeDisplay::Manual
    }
}

/// The mode indicator shown in the sidebar and header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModeDisplay {
    Auto,
    Manual,
    SystemOff,
    /// Binary backend switched ON.
    SystemOn,
    /// No poll has completed yet.
    Connecting,
    /// Last poll failed.
    Disconnected,
}

impl ModeDisplay {
    pub fn label(&self) -> &'static str {
        match self {
            ModeDisplay::Auto => "MODE AUTO",
            ModeDisplay::Manual => "MODE MANUAL",
            ModeDisplay::SystemOff => "SISTEM MATI",
            ModeDisplay::SystemOn => "SISTEM AKTIF",
            ModeDisplay::Connecting => "MENGHUBUNGKAN",
            ModeDisplay::Disconnected => "TIDAK TERHUBUNG",
        }
    }

    /// Operator hint under the controls, if the mode has one.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            ModeDisplay::Auto => Some("Sistem berjalan otomatis menggunakan sensor."),
            ModeDisplay::Manual => Some("Kontrol manual aktif. Gunakan tombol di bawah."),
            ModeDisplay::SystemOff => Some("Sistem dinonaktifkan. Sensor dan motor mati."),
            ModeDisplay::SystemOn => Some("Sistem aktif."),
            ModeDisplay::Connecting | ModeDisplay::Disconnected => None,
        }
    }
}

/// The highlighted control. Exactly one is active at a time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ActiveControl {
    Auto,
    Manual,
    Off,
    /// Binary backend: the single switch, showing its confirmed position.
    Toggle(PowerStatus),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(system: PowerStatus, mode: ControlMode) -> SystemState {
        SystemState::from_fields(ControlModel::TriState, Some(system), Some(mode))
    }

    #[test]
    // OFF + AUTO is the deactivated system, not AUTO.
    fn test_off_auto_is_system_off() {
        let state = tri(PowerStatus::Off, ControlMode::Auto);
        assert_eq!(state.mode_display(), ModeDisplay::SystemOff);
        assert_eq!(state.mode_display().label(), "SISTEM MATI");
        assert_eq!(state.active_control(), ActiveControl::Off);
        assert!(!state.manual_panel_visible());
    }

    #[test]
    fn test_manual_mode_shows_manual_panel() {
        for system in [PowerStatus::On, PowerStatus::Off] {
            let state = tri(system, ControlMode::Manual);
            assert_eq!(state.mode_display(), ModeDisplay::Manual);
            assert_eq!(state.active_control(), ActiveControl::Manual);
            assert!(state.manual_panel_visible());
        }
    }

    #[test]
    fn test_on_auto_is_auto() {
        let state = tri(PowerStatus::On, ControlMode::Auto);
        assert_eq!(state.mode_display(), ModeDisplay::Auto);
        assert_eq!(state.active_control(), ActiveControl::Auto);
        assert!(!state.manual_panel_visible());
    }

    #[test]
    fn test_missing_fields_fall_back_to_on_auto() {
        let state = SystemState::from_fields(ControlModel::TriState, None, None);
        assert_eq!(
            state,
            SystemState::TriState {
                system: PowerStatus::On,
                mode: ControlMode::Auto
            }
        );
    }

    #[test]
    fn test_binary_model_ignores_control_mode() {
        let state = SystemState::from_fields(
            ControlModel::Binary,
            Some(PowerStatus::Off),
            Some(ControlMode::Manual),
        );
        assert_eq!(state, SystemState::Binary(PowerStatus::Off));
        assert_eq!(state.mode_display(), ModeDisplay::SystemOff);
        assert_eq!(state.active_control(), ActiveControl::Toggle(PowerStatus::Off));
        assert!(!state.manual_panel_visible());
    }

    #[test]
    fn test_parse_control_model() {
        assert_eq!("tri-state".parse::<ControlModel>().unwrap(), ControlModel::TriState);
        assert_eq!("BINARY".parse::<ControlModel>().unwrap(), ControlModel::Binary);
        assert_eq!(
            ControlModel::TriState.default_poll_interval(),
            Duration::from_secs(2)
        );
        assert_eq!(
            ControlModel::Binary.default_poll_interval(),
            Duration::from_secs(5)
        );
    }
}
