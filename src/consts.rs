pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! Constants for the poller, the command dispatcher and the terminal
    //! layout, grouped by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Buffer size of the worker -> UI event channel
    pub const EVENT_QUEUE_SIZE: usize = 100;

    /// Buffer size of the UI -> dispatcher command channel
    pub const COMMAND_QUEUE_SIZE: usize = 16;

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Snapshot polling against `/data`
    pub mod polling {
        use std::time::Duration;

        /// Poll interval for the AUTO/MANUAL/OFF backend (milliseconds)
        pub const TRI_STATE_INTERVAL_MS: u64 = 2_000;

        /// Poll interval for the legacy ON/OFF backend (milliseconds)
        pub const BINARY_INTERVAL_MS: u64 = 5_000;

        /// Lower bound accepted for a configured interval (milliseconds)
        pub const MIN_INTERVAL_MS: u64 = 250;

        /// TCP connect timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 5;

        /// Whole-request timeout (seconds)
        pub const REQUEST_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // COMMAND CONFIGURATION
    // =============================================================================

    /// Operator commands sent to the backend
    pub mod commands {
        use std::time::Duration;

        /// Delay between an accepted OPEN/CLOSE and the follow-up poll (milliseconds).
        /// Gives the actuator time to move before its status is read back.
        pub const MANUAL_SETTLE_MS: u64 = 500;

        pub const fn manual_settle_delay() -> Duration {
            Duration::from_millis(MANUAL_SETTLE_MS)
        }
    }

    // =============================================================================
    // DISPLAY CONFIGURATION
    // =============================================================================

    /// Terminal layout and placeholder text
    pub mod display {
        /// Terminal width (columns) at or below which the sidebar hides behind the menu trigger
        pub const SIDEBAR_COLLAPSE_WIDTH: u16 = 100;

        /// Sidebar width (columns) when shown
        pub const SIDEBAR_WIDTH: u16 = 28;

        /// Shown in every reading slot when the server sends no latest reading
        pub const PLACEHOLDER: &str = "N/A";

        /// Single table row shown when the history is empty
        pub const EMPTY_HISTORY: &str = "Belum ada data";

        /// Footer of the alert modal; any key or click dismisses it
        pub const ALERT_DISMISS_HINT: &str = "Tekan tombol apa saja untuk menutup";

        /// How long the splash screen stays up before the dashboard opens (milliseconds)
        pub const SPLASH_DURATION_MS: u64 = 1_500;
    }
}
