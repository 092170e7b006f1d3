pub mod cli_consts {
    //! Dashboard Configuration Constants
    //!
    //! This module contains the configuration constants for the dashboard,
    //! organized by functional area.

    // =============================================================================
    // QUEUE CONFIGURATION
    // =============================================================================

    /// The maximum number of events to keep in the activity logs.
    pub const MAX_ACTIVITY_LOGS: usize = 100;

    /// Maximum number of buffered events from request workers
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // UI CONFIGURATION
    // =============================================================================

    /// How long the splash screen stays up before the dashboard appears (milliseconds)
    pub const SPLASH_DURATION_MS: u64 = 1500;

    /// Poll interval for terminal input (milliseconds)
    pub const INPUT_POLL_MS: u64 = 100;

    // =============================================================================
    // NETWORK CONFIGURATION
    // =============================================================================

    /// HTTP client timeouts
    pub mod http {
        use std::time::Duration;

        /// Connection establishment timeout (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        /// Whole-request timeout (seconds)
        /// Stock prediction and QAOA can take a while on the backend
        pub const REQUEST_TIMEOUT_SECS: u64 = 120;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }

        pub const fn request_timeout() -> Duration {
            Duration::from_secs(REQUEST_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // ANALYSIS DEFAULTS
    // =============================================================================

    /// Demo inputs used when the user does not supply their own
    pub mod defaults {
        /// Risk-aversion parameter of both optimizers
        pub const RISK_AVERSION: f64 = 0.5;

        /// QAOA circuit layers
        pub const QAOA_REPS: u32 = 1;

        /// Samples in the synthetic FFT series
        pub const SERIES_LENGTH: usize = 64;

        /// The FFT endpoint rejects shorter series
        pub const MIN_SERIES_LENGTH: usize = 8;

        pub const TICKER: &str = "AAPL";

        pub const PERIOD: &str = "1y";

        pub const SIMULATION_TICKERS: [&str; 4] = ["AAPL", "GOOGL", "MSFT", "AMZN"];

        /// Expected returns of the four demo assets
        pub const EXPECTED_RETURNS: [f64; 4] = [0.10, 0.12, 0.08, 0.15];

        /// Covariance of the four demo assets
        pub const COVARIANCE: [[f64; 4]; 4] = [
            [0.10, 0.02, 0.04, 0.00],
            [0.02, 0.08, 0.02, 0.01],
            [0.04, 0.02, 0.09, 0.02],
            [0.00, 0.01, 0.02, 0.12],
        ];
    }
}
