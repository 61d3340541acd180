//! Constants used throughout the overlay

/// Host probed when none is configured
pub const DEFAULT_HOST: &str = "google.com";

/// Latency below this is shown green (milliseconds)
pub const DEFAULT_GREEN_THRESHOLD_MS: u32 = 50;

/// Latency below this (and at or above green) is shown yellow (milliseconds)
pub const DEFAULT_YELLOW_THRESHOLD_MS: u32 = 100;

/// Period between two sampling ticks in milliseconds
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 1000;

/// How long a single probe may wait for an echo reply in milliseconds
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 4000;

/// Extra time granted to the ping process beyond its own timeout before it is killed
pub const PROBE_KILL_GRACE_MS: u64 = 1000;

/// How often a running ping process is polled for completion
pub const PROBE_POLL_INTERVAL_MS: u64 = 10;

/// Distance kept between the overlay and the screen edges
pub const CORNER_MARGIN: u32 = 5;

/// Approximate glyph width of the overlay font
pub const GLYPH_WIDTH: u32 = 8;

/// Height of the overlay label
pub const LINE_HEIGHT: u32 = 20;

/// Horizontal padding on each side of the overlay label
pub const LABEL_PADDING_X: u32 = 8;

/// Vertical padding above and below the overlay label
pub const LABEL_PADDING_Y: u32 = 3;

/// Spinner tick interval for the terminal overlay in milliseconds
pub const SPINNER_TICK_INTERVAL_MS: u64 = 120;

/// Directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "ping-overlay";

/// Settings file name
pub const CONFIG_FILE_NAME: &str = "settings.json";

/// Default screen size assumed by the terminal renderer
pub const DEFAULT_SCREEN_WIDTH: u32 = 1920;
pub const DEFAULT_SCREEN_HEIGHT: u32 = 1080;

/// Accepted range for threshold input in the settings editor (milliseconds)
pub const THRESHOLD_INPUT_MIN_MS: u32 = 1;
pub const THRESHOLD_INPUT_MAX_MS: u32 = 10_000;
