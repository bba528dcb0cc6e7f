use embassy_time::Duration;

/// The number of cells (digits) in the display.
/// The display is a 4-digit, 8-segment display.
pub const CELL_COUNT_U8: u8 = 4;
pub const CELL_COUNT: usize = CELL_COUNT_U8 as usize;

/// The number of segments per digit in the display.
/// Each digit has 8 segments (7 segments plus a decimal point).
pub const SEGMENT_COUNT: usize = 8;

/// Outputs on one 74HC595.
pub const REGISTER_WIDTH: usize = u8::BITS as usize;

/// Duration representing one second.
pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// How long a rendered word stays lit, and then dark, in one refresh cycle.
/// Persistence of vision hides the dark half at this rate.
pub const MULTIPLEX_SLEEP: Duration = Duration::from_millis(10);

/// How many full 4-digit refreshes each scroll frame is held for.
pub const SCROLL_FRAME_REPEATS: u16 = 7;

/// Blank frames scrolled after the last token so the text leaves the display.
pub const SCROLL_TRAILING_FRAMES: usize = 5;

/// Edges closer together than this are contact bounce.
pub const BUTTON_DEBOUNCE_DELAY: Duration = Duration::from_millis(100);

/// Minimum spacing between two accepted reset presses.
pub const RESET_COOLDOWN: Duration = Duration::from_secs(5);

/// Seconds on the clock after power-up or a reset.
pub const DEADMAN_SECONDS: u16 = 99;

/// Times the alarm pattern is played once the countdown expires.
pub const ALARM_REPEATS: u16 = 10;

/// Silence between alarm patterns.
pub const ALARM_GAP: Duration = Duration::from_secs(1);

/// Scrolled across the display when the countdown expires.
pub const ALARM_TEXT: &str = "alarm";

/// Default digit pins, most significant digit first.
pub const DIGIT_PINS: [u8; CELL_COUNT] = [2, 3, 4, 5];

/// Default segment pins, a through g then the decimal point.
pub const SEGMENT_PINS: [u8; SEGMENT_COUNT] = [6, 7, 8, 9, 10, 11, 12, 13];

// Default wiring: two chained 74HC595s on the board header.
pub const LATCH_PIN: u8 = 4;
pub const DATA_PIN: u8 = 7;
pub const CLOCK_PIN: u8 = 2;
pub const SHIFT_REGISTER_COUNT: usize = 2;
pub const BUZZER_PIN: u8 = 3;
pub const BUTTON_PIN: u8 = 14;
