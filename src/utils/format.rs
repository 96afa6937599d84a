//! Display formatting for durations

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Format milliseconds as "HH:MM:SS:CC" (centiseconds), hours wrapping at 24
pub fn format_time(ms: u64) -> String {
    let centis = (ms % MS_PER_SECOND) / 10;
    let seconds = (ms / MS_PER_SECOND) % 60;
    let minutes = (ms / MS_PER_MINUTE) % 60;
    let hours = (ms / MS_PER_HOUR) % 24;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, seconds, centis)
}
