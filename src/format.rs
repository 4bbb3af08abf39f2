//! Timestamp and message rendering.
//!
//! Both renderers write only into the buffer they are handed, so many
//! threads can format concurrently without synchronization.

use core::fmt::{self, Write};

use time::{OffsetDateTime, UtcOffset};

use crate::scratch::{MESSAGE_CAPACITY, TIMESTAMP_CAPACITY};

/// `fmt::Write` adapter that truncates at `limit` bytes instead of growing
/// the buffer. Once full it swallows the rest of the input; truncation cuts
/// on a UTF-8 character boundary.
struct Bounded<'a> {
    buf: &'a mut String,
    limit: usize,
    full: bool,
}

impl Write for Bounded<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.full {
            return Ok(());
        }
        let remaining = self.limit.saturating_sub(self.buf.len());
        if s.len() <= remaining {
            self.buf.push_str(s);
        } else {
            let mut end = remaining;
            while end > 0 && !s.is_char_boundary(end) {
                end -= 1;
            }
            self.buf.push_str(&s[..end]);
            self.full = true;
        }
        Ok(())
    }
}

/// Renders `when` as `YYYY-MM-DD HH:MM:SS,mmm` — the log4j ISO8601 shape,
/// zero-padded, with a comma before the millisecond field.
pub fn render_timestamp(buf: &mut String, when: OffsetDateTime) {
    let mut w = Bounded {
        buf,
        limit: TIMESTAMP_CAPACITY,
        full: false,
    };
    let _ = write!(
        w,
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02},{:03}",
        when.year(),
        u8::from(when.month()),
        when.day(),
        when.hour(),
        when.minute(),
        when.second(),
        when.millisecond(),
    );
}

/// Renders the call site's format arguments, truncating at the message
/// buffer capacity.
pub fn render_message(buf: &mut String, args: fmt::Arguments<'_>) {
    let mut w = Bounded {
        buf,
        limit: MESSAGE_CAPACITY,
        full: false,
    };
    let _ = w.write_fmt(args);
}

/// Wall-clock time in the local calendar, falling back to UTC when the
/// local offset cannot be determined.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}
