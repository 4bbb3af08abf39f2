#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

use zoolog::Threshold;

// Global lock to serialize tests (logger has global state)
pub fn test_lock() -> &'static Mutex<()> {
    static L: OnceLock<Mutex<()>> = OnceLock::new();
    L.get_or_init(|| Mutex::new(()))
}

// Shared buffer for all tests in one binary (the sink is committed once)
fn shared_buf() -> &'static Arc<Mutex<Vec<u8>>> {
    static BUF: OnceLock<Arc<Mutex<Vec<u8>>>> = OnceLock::new();
    BUF.get_or_init(|| Arc::new(Mutex::new(Vec::new())))
}

#[derive(Clone)]
struct Mem(Arc<Mutex<Vec<u8>>>);
impl Write for Mem {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Configures the process logger with an in-memory sink. The threshold the
/// first call in a test binary passes wins for that whole binary.
pub fn init_mem_logger(threshold: Threshold) -> Arc<Mutex<Vec<u8>>> {
    let buf = shared_buf().clone();
    zoolog::init(Some(Box::new(Mem(buf.clone()))), threshold);
    buf
}

/// Drop everything captured so far (including the init announcement).
/// # Panics
pub fn clear(buf: &Arc<Mutex<Vec<u8>>>) {
    buf.lock().unwrap().clear();
}

/// Extract lines from buffer
/// # Panics
pub fn lines_from(buf: &Arc<Mutex<Vec<u8>>>) -> Vec<String> {
    let bytes = buf.lock().unwrap().clone();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}

/// Anchored shape of one rendered line:
/// `timestamp:pid(0xtid):LEVEL@location@line: message`
pub const LINE_RE: &str = r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2},\d{3}:\d+\(0x[0-9a-f]+\):ZOO_(ERROR|WARN|INFO|DEBUG)@[\w:]+@\d+: (.*)$";
