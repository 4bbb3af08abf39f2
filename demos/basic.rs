use zoolog::{debug, error, info, warn, Severity, Threshold};

fn main() {
    // First caller wins; everything here goes to stderr at DEBUG and below.
    zoolog::init(None, Threshold::Level(Severity::Debug));

    error!("backend {} unreachable", "db-1");
    warn!("retrying in {} ms", 250);
    info!("connected to {}:{}", "127.0.0.1", 2181);
    debug!("session id 0x{:x}", 0x1234_5678_u64);

    // Ignored: configuration is committed for the process lifetime.
    zoolog::init(None, Threshold::Level(Severity::Error));
    debug!("still visible at DEBUG");

    zoolog::release();
}
