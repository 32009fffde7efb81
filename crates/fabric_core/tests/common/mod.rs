//! Shared test plumbing: ephemeral TCP endpoints, mirroring
//! `casparian_worker`'s `random_test_port` helper. Every integration test
//! binds real `tcp://127.0.0.1:<port>` sockets rather than mocking the
//! transport.

use std::sync::atomic::{AtomicU16, Ordering};

static NEXT_PORT: AtomicU16 = AtomicU16::new(0);

/// A pseudo-random port in the ephemeral range, offset by an atomic counter
/// and the process id so concurrent test binaries don't collide.
pub fn random_test_port() -> u16 {
    let pid = std::process::id() as u16;
    let offset = NEXT_PORT.fetch_add(1, Ordering::Relaxed);
    50000u16.wrapping_add(pid.wrapping_mul(7)).wrapping_add(offset.wrapping_mul(3)) % 10000 + 50000
}

pub fn tcp_url() -> String {
    format!("tcp://127.0.0.1:{}", random_test_port())
}
