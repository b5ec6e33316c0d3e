//! Timing mitigation for failure paths.
//!
//! The first failure of a call sleeps a uniformly random duration so an
//! attacker cannot tell failure causes apart by response time. The masking
//! guarantee must hold even in degraded environments, so when the OS RNG is
//! unavailable or the window is degenerate the emergency busy-loop stands
//! in for the sleep.

use std::time::{Duration, Instant};

use tracing::trace;

/// Sleep the calling thread for a uniformly random duration in
/// `[min_nanos, max_nanos]`.
///
/// Blocking and not cancellable: interrupting it would defeat the purpose.
pub(crate) fn random_delay(min_nanos: u64, max_nanos: u64) {
    if min_nanos >= max_nanos {
        // Degenerate window: configuration validation prevents this for
        // service instances, but the masking still has to happen.
        emergency_delay(Duration::from_nanos(min_nanos.max(max_nanos).max(1)));
        return;
    }

    let mut raw = [0u8; 8];
    if getrandom::getrandom(&mut raw).is_err() {
        emergency_delay(Duration::from_nanos(min_nanos.max(1)));
        return;
    }

    let span = (max_nanos - min_nanos).saturating_add(1);
    let nanos = min_nanos + u64::from_le_bytes(raw) % span;
    trace!(nanos, "delaying after failure");
    std::thread::sleep(Duration::from_nanos(nanos));
}

/// Busy-loop fallback that approximates a sleep by spinning until the
/// monotonic clock says the duration has passed. The spin counter is routed
/// through `black_box` so the loop cannot be optimized away.
pub(crate) fn emergency_delay(duration: Duration) {
    let start = Instant::now();
    let mut spins: u64 = 0;
    while start.elapsed() < duration {
        spins = std::hint::black_box(spins.wrapping_add(1));
    }
    trace!(spins, "emergency delay completed");
}
