//! Deliberate crash for exercising crash-reporting tooling.

use fibpool_core::Reporter;

/// Notice emitted right before the fault.
pub const CRASH_NOTICE: &str = "Triggering intentional crash...";

/// Divide by a zero the compiler cannot see. Never returns.
///
/// The division panics; the panic unwinds out of `main` and the process
/// exits with a non-zero status.
pub fn induce_fault(reporter: &Reporter) -> ! {
    reporter.report(CRASH_NOTICE);
    tracing::error!("Inducing division-by-zero fault");

    let divisor = std::hint::black_box(0u32);
    let quotient = std::hint::black_box(1u32 / divisor);

    tracing::error!(quotient, "Division by zero did not fault, aborting");
    std::process::abort()
}
