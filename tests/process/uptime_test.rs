/*!
 * Uptime and Yield Tests
 */

use hostproc::UptimeSource;

#[test]
fn test_uptime_non_decreasing() {
    let first = hostproc::uptime();
    hostproc::yield_now();
    let second = hostproc::uptime();

    assert_eq!(first.source, second.source);
    match first.source {
        UptimeSource::BootClock => assert!(second.seconds >= first.seconds),
        UptimeSource::WallClock => {
            assert!(first.seconds > 0);
            assert!(second.seconds > 0);
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "macos", windows))]
#[test]
fn test_native_uptime_is_boot_clock() {
    assert!(hostproc::uptime().is_true_uptime());
}

#[test]
fn test_yield_repeatedly() {
    for _ in 0..3 {
        hostproc::yield_now();
    }
}
