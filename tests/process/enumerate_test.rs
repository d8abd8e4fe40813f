/*!
 * Enumeration Tests
 * Capacity bounds and record invariants against the live process table
 */

use hostproc::{ProcessRecord, ProcessTable};
use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

#[test]
fn test_list_nonempty() {
    let records = hostproc::list(128);
    if cfg!(any(target_os = "linux", target_os = "macos", windows)) {
        assert!(!records.is_empty());
        assert!(records[0].display_name.is_some());
        assert!(records[0].is_running());
    }
}

#[test]
fn test_list_zero_capacity() {
    assert!(hostproc::list(0).is_empty());
    assert_eq!(hostproc::list_into(&mut []), 0);
}

#[test]
fn test_no_zero_pids() {
    let records = hostproc::list(usize::MAX);
    assert!(records.iter().all(|r| r.pid > 0));
}

#[test]
fn test_pids_unique_within_snapshot() {
    let records = hostproc::list(usize::MAX);
    let unique: HashSet<_> = records.iter().map(|r| r.pid).collect();
    assert_eq!(unique.len(), records.len());
}

#[cfg(any(target_os = "linux", target_os = "macos", windows))]
#[test]
fn test_list_contains_self() {
    let me = std::process::id();
    assert!(hostproc::list(usize::MAX).iter().any(|r| r.pid == me));
}

#[test]
fn test_list_into_respects_slice() {
    let mut dest = vec![ProcessRecord::default(); 3];
    let written = hostproc::list_into(&mut dest);

    assert!(written <= 3);
    assert!(dest[..written].iter().all(|r| r.pid > 0));
    assert!(dest[written..].iter().all(|r| *r == ProcessRecord::default()));
}

#[test]
fn test_list_within_deadline() {
    let records = ProcessTable::new()
        .list_within(16, Duration::from_secs(30))
        .unwrap();
    assert!(records.len() <= 16);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_list_never_exceeds_capacity(capacity in 0usize..64) {
        let records = hostproc::list(capacity);
        prop_assert!(records.len() <= capacity);
        prop_assert!(records.iter().all(|r| r.pid != 0));
    }
}
