/*!
 * Event Queue Tests
 * Cross-thread posting, blocking waits and capacity limits
 */

use hostproc::{Event, EventError, EventKind, EventQueue, HostprocConfig};
use pretty_assertions::assert_eq;
use std::thread;
use std::time::{Duration, Instant};

#[test]
fn test_capacity_from_config() {
    let config = HostprocConfig::default().with_event_capacity(3);
    let queue = EventQueue::new(config.event_capacity);

    for i in 0..3 {
        queue.post(&i.to_string(), EventKind::Custom, b"x").unwrap();
    }
    assert_eq!(
        queue.post("overflow", EventKind::Custom, b"x"),
        Err(EventError::QueueFull(3))
    );
}

#[test]
fn test_wait_receives_from_other_thread() {
    let queue = EventQueue::new(4);
    let producer = queue.clone();

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        producer.push(Event::custom("ready", b"payload")).unwrap();
    });

    let event = queue.wait(Duration::from_secs(5)).expect("event should arrive");
    assert_eq!(event.id, "ready");
    assert_eq!(event.kind, EventKind::Custom);
    assert_eq!(&event.payload[..], b"payload");
    handle.join().unwrap();
}

#[test]
fn test_wait_times_out_when_empty() {
    let queue = EventQueue::new(1);
    let start = Instant::now();
    assert!(queue.wait(Duration::from_millis(30)).is_none());
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[test]
fn test_fifo_across_producers() {
    let queue = EventQueue::new(64);
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let producer = queue.clone();
            thread::spawn(move || {
                for i in 0..8 {
                    producer
                        .post(&format!("{}-{}", t, i), EventKind::Io, &[i as u8])
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(queue.len(), 32);
    // Per-producer order survives interleaving
    let mut last_seen = [None::<u8>; 4];
    while let Some(event) = queue.poll() {
        let producer: usize = event.id.split('-').next().unwrap().parse().unwrap();
        let seq = event.payload[0];
        if let Some(prev) = last_seen[producer] {
            assert!(seq > prev);
        }
        last_seen[producer] = Some(seq);
    }
}
