//! Edge case tests for the bounded queue
//!
//! Allocation failures, bounded waits and unusual value types.

#[cfg(test)]
mod tests {
    use crate::queue::api::{BoundedQueue, QueueError};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_unreservable_capacity_fails_with_allocation_error() {
        match BoundedQueue::<String>::new(usize::MAX) {
            Err(QueueError::Allocation { capacity, reason }) => {
                assert_eq!(capacity, usize::MAX);
                assert!(!reason.is_empty());
            }
            Ok(_) => panic!("Expected Allocation error for an impossible capacity"),
        }
    }

    #[test]
    fn test_dequeue_timeout_expires_on_empty_queue() {
        let queue: BoundedQueue<String> = BoundedQueue::new(2).unwrap();

        let start = Instant::now();
        assert_eq!(queue.dequeue_timeout(Duration::from_millis(30)), None);
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_enqueue_timeout_returns_value_when_still_full() {
        let queue = BoundedQueue::new(1).unwrap();
        queue.enqueue("first".to_string());

        let start = Instant::now();
        let result = queue.enqueue_timeout("second".to_string(), Duration::from_millis(30));
        assert_eq!(result, Err("second".to_string()));
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue(), "first");
    }

    #[test]
    fn test_dequeue_timeout_picks_up_late_value() {
        let queue = Arc::new(BoundedQueue::new(1).unwrap());

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.enqueue(7);
            })
        };

        assert_eq!(queue.dequeue_timeout(Duration::from_secs(5)), Some(7));
        producer.join().unwrap();
    }

    #[test]
    fn test_enqueue_timeout_succeeds_once_space_frees() {
        let queue = Arc::new(BoundedQueue::new(1).unwrap());
        queue.enqueue(1);

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.dequeue()
            })
        };

        assert_eq!(queue.enqueue_timeout(2, Duration::from_secs(5)), Ok(()));
        assert_eq!(consumer.join().unwrap(), 1);
        assert_eq!(queue.dequeue(), 2);
    }

    #[test]
    fn test_zero_timeout_behaves_like_try() {
        let queue = BoundedQueue::new(1).unwrap();
        assert_eq!(queue.dequeue_timeout(Duration::ZERO), None::<u8>);
        assert_eq!(queue.enqueue_timeout(5u8, Duration::ZERO), Ok(()));
        assert_eq!(queue.enqueue_timeout(6u8, Duration::ZERO), Err(6));
        assert_eq!(queue.dequeue_timeout(Duration::ZERO), Some(5));
    }

    #[test]
    fn test_unbounded_timeout_does_not_overflow() {
        let queue = BoundedQueue::new(1).unwrap();
        assert_eq!(queue.enqueue_timeout("x", Duration::MAX), Ok(()));
        assert_eq!(queue.dequeue_timeout(Duration::MAX), Some("x"));
    }

    #[test]
    fn test_large_and_empty_values() {
        let queue = BoundedQueue::new(2).unwrap();
        let large = "9".repeat(1024 * 1024);

        queue.enqueue(String::new());
        queue.enqueue(large.clone());

        assert_eq!(queue.dequeue(), "");
        assert_eq!(queue.dequeue().len(), large.len());
    }

    #[test]
    fn test_zero_sized_values() {
        let queue = BoundedQueue::new(3).unwrap();
        queue.enqueue(());
        queue.enqueue(());
        assert_eq!(queue.len(), 2);
        queue.dequeue();
        queue.dequeue();
        assert!(queue.is_empty());
    }
}
