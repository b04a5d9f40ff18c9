// ==============================================
// CONCURRENT DECORATOR TESTS (integration)
// ==============================================

use std::sync::{Arc, Barrier};
use std::thread;

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::concurrent::Concurrent;
use evictkit::policy::lru::LruCache;
use evictkit::traits::ConcurrentCache;

const THREADS: u64 = 8;
const OPS_PER_THREAD: u64 = 2_000;

fn assert_shareable<C: ConcurrentCache>(_: &C) {}

#[test]
fn mixed_workload_keeps_cache_consistent() {
    for policy in CachePolicy::ALL {
        let cache = Arc::new(CacheBuilder::new(128).build_concurrent::<u64, u64>(policy));
        assert_shareable(&*cache);
        let barrier = Arc::new(Barrier::new(THREADS as usize));

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..OPS_PER_THREAD {
                        let key = (t * 31 + i) % 512;
                        match i % 5 {
                            0 | 1 => {
                                cache.add(key, i);
                            },
                            2 => {
                                cache.get(&key);
                            },
                            3 => {
                                cache.remove(&key);
                            },
                            _ => {
                                cache.pop();
                            },
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let guard = cache.lock();
        assert!(guard.len() <= 128, "{} exceeded bound", policy);
        guard.check_invariants().unwrap();
    }
}

#[test]
fn disjoint_writers_are_all_visible_when_unbounded() {
    let cache = Arc::new(Concurrent::new(LruCache::<u64, u64>::new(0)));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..OPS_PER_THREAD {
                    cache.add(t * OPS_PER_THREAD + i, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.len() as u64, THREADS * OPS_PER_THREAD);
    for t in 0..THREADS {
        assert_eq!(cache.get(&(t * OPS_PER_THREAD + 7)), Some(7));
    }
}

#[test]
fn concurrent_clear_leaves_cache_usable() {
    let cache = Arc::new(CacheBuilder::new(16).build_concurrent::<u32, u32>(CachePolicy::Fifo));

    let writer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..5_000 {
                cache.add(i, i);
            }
        })
    };
    let clearer = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for _ in 0..100 {
                cache.clear();
            }
        })
    };
    writer.join().unwrap();
    clearer.join().unwrap();

    assert!(cache.len() <= 16);
    cache.add(99_999, 1);
    assert_eq!(cache.get(&99_999), Some(1));
}

#[test]
fn lock_makes_compound_operations_atomic() {
    let cache = Arc::new(Concurrent::new(LruCache::<&'static str, u64>::new(4)));
    cache.add("counter", 0);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..500 {
                    let mut guard = cache.lock();
                    if let Some(v) = guard.get_mut(&"counter") {
                        *v += 1;
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.get(&"counter"), Some(THREADS * 500));
}
