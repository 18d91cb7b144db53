//! Concurrent voting and poll replacement

use std::sync::{Arc, Barrier};
use std::thread;

use poll_core::{Poll, PollError, PollManager, VoteInfo};

const THREADS: usize = 16;

/// Run `f(i)` on `THREADS` threads released together, collecting results
fn race<T, F>(f: F) -> Vec<T>
where
    T: Send + 'static,
    F: Fn(usize) -> T + Send + Sync + 'static,
{
    let barrier = Arc::new(Barrier::new(THREADS));
    let f = Arc::new(f);

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            let f = Arc::clone(&f);
            thread::spawn(move || {
                barrier.wait();
                f(i)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().expect("voter thread panicked"))
        .collect()
}

#[test]
fn test_same_voter_same_option_accepts_once() {
    for _ in 0..50 {
        let poll = Arc::new(Poll::new(["cats", "dogs"]).unwrap());

        let shared = Arc::clone(&poll);
        let results = race(move |_| shared.vote(&VoteInfo::new("alice", "cats").unwrap()));

        assert_eq!(results.iter().filter(|accepted| **accepted).count(), 1);
        assert_eq!(poll.ballot_count(), 1);
        assert_eq!(poll.voters("cats").unwrap(), vec!["alice".to_string()]);
    }
}

#[test]
fn test_same_voter_different_options_accepts_once() {
    for _ in 0..50 {
        let poll = Arc::new(Poll::new(["a", "b", "c", "d"]).unwrap());

        let shared = Arc::clone(&poll);
        let results = race(move |i| {
            let choice = shared.options()[i % shared.options().len()].clone();
            shared.vote(&VoteInfo::new("bob", choice).unwrap())
        });

        assert_eq!(results.iter().filter(|accepted| **accepted).count(), 1);
        assert_eq!(poll.ballot_count(), 1);

        let listed: usize = poll
            .options()
            .iter()
            .map(|option| poll.voters(option).unwrap().len())
            .sum();
        assert_eq!(listed, 1);
    }
}

#[test]
fn test_distinct_voters_all_accepted() {
    let poll = Arc::new(Poll::new(["cats", "dogs"]).unwrap());

    let shared = Arc::clone(&poll);
    let results = race(move |i| {
        let choice = if i % 2 == 0 { "cats" } else { "dogs" };
        shared.vote(&VoteInfo::new(format!("viewer{}", i), choice).unwrap())
    });

    assert!(results.iter().all(|accepted| *accepted));
    assert_eq!(poll.ballot_count(), THREADS);
    assert_eq!(poll.voters("cats").unwrap().len(), THREADS / 2);
    assert_eq!(poll.voters("dogs").unwrap().len(), THREADS / 2);
}

#[test]
fn test_concurrent_enable_reports_one_change() {
    for _ in 0..50 {
        let manager = Arc::new(PollManager::new());
        manager.start_new_poll(["a", "b"]).unwrap();
        manager.set_voting_enabled(false).unwrap();

        let shared = Arc::clone(&manager);
        let results = race(move |_| shared.set_voting_enabled(true));

        let changed = results.iter().filter(|r| r.is_ok()).count();
        let already = results
            .iter()
            .filter(|r| **r == Err(PollError::AlreadyEnabled))
            .count();
        assert_eq!(changed, 1);
        assert_eq!(already, THREADS - 1);
    }
}

#[test]
fn test_votes_during_poll_replacement_land_on_one_poll() {
    let manager = Arc::new(PollManager::new());
    manager.start_new_poll(["yes", "no"]).unwrap();
    let first = manager.current_poll().unwrap();

    let shared = Arc::clone(&manager);
    let results = race(move |i| {
        if i == 0 {
            shared.start_new_poll(["yes", "no"]).map(|_| ())
        } else {
            shared.cast_vote(&format!("viewer{}", i), "yes").map(|_| ())
        }
    });
    assert!(results.iter().all(|r| r.is_ok()));

    let second = manager.current_poll().unwrap();
    assert!(!Arc::ptr_eq(&first, &second));

    // Every vote was recorded exactly once, in whichever poll it snapshotted
    for i in 1..THREADS {
        let name = format!("viewer{}", i);
        assert!(first.has_voted(&name) ^ second.has_voted(&name), "{} lost or doubled", name);
    }
    assert_eq!(first.ballot_count() + second.ballot_count(), THREADS - 1);
}
