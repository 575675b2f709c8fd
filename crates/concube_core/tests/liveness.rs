//! Starvation freedom: every caller finishes in bounded time, even while
//! other groups keep the cube busy.

use concube_core::{Cube, Face};
use crossbeam_channel::{unbounded, RecvTimeoutError};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const PATIENCE: Duration = Duration::from_secs(20);

#[test]
fn test_mixed_load_completes() {
    let cube = Cube::new(4).unwrap();
    let (done_tx, done_rx) = unbounded();
    let threads = 12;

    thread::scope(|s| {
        for seed in 0..threads {
            let cube = &cube;
            let done_tx = done_tx.clone();
            s.spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(1000 + seed);
                for _ in 0..150 {
                    if rng.gen_ratio(1, 5) {
                        cube.show().unwrap();
                    } else {
                        let face = Face::ALL[rng.gen_range(0..Face::ALL.len())];
                        cube.rotate(face, rng.gen_range(0..4)).unwrap();
                    }
                }
                done_tx.send(seed).unwrap();
            });
        }

        for _ in 0..threads {
            match done_rx.recv_timeout(PATIENCE) {
                Ok(_) => {}
                Err(RecvTimeoutError::Timeout) => {
                    panic!("worker starved: {:?}", cube.coordinator_stats())
                }
                Err(RecvTimeoutError::Disconnected) => panic!("worker died"),
            }
        }
    });

    assert!(cube.coordinator_stats().is_quiescent());
}

#[test]
fn test_other_axis_and_reader_get_through_busy_axis() {
    let size = 5;
    let cube = Cube::new(size).unwrap();
    let stop = AtomicBool::new(false);
    let (done_tx, done_rx) = unbounded();

    thread::scope(|s| {
        // One thread per plane keeps the TopBottom axis permanently wanted.
        for plane in 0..size {
            let cube = &cube;
            let stop = &stop;
            s.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    cube.rotate(Face::Top, plane).unwrap();
                }
            });
        }

        let writer_tx = done_tx.clone();
        let cube_ref = &cube;
        s.spawn(move || {
            for _ in 0..20 {
                cube_ref.rotate(Face::Right, 2).unwrap();
            }
            writer_tx.send("writer").unwrap();
        });
        let reader_tx = done_tx.clone();
        s.spawn(move || {
            for _ in 0..20 {
                cube_ref.show().unwrap();
            }
            reader_tx.send("reader").unwrap();
        });

        let mut finished = Vec::new();
        for _ in 0..2 {
            let who = done_rx.recv_timeout(PATIENCE);
            if who.is_err() {
                stop.store(true, Ordering::Relaxed);
            }
            finished.push(who.unwrap());
        }
        stop.store(true, Ordering::Relaxed);
        finished.sort_unstable();
        assert_eq!(finished, vec!["reader", "writer"]);
    });

    assert!(cube.coordinator_stats().is_quiescent());
    assert!(cube.snapshot().unwrap().is_legal());
}

#[test]
fn test_readers_do_not_starve_writers() {
    let cube = Cube::new(3).unwrap();
    let stop = AtomicBool::new(false);
    let (done_tx, done_rx) = unbounded();

    thread::scope(|s| {
        for _ in 0..6 {
            let cube = &cube;
            let stop = &stop;
            s.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    cube.show().unwrap();
                }
            });
        }

        let cube_ref = &cube;
        s.spawn(move || {
            for face in Face::ALL {
                cube_ref.rotate(face, 1).unwrap();
            }
            done_tx.send(()).unwrap();
        });

        let result = done_rx.recv_timeout(PATIENCE);
        stop.store(true, Ordering::Relaxed);
        assert!(result.is_ok(), "writer starved behind readers");
    });

    assert!(cube.coordinator_stats().is_quiescent());
}
