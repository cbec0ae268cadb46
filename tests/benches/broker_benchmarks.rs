//! # Data Broker Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | Tuples | put + get round trip, by value size |
//! | Keys | directory listing, full iteration |
//! | Persistence | put into a file-backed namespace |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dbr_broker::{BrokerConfig, DataBroker, DataBrokerApi};
use dbr_types::{Cursor, Flags, Group, GroupList, PersistLevel};
use rand::Rng;
use std::time::Duration;

fn make_broker() -> DataBroker {
    DataBroker::new_in_memory(BrokerConfig::default())
}

fn random_value(size: usize) -> Vec<u8> {
    let mut value = vec![0u8; size];
    rand::thread_rng().fill(value.as_mut_slice());
    value
}

// ============================================================================
// Tuples
// ============================================================================

fn bench_put_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("tuples");
    group.measurement_time(Duration::from_secs(5));

    let broker = make_broker();
    let handle = broker
        .create("bench", PersistLevel::VolatileSimple, GroupList::new())
        .unwrap();

    for size in [16usize, 1024, 64 * 1024] {
        let value = random_value(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("put_get", size), &value, |b, value| {
            b.iter(|| {
                broker.put(&handle, value, "k", Group::EMPTY).unwrap();
                black_box(
                    broker
                        .get(&handle, "k", "", Group::EMPTY, Flags::NOWAIT)
                        .unwrap(),
                )
            })
        });
    }

    group.finish();
}

// ============================================================================
// Keys
// ============================================================================

fn bench_key_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("keys");

    for count in [100usize, 10_000] {
        let broker = make_broker();
        let handle = broker
            .create("bench", PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();
        for i in 0..count {
            broker
                .put(&handle, b"v", &format!("key_{:06}", i), Group::EMPTY)
                .unwrap();
        }

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("directory", count), &count, |b, &count| {
            b.iter(|| black_box(broker.directory(&handle, "key_", Group::EMPTY, count).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("iterator", count), &count, |b, _| {
            b.iter(|| {
                let mut cursor = Cursor::NEW;
                let mut seen = 0usize;
                loop {
                    let (key, next) = broker
                        .iterator(&handle, cursor, Group::EMPTY, "")
                        .unwrap();
                    if next.is_done() {
                        break;
                    }
                    seen += usize::from(key.is_some());
                    cursor = next;
                }
                black_box(seen)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Persistence
// ============================================================================

fn bench_persistent_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("persistence");
    group.sample_size(20);

    let dir = tempfile::tempdir().unwrap();
    let broker =
        DataBroker::<dbr_broker::FileNamespaceStore>::open(BrokerConfig::default().with_data_dir(dir.path()))
            .unwrap();
    let handle = broker
        .create("bench", PersistLevel::PermanentFs, GroupList::new())
        .unwrap();
    let value = random_value(256);

    group.bench_function("put_get_256b", |b| {
        b.iter(|| {
            broker.put(&handle, &value, "k", Group::EMPTY).unwrap();
            black_box(
                broker
                    .get(&handle, "k", "", Group::EMPTY, Flags::NOWAIT)
                    .unwrap(),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_put_get,
    bench_key_enumeration,
    bench_persistent_put
);
criterion_main!(benches);
