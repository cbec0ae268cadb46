//! # Concurrency
//!
//! Several threads sharing one `DataBroker` through `Arc`.

#[cfg(test)]
mod tests {
    use dbr_broker::{BrokerConfig, DataBroker, DataBrokerApi};
    use dbr_types::{ErrorCode, Flags, Group, GroupList, PersistLevel, StateMask};
    use parking_lot::Mutex;
    use rand::Rng;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn make_shared_broker(timeout: Duration) -> Arc<DataBroker> {
        Arc::new(DataBroker::new_in_memory(
            BrokerConfig::default().with_timeout(timeout),
        ))
    }

    #[test]
    fn test_producers_and_consumers_exchange_every_tuple() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 50;

        let broker = make_shared_broker(Duration::from_secs(5));
        let handle = broker
            .create("queue", PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));

        let consumers: Vec<_> = (0..PRODUCERS)
            .map(|_| {
                let broker = Arc::clone(&broker);
                let handle = handle.clone();
                let received = Arc::clone(&received);
                thread::spawn(move || {
                    for _ in 0..PER_PRODUCER {
                        let value = broker
                            .get(&handle, "work", "", Group::EMPTY, Flags::NONE)
                            .unwrap();
                        received.lock().push(value);
                    }
                })
            })
            .collect();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let broker = Arc::clone(&broker);
                let handle = handle.clone();
                thread::spawn(move || {
                    let mut rng = rand::thread_rng();
                    for i in 0..PER_PRODUCER {
                        let value = format!("{}:{}", p, i);
                        broker
                            .put(&handle, value.as_bytes(), "work", Group::EMPTY)
                            .unwrap();
                        if rng.gen_bool(0.1) {
                            thread::yield_now();
                        }
                    }
                })
            })
            .collect();

        for t in producers.into_iter().chain(consumers) {
            t.join().unwrap();
        }

        let mut received = received.lock().clone();
        received.sort();
        received.dedup();
        assert_eq!(received.len(), PRODUCERS * PER_PRODUCER);

        let state = broker.query(&handle, StateMask::TUPLES).unwrap();
        assert_eq!(state.tuple_count, Some(0));
    }

    #[test]
    fn test_one_put_wakes_exactly_one_taker() {
        let broker = make_shared_broker(Duration::from_millis(300));
        let handle = broker
            .create("single", PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();

        let takers: Vec<_> = (0..3)
            .map(|_| {
                let broker = Arc::clone(&broker);
                let handle = handle.clone();
                thread::spawn(move || broker.get(&handle, "k", "", Group::EMPTY, Flags::NONE))
            })
            .collect();

        thread::sleep(Duration::from_millis(30));
        broker.put(&handle, b"only", "k", Group::EMPTY).unwrap();

        let results: Vec<_> = takers.into_iter().map(|t| t.join().unwrap()).collect();
        let winners = results.iter().filter(|r| r.is_ok()).count();
        let timeouts = results
            .iter()
            .filter(|r| matches!(r, Err(e) if e.code() == ErrorCode::Timeout))
            .count();
        assert_eq!(winners, 1);
        assert_eq!(timeouts, 2);
    }

    #[test]
    fn test_readers_all_see_value() {
        let broker = make_shared_broker(Duration::from_secs(5));
        let handle = broker
            .create("shared", PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let broker = Arc::clone(&broker);
                let handle = handle.clone();
                thread::spawn(move || broker.read(&handle, "k", "", Group::EMPTY, Flags::NONE))
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        broker.put(&handle, b"broadcast", "k", Group::EMPTY).unwrap();

        for reader in readers {
            assert_eq!(reader.join().unwrap().unwrap(), b"broadcast");
        }
    }
}
