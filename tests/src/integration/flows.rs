//! # End-to-End Flows
//!
//! The canonical put / iterate / get / delete sequence, plus the error
//! table a caller sees along the way.

#[cfg(test)]
mod tests {
    use dbr_broker::{BrokerConfig, Completion, DataBroker, DataBrokerApi};
    use dbr_types::{
        error_message, Cursor, ErrorCode, Flags, Group, GroupList, PersistLevel, StateMask,
    };
    use std::collections::BTreeSet;
    use std::time::Duration;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NAME: &str = "DBRtestname";

    fn make_broker() -> DataBroker {
        DataBroker::new_in_memory(BrokerConfig::default().with_timeout(Duration::from_millis(100)))
    }

    fn key(i: usize) -> String {
        format!("simple_key_{}", i)
    }

    fn value(i: usize) -> String {
        format!("test-value-{}", i)
    }

    // =============================================================================
    // ITERATE EXAMPLE
    // =============================================================================

    #[test]
    fn test_iterate_example_trace() {
        let broker = make_broker();
        let handle = broker
            .create(NAME, PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();

        let state = broker.query(&handle, StateMask::ALL).unwrap();
        assert_eq!(state.name, NAME);

        for i in 0..10 {
            broker
                .put(&handle, value(i).as_bytes(), &key(i), Group::EMPTY)
                .unwrap();
        }

        let mut seen = BTreeSet::new();
        let (mut next_key, mut cursor) = broker
            .iterator(&handle, Cursor::NEW, Group::EMPTY, "")
            .unwrap();
        while cursor != Cursor::DONE {
            let k = next_key.take().unwrap();
            let got = broker
                .get(&handle, &k, "", Group::EMPTY, Flags::NONE)
                .unwrap();

            let i: usize = k.trim_start_matches("simple_key_").parse().unwrap();
            assert_eq!(got, value(i).into_bytes());
            assert!(seen.insert(k));

            (next_key, cursor) = broker
                .iterator(&handle, cursor, Group::EMPTY, "")
                .unwrap();
        }

        let expected: BTreeSet<String> = (0..10).map(key).collect();
        assert_eq!(seen, expected);

        let status = match broker.delete(NAME) {
            Ok(()) => ErrorCode::Success,
            Err(e) => e.code(),
        };
        assert_eq!(status.message(), "Operation successful");
    }

    #[test]
    fn test_iteration_sees_snapshot_only() {
        let broker = make_broker();
        let handle = broker
            .create(NAME, PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();
        for i in 0..3 {
            broker
                .put(&handle, value(i).as_bytes(), &key(i), Group::EMPTY)
                .unwrap();
        }

        let (first, cursor) = broker
            .iterator(&handle, Cursor::NEW, Group::EMPTY, "")
            .unwrap();
        assert_eq!(first.as_deref(), Some("simple_key_0"));

        // Added after the snapshot: never seen. Removed: skipped.
        broker
            .put(&handle, b"late", "simple_key_9", Group::EMPTY)
            .unwrap();
        broker
            .remove(&handle, Group::EMPTY, "simple_key_1", "")
            .unwrap();

        let (second, cursor) = broker
            .iterator(&handle, cursor, Group::EMPTY, "")
            .unwrap();
        assert_eq!(second.as_deref(), Some("simple_key_2"));

        let (last, cursor) = broker
            .iterator(&handle, cursor, Group::EMPTY, "")
            .unwrap();
        assert_eq!(last, None);
        assert!(cursor.is_done());
    }

    #[test]
    fn test_move_between_groups_then_iterate() {
        let broker = make_broker();
        let groups = GroupList::new().with(Group(1)).with(Group(2));
        let handle = broker
            .create(NAME, PersistLevel::VolatileSimple, groups)
            .unwrap();

        broker.put(&handle, b"a", "k", Group(1)).unwrap();
        broker
            .move_tuple(&handle, Group(1), "k", "", &handle, Group(2))
            .unwrap();

        assert!(broker.directory(&handle, "", Group(1), 10).unwrap().is_empty());
        assert_eq!(broker.directory(&handle, "", Group(2), 10).unwrap(), vec!["k"]);
    }

    #[test]
    fn test_async_flow_matches_sync_results() {
        let broker = make_broker();
        let handle = broker
            .create(NAME, PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();

        let tags: Vec<_> = (0..5)
            .map(|i| {
                broker
                    .put_a(&handle, value(i).as_bytes(), &key(i), Group::EMPTY)
                    .unwrap()
            })
            .collect();
        for tag in tags {
            assert_eq!(broker.test(tag).unwrap(), Completion::Done(None));
        }

        for i in 0..5 {
            let tag = broker
                .read_a(&handle, &key(i), "", Group::EMPTY, Flags::NOWAIT)
                .unwrap();
            assert_eq!(
                broker.test(tag).unwrap(),
                Completion::Done(Some(value(i).into_bytes()))
            );
        }
    }

    // =============================================================================
    // ERROR TABLE
    // =============================================================================

    #[test]
    fn test_every_code_has_distinct_message() {
        let messages: BTreeSet<&str> = ErrorCode::ALL.iter().map(|c| c.message()).collect();
        assert_eq!(messages.len(), ErrorCode::ALL.len());

        for code in ErrorCode::ALL {
            assert_eq!(error_message(code.as_i32()), code.message());
        }
        assert_eq!(error_message(-1), ErrorCode::Generic.message());
    }

    #[test]
    fn test_error_codes_seen_by_a_caller() {
        let broker = make_broker();
        let handle = broker
            .create(NAME, PersistLevel::VolatileSimple, GroupList::new())
            .unwrap();
        let extra = broker.attach(NAME).unwrap();

        let cases = [
            (
                broker.delete(NAME).unwrap_err().code(),
                ErrorCode::NamespaceBusy,
            ),
            (
                broker
                    .get(&handle, "missing", "", Group::EMPTY, Flags::NOWAIT)
                    .unwrap_err()
                    .code(),
                ErrorCode::Unavailable,
            ),
            (
                broker
                    .get(&handle, "missing", "", Group::EMPTY, Flags::NONE)
                    .unwrap_err()
                    .code(),
                ErrorCode::Timeout,
            ),
            (
                broker.attach("other").unwrap_err().code(),
                ErrorCode::NamespaceInvalid,
            ),
        ];
        for (got, expected) in cases {
            assert_eq!(got, expected);
        }

        broker.detach(&extra).unwrap();
        broker.delete(NAME).unwrap();
        assert_eq!(
            broker.query(&handle, StateMask::ALL).unwrap_err().code(),
            ErrorCode::Handle
        );
    }
}
