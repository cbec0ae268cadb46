//! # Persistence
//!
//! A broker backed by `FileNamespaceStore`, dropped and reopened on the
//! same directory.

#[cfg(test)]
mod tests {
    use dbr_broker::{
        BrokerConfig, DataBroker, DataBrokerApi, FileNamespaceStore, NamespaceStore,
    };
    use dbr_types::{ErrorCode, Flags, Group, GroupList, PersistLevel, StateMask};
    use std::path::Path;

    fn open(dir: &Path) -> DataBroker<FileNamespaceStore> {
        DataBroker::open(BrokerConfig::default().with_data_dir(dir)).unwrap()
    }

    #[test]
    fn test_persistent_namespace_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let broker = open(dir.path());
            let handle = broker
                .create("durable", PersistLevel::PermanentFs, GroupList::new())
                .unwrap();
            broker.put(&handle, b"one", "k", Group::EMPTY).unwrap();
            broker.put(&handle, b"two", "k", Group::EMPTY).unwrap();
            broker
                .get(&handle, "k", "", Group::EMPTY, Flags::NOWAIT)
                .unwrap();
        }

        let broker = open(dir.path());
        let handle = broker.attach("durable").unwrap();
        let state = broker.query(&handle, StateMask::ALL).unwrap();
        assert_eq!(state.level, Some(PersistLevel::PermanentFs));
        assert_eq!(state.tuple_count, Some(1));

        let value = broker
            .get(&handle, "k", "", Group::EMPTY, Flags::NOWAIT)
            .unwrap();
        assert_eq!(value, b"two");
    }

    #[test]
    fn test_volatile_namespace_does_not_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let broker = open(dir.path());
            let handle = broker
                .create("scratch", PersistLevel::VolatileSimple, GroupList::new())
                .unwrap();
            broker.put(&handle, b"v", "k", Group::EMPTY).unwrap();
        }

        let broker = open(dir.path());
        let err = broker.attach("scratch").unwrap_err();
        assert_eq!(err.code(), ErrorCode::NamespaceInvalid);
    }

    #[test]
    fn test_delete_removes_snapshot() {
        let dir = tempfile::tempdir().unwrap();

        {
            let broker = open(dir.path());
            let handle = broker
                .create("durable", PersistLevel::TemporaryFs, GroupList::new())
                .unwrap();
            broker.detach(&handle).unwrap();
            assert_eq!(broker.store().list().unwrap(), vec!["durable"]);

            broker.delete("durable").unwrap();
            assert!(broker.store().list().unwrap().is_empty());
        }

        let broker = open(dir.path());
        assert!(broker
            .create("durable", PersistLevel::TemporaryFs, GroupList::new())
            .is_ok());
    }

    #[test]
    fn test_corrupt_snapshot_reported_as_backend_error() {
        let dir = tempfile::tempdir().unwrap();

        {
            let broker = open(dir.path());
            let handle = broker
                .create("durable", PersistLevel::PermanentFs, GroupList::new())
                .unwrap();
            broker.put(&handle, b"payload", "k", Group::EMPTY).unwrap();
        }

        let path = dir.path().join("durable.dbr");
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x55;
        std::fs::write(&path, bytes).unwrap();

        let broker = open(dir.path());
        let err = broker.attach("durable").unwrap_err();
        assert_eq!(err.code(), ErrorCode::BackendGeneral);
    }

    #[test]
    fn test_data_dir_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let _first = open(dir.path());

        let err = DataBroker::<FileNamespaceStore>::open(BrokerConfig::default().with_data_dir(dir.path()))
            .unwrap_err();
        let err: dbr_broker::BrokerError = err.into();
        assert_eq!(err.code(), ErrorCode::NoConnect);
    }

    #[test]
    fn test_open_without_data_dir_fails() {
        assert!(DataBroker::<FileNamespaceStore>::open(BrokerConfig::default()).is_err());
    }
}
