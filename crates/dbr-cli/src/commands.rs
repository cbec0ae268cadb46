//! Subcommand implementations.
//!
//! Every command writes its output to the given writer so tests can capture
//! it.

use crate::cli::Command;
use anyhow::{bail, Context, Result};
use dbr_broker::{BrokerConfig, BrokerError, DataBroker, DataBrokerApi, NamespaceHandle};
use dbr_types::{Cursor, ErrorCode, Flags, Group, GroupList, PersistLevel, StateMask};
use std::io::Write;
use tracing::info;

/// Number of keys the demo puts.
const DEMO_KEYS: usize = 10;

/// Put `simple_key_0..9`, iterate the namespace, `get` every key, delete it.
///
/// Individual call failures are ignored like any fire-and-forget script;
/// only the final delete status is reported.
pub fn iterate_demo(broker: &impl DataBrokerApi, name: &str, out: &mut impl Write) -> Result<()> {
    let handle = broker
        .create(name, PersistLevel::VolatileSimple, GroupList::new())
        .with_context(|| format!("creating namespace '{}'", name))?;

    let _ = broker.query(&handle, StateMask::ALL);

    for i in 0..DEMO_KEYS {
        let key = format!("simple_key_{}", i);
        writeln!(out, "Putting key: {}", key)?;
        let _ = broker.put(
            &handle,
            format!("test-value-{}", i).as_bytes(),
            &key,
            Group::EMPTY,
        );
    }

    let (mut key, mut cursor) = broker.iterator(&handle, Cursor::NEW, Group::EMPTY, "")?;
    while !cursor.is_done() {
        if let Some(key) = key.as_deref() {
            let value = broker
                .get(&handle, key, "", Group::EMPTY, Flags::NONE)
                .unwrap_or_default();
            writeln!(
                out,
                "On key {} Get returned: {}",
                key,
                String::from_utf8_lossy(&value)
            )?;
        }
        (key, cursor) = broker.iterator(&handle, cursor, Group::EMPTY, "")?;
    }

    writeln!(out, "Delete Data Broker")?;
    let status = status_of(broker.delete(name));
    writeln!(out, "Exit Status: {}", status.message())?;
    Ok(())
}

fn status_of<T>(result: std::result::Result<T, BrokerError>) -> ErrorCode {
    match result {
        Ok(_) => ErrorCode::Success,
        Err(e) => e.code(),
    }
}

/// Run a single operation against the file store.
pub fn run_store_command(config: BrokerConfig, command: Command, out: &mut impl Write) -> Result<()> {
    let dir = config
        .data_dir
        .clone()
        .context("no data directory: pass --data-dir or set DBR_DATA_DIR")?;
    let broker = DataBroker::open(config)
        .with_context(|| format!("opening data directory {}", dir.display()))?;
    info!("Using data directory {}", dir.display());

    match command {
        Command::IterateDemo { .. } => bail!("iterate-demo does not use a data directory"),

        Command::Create {
            name,
            level,
            groups,
        } => {
            if !level.is_persistent() {
                bail!("level '{}' would not outlive this command", level);
            }
            let groups: GroupList = groups.into_iter().map(Group).collect();
            let handle = broker
                .create(&name, level, groups)
                .with_context(|| format!("creating '{}'", name))?;
            broker.detach(&handle)?;
            writeln!(out, "Created {}", name)?;
        }

        Command::Delete { name } => {
            broker
                .delete(&name)
                .with_context(|| format!("deleting '{}'", name))?;
            writeln!(out, "Deleted {}", name)?;
        }

        Command::Put {
            name,
            key,
            value,
            group,
        } => with_handle(&broker, &name, |handle| {
            broker.put(handle, value.as_bytes(), &key, Group(group))
        })?,

        Command::Get {
            name,
            key,
            group,
            wait,
        } => {
            let value = with_handle(&broker, &name, |handle| {
                broker.get(handle, &key, "", Group(group), wait_flags(wait))
            })
            .with_context(|| format!("get '{}'", key))?;
            out.write_all(&value)?;
            writeln!(out)?;
        }

        Command::Read {
            name,
            key,
            group,
            wait,
        } => {
            let value = with_handle(&broker, &name, |handle| {
                broker.read(handle, &key, "", Group(group), wait_flags(wait))
            })
            .with_context(|| format!("read '{}'", key))?;
            out.write_all(&value)?;
            writeln!(out)?;
        }

        Command::Remove { name, key, group } => with_handle(&broker, &name, |handle| {
            broker.remove(handle, Group(group), &key, "")
        })?,

        Command::Dir {
            name,
            prefix,
            group,
            count,
        } => {
            let keys = with_handle(&broker, &name, |handle| {
                broker.directory(handle, &prefix, Group(group), count)
            })?;
            for key in keys {
                writeln!(out, "{}", key)?;
            }
        }

        Command::Query { name } => {
            let state =
                with_handle(&broker, &name, |handle| broker.query(handle, StateMask::ALL))?;
            writeln!(out, "{}", serde_json::to_string_pretty(&state)?)?;
        }
    }
    Ok(())
}

/// Attach, run `op`, detach. The detach happens even when `op` fails.
fn with_handle<T>(
    broker: &impl DataBrokerApi,
    name: &str,
    op: impl FnOnce(&NamespaceHandle) -> std::result::Result<T, BrokerError>,
) -> Result<T> {
    let handle = broker
        .attach(name)
        .with_context(|| format!("attaching to '{}'", name))?;
    let result = op(&handle);
    broker.detach(&handle)?;
    Ok(result?)
}

fn wait_flags(wait: bool) -> Flags {
    if wait {
        Flags::NONE
    } else {
        Flags::NOWAIT
    }
}
