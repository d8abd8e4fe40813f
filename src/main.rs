/*!
 * hostproc - snapshot report
 *
 * Prints uptime and a bounded process listing as JSON.
 *
 * Environment:
 * - HOSTPROC_LIST_CAPACITY: maximum processes to list
 * - HOSTPROC_TIMEOUT_MS: deadline for the listing
 * - HOSTPROC_TRACE_JSON: JSON log output
 */

use anyhow::Context;
use hostproc::{init_tracing, HostprocConfig, ProcessTable};
use serde_json::json;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = HostprocConfig::from_env();
    init_tracing(config.trace_json);

    let table = ProcessTable::new();
    info!(
        list_capacity = config.list_capacity,
        timeout_ms = config.operation_timeout.as_millis() as u64,
        "Collecting process snapshot"
    );

    let uptime = table.uptime();
    let mut processes = table
        .list_within(config.list_capacity, config.operation_timeout)
        .context("process listing did not finish")?;
    processes.sort_by(|a, b| b.memory_usage.cmp(&a.memory_usage));

    let report = json!({
        "uptime": uptime,
        "count": processes.len(),
        "processes": processes,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serializing report")?
    );
    Ok(())
}
