/*!
 * Bytes Memory Pool - Demo Entry Point
 *
 * Acquires an empty buffer and prints its capacity. Set BUFPOOL_STATS=1 to
 * also dump the pool statistics as JSON.
 */

use std::error::Error;
use tracing::info;

use bytes_memory_pool::{init_tracing, BufferPool, PoolConfig};

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = PoolConfig::from_env()?;
    info!(retain_limit = ?config.retain_limit, "Creating buffer pool");
    let pool = BufferPool::with_config(config);

    let buf = pool.acquire(0);
    println!("{}", buf.capacity());
    pool.release(buf);

    if std::env::var("BUFPOOL_STATS").is_ok_and(|v| v == "1" || v == "true") {
        println!("{}", serde_json::to_string_pretty(&pool.stats())?);
    }

    Ok(())
}
