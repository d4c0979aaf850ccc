pub mod redis_session_store;

pub use redis_session_store::RedisSessionStore;

use anyhow::Context;
use redis::aio::ConnectionManager;

pub async fn connect_redis(redis_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = redis::Client::open(redis_url).context("redis_client_open")?;
    let manager = ConnectionManager::new(client)
        .await
        .context("redis_connection_manager")?;
    Ok(manager)
}
