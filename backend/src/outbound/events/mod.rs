//! Outbound event channel adapters.

mod redis_stream_publisher;

pub use redis_stream_publisher::{RedisPublisherConfig, RedisStreamPublisher};
