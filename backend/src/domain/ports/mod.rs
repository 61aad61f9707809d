//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod publish_metrics;
mod volunteer_command;
mod volunteer_event_publisher;
mod volunteer_query;
mod volunteer_repository;

#[cfg(test)]
pub use publish_metrics::MockPublishMetrics;
pub use publish_metrics::{
    NoOpPublishMetrics, PublishMetrics, PublishMetricsError, PublishOutcome,
};
#[cfg(test)]
pub use volunteer_command::MockVolunteerCommand;
pub use volunteer_command::{RegisterVolunteerRequest, UpdateProfileRequest, VolunteerCommand};
#[cfg(test)]
pub use volunteer_event_publisher::MockVolunteerEventPublisher;
pub use volunteer_event_publisher::{VolunteerEventPublishError, VolunteerEventPublisher};
#[cfg(test)]
pub use volunteer_query::MockVolunteerQuery;
pub use volunteer_query::VolunteerQuery;
#[cfg(test)]
pub use volunteer_repository::MockVolunteerRepository;
pub use volunteer_repository::{VolunteerFilter, VolunteerRepository, VolunteerRepositoryError};
