pub mod envelope;
pub mod maintenance;
pub mod package;
pub mod release;

pub use envelope::{ErrorBody, ResponseEnvelope, ResponseMeta};
pub use maintenance::{MaintenanceSignals, Rating, ScoreFactors};
pub use package::{DownloadStats, PackageSummary};
pub use release::{Deprecation, ReleaseEntry, ReleaseTimeline};
