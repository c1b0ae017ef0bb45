//! Cloud controller v3 requests and resources.

mod packages;
mod spaces;
mod tasks;

pub use packages::{
    CopyPackageRequest, CopyPackageRequestBuilder, PackageRelationships, PackageResource,
};
pub use spaces::{AssignSpaceIsolationSegmentRequest, AssignSpaceIsolationSegmentRequestBuilder};
pub use tasks::{
    CancelTaskRequest, ListApplicationTasksRequest, ListApplicationTasksRequestBuilder,
    TaskResource, TaskState,
};
