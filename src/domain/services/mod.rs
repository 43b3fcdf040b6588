//! Domain Services
//!
//! Business logic that operates on domain entities. Anything touching the
//! outside world goes through a port.

mod artifact;
mod differ;
mod reconciler;
mod validator;

pub use artifact::{
    generate, ArtifactDocument, ArtifactGenerator, BlocklistSection, LoggingSection,
    OpnsenseSection, SocialMediaSection, UnboundSection,
};
pub use differ::{DiffResult, Differ};
pub use reconciler::{ServiceReconciler, ServiceTarget};
pub use validator::validate;
