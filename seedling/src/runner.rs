//! Runners executing actual application logic.

#[cfg(test)]
use mockall::automock;
pub use seedling_di::instance::ErrorPtr;
use seedling_di::instance::{Instance, InstancePtr};
use seedling_di::type_reference::{BaseType, TypeReference};

/// Type name under which runners are looked up in the context.
pub const RUNNER_TYPE_NAME: &str = "ApplicationRunner";

#[cfg(feature = "threadsafe")]
pub type ApplicationRunnerPtr = dyn ApplicationRunner + Send + Sync;

#[cfg(not(feature = "threadsafe"))]
pub type ApplicationRunnerPtr = dyn ApplicationRunner;

/// Runs application logic. Runners are run by the [Application](crate::application::Application)
/// and are discovered in the context as singletons whose type is a subtype of
/// [runner_type]. Use [runner_instance] to create their instances.
#[cfg_attr(test, automock)]
pub trait ApplicationRunner {
    /// Runs any application code.
    fn run(&self) -> Result<(), ErrorPtr>;

    /// Returns the priority for this runner. Higher priorities get run first. Default 0.
    fn priority(&self) -> i8 {
        0
    }
}

/// Base type which all runner singletons need as a supertype.
pub fn runner_type() -> BaseType {
    BaseType::new(RUNNER_TYPE_NAME)
}

/// Wraps a runner into an instance discoverable by the application.
#[cfg(feature = "threadsafe")]
pub fn runner_instance<R: ApplicationRunner + Send + Sync + 'static>(runner: R) -> Instance {
    Instance::single(InstancePtr::new(runner) as InstancePtr<ApplicationRunnerPtr>)
}

/// Wraps a runner into an instance discoverable by the application.
#[cfg(not(feature = "threadsafe"))]
pub fn runner_instance<R: ApplicationRunner + 'static>(runner: R) -> Instance {
    Instance::single(InstancePtr::new(runner) as InstancePtr<ApplicationRunnerPtr>)
}

pub(crate) fn runner_list_type() -> TypeReference {
    TypeReference::list_of(runner_type().into())
}
