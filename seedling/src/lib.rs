//! Application framework based on [seedling_di] dependency injection.
//!
//! An application built on dependency injection still needs an entrypoint which creates the
//! [Context](seedling_di::context::Context) and runs the actual business logic. This crate provides
//! such entrypoint in the form of [Application](application::Application), which also reads
//! configuration and installs supporting infrastructure, e.g. logging.
//!
//! ```no_run
//! use seedling::application;
//! use seedling::runner::{runner_instance, runner_type, ApplicationRunner, ErrorPtr};
//! use seedling_di::definition::{Identifier, SingletonDefinition};
//! use seedling_di::definition_source::DefinitionRegisterer;
//! use seedling_di::submit;
//! use seedling_di::type_reference::BaseType;
//!
//! struct HelloRunner;
//!
//! impl ApplicationRunner for HelloRunner {
//!     fn run(&self) -> Result<(), ErrorPtr> {
//!         println!("Hello world!");
//!         Ok(())
//!     }
//! }
//!
//! fn hello_runner() -> SingletonDefinition {
//!     SingletonDefinition::new(
//!         Identifier::new(BaseType::new("HelloRunner").with_supertype(runner_type()).into()),
//!         |_| Ok(runner_instance(HelloRunner)),
//!     )
//! }
//!
//! submit! {
//!     DefinitionRegisterer { register: hello_runner }
//! }
//!
//! fn main() {
//!     application::create_default()
//!         .expect("unable to create application")
//!         .run()
//!         .expect("error running application");
//! }
//! ```
//!
//! ### Features
//!
//! * `threadsafe` - use threadsafe pointers and `Send + Sync` trait bounds

pub mod application;
pub mod config;
pub mod runner;
